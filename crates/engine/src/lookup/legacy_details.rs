//! Place Details on the legacy `maps/api/place` web service.

use std::sync::Arc;

use serde_json::Map;
use wayfinder_api::Transport;
use wayfinder_types::{Query, RequestDescriptor};

use crate::config::Configuration;
use crate::error::{ConfigError, LookupError};
use crate::lookup::parameters::{extend_without_override, merge_params, resolve_language, resolve_region};
use crate::lookup::{Lookup, LookupContext, legacy_error_status, place_identifier, resolve_field_mask};
use crate::place::{LegacyDetailsResult, Place};

const HOST: &str = "maps.googleapis.com";
const PATH: &str = "/maps/api/place/details/json";

pub const DEFAULT_FIELDS: &[&str] = &[
    "address_component",
    "adr_address",
    "business_status",
    "formatted_address",
    "geometry",
    "icon",
    "name",
    "photo",
    "place_id",
    "plus_code",
    "type",
    "url",
    "utc_offset",
    "vicinity",
    "formatted_phone_number",
    "international_phone_number",
    "opening_hours",
    "website",
    "price_level",
    "rating",
    "review",
    "user_ratings_total",
];

/// Fetches one place by identifier with `GET details/json?placeid=...`.
///
/// The legacy service only accepts the key as a query parameter; request
/// logging goes through [`RequestDescriptor::redacted_url`].
#[derive(Debug)]
pub struct LegacyPlacesDetails {
    context: LookupContext,
}

impl LegacyPlacesDetails {
    pub const HANDLE: &'static str = "google_places_details_legacy";

    pub fn new(configuration: &Configuration, transport: Arc<dyn Transport>) -> Self {
        Self {
            context: LookupContext::new(configuration, Self::HANDLE, transport),
        }
    }
}

impl Lookup for LegacyPlacesDetails {
    fn name(&self) -> &'static str {
        "Google Places Details (legacy)"
    }

    fn handle(&self) -> &'static str {
        Self::HANDLE
    }

    fn build_request(&self, query: &Query) -> Result<RequestDescriptor, ConfigError> {
        let credentials = self.context.credentials(self)?;
        let settings = self.context.settings();
        let text = query.text().as_text();

        let mut parameters = Map::new();
        parameters.insert("placeid".to_string(), place_identifier(text).into());
        parameters.insert("key".to_string(), credentials[0].into());
        if let Some(language) = resolve_language(query, settings) {
            parameters.insert("language".to_string(), language.into());
        }
        if let Some(region) = resolve_region(query, settings) {
            parameters.insert("region".to_string(), region.into());
        }
        if let Some(mask) = resolve_field_mask(query, settings, DEFAULT_FIELDS) {
            parameters.insert("fields".to_string(), mask.join(",").into());
        }
        extend_without_override(&mut parameters, merge_params(query, settings));

        let url = self.context.endpoint(self, HOST, PATH, &parameters)?;
        Ok(RequestDescriptor::get(url))
    }

    fn fetch(&self, query: &Query) -> Result<Vec<Box<dyn Place>>, LookupError> {
        let request = self.build_request(query)?;
        if query.is_reverse() {
            self.context.reject_reverse(self, query)?;
            return Ok(Vec::new());
        }

        let Some(document) = self.context.round_trip(self, &request, legacy_error_status)? else {
            return Ok(Vec::new());
        };
        Ok(wayfinder_util::read_path(&document, &["result"])
            .filter(|result| result.is_object())
            .map(|result| Box::new(LegacyDetailsResult::new(result.clone())) as Box<dyn Place>)
            .into_iter()
            .collect())
    }
}
