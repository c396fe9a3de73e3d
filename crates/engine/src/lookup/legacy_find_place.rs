//! Find Place From Text on the legacy `maps/api/place` web service.

use std::sync::Arc;

use serde_json::{Map, Value};
use wayfinder_api::Transport;
use wayfinder_types::{Query, RequestDescriptor};
use wayfinder_util::http::query_value_to_string;

use crate::config::Configuration;
use crate::error::{ConfigError, LookupError};
use crate::lookup::parameters::{extend_without_override, merge_params, resolve_language, resolve_location_bias};
use crate::lookup::{Lookup, LookupContext, legacy_error_status, resolve_field_mask};
use crate::place::{LegacyFindPlaceResult, Place};

const HOST: &str = "maps.googleapis.com";
const PATH: &str = "/maps/api/place/findplacefromtext/json";

pub const DEFAULT_FIELDS: &[&str] = &[
    "business_status",
    "formatted_address",
    "geometry",
    "icon",
    "name",
    "photos",
    "place_id",
    "plus_code",
    "types",
    "opening_hours",
    "price_level",
    "rating",
    "user_ratings_total",
];

/// Free-text search with `GET findplacefromtext/json?inputtype=textquery`.
#[derive(Debug)]
pub struct LegacyFindPlace {
    context: LookupContext,
}

impl LegacyFindPlace {
    pub const HANDLE: &'static str = "google_places_search_legacy";

    pub fn new(configuration: &Configuration, transport: Arc<dyn Transport>) -> Self {
        Self {
            context: LookupContext::new(configuration, Self::HANDLE, transport),
        }
    }
}

impl Lookup for LegacyFindPlace {
    fn name(&self) -> &'static str {
        "Google Places Search (legacy)"
    }

    fn handle(&self) -> &'static str {
        Self::HANDLE
    }

    fn build_request(&self, query: &Query) -> Result<RequestDescriptor, ConfigError> {
        let credentials = self.context.credentials(self)?;
        let settings = self.context.settings();

        let mut parameters = Map::new();
        parameters.insert("input".to_string(), Value::String(query.text().as_text().to_string()));
        parameters.insert("inputtype".to_string(), "textquery".into());
        parameters.insert("key".to_string(), credentials[0].into());
        if let Some(language) = resolve_language(query, settings) {
            parameters.insert("language".to_string(), language.into());
        }
        // The legacy service takes the bias as a single string such as `circle:2000@47.6,-122.3`.
        if let Some(bias) = resolve_location_bias(query, settings) {
            parameters.insert("locationbias".to_string(), query_value_to_string(bias).into());
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
        let Some(document) = self.context.round_trip(self, &request, legacy_error_status)? else {
            return Ok(Vec::new());
        };

        let candidates = wayfinder_util::first_array(&document, &["candidates"]);
        Ok(candidates
            .iter()
            .map(|candidate| Box::new(LegacyFindPlaceResult::new(candidate.clone())) as Box<dyn Place>)
            .collect())
    }
}
