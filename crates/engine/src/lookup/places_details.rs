//! Place Details on the versioned Places API.

use std::sync::Arc;

use serde_json::Map;
use wayfinder_api::Transport;
use wayfinder_types::{Query, RequestDescriptor};
use wayfinder_util::http::{build_path, is_dot_segment};

use crate::config::Configuration;
use crate::error::{ConfigError, LookupError};
use crate::lookup::parameters::{extend_without_override, merge_params, resolve_language, resolve_region};
use crate::lookup::{API_KEY_HEADER, FIELD_MASK_HEADER, Lookup, LookupContext, place_identifier, resolve_field_mask, versioned_error_status};
use crate::place::{Place, PlacesDetailsResult};

const HOST: &str = "places.googleapis.com";
const PATH_TEMPLATE: &str = "/v1/places/{place_id}";

/// Field mask sent when neither the query nor the configuration selects one.
pub const DEFAULT_FIELDS: &[&str] = &[
    "id",
    "displayName.text",
    "formattedAddress",
    "location",
    "types",
    "websiteUri",
    "rating",
    "userRatingCount",
    "priceLevel",
    "businessStatus",
    "regularOpeningHours",
    "photos",
    "internationalPhoneNumber",
    "addressComponents",
];

/// Fetches one place by identifier with `GET /v1/places/{id}`.
///
/// The API key and field mask travel in headers, so the URL never carries
/// credentials.
#[derive(Debug)]
pub struct PlacesDetails {
    context: LookupContext,
}

impl PlacesDetails {
    pub const HANDLE: &'static str = "google_places_details";

    pub fn new(configuration: &Configuration, transport: Arc<dyn Transport>) -> Self {
        Self {
            context: LookupContext::new(configuration, Self::HANDLE, transport),
        }
    }
}

impl Lookup for PlacesDetails {
    fn name(&self) -> &'static str {
        "Google Places Details"
    }

    fn handle(&self) -> &'static str {
        Self::HANDLE
    }

    fn build_request(&self, query: &Query) -> Result<RequestDescriptor, ConfigError> {
        let credentials = self.context.credentials(self)?;
        let settings = self.context.settings();

        let mut parameters = Map::new();
        if let Some(language) = resolve_language(query, settings) {
            parameters.insert("languageCode".to_string(), language.into());
        }
        if let Some(region) = resolve_region(query, settings) {
            parameters.insert("regionCode".to_string(), region.into());
        }
        extend_without_override(&mut parameters, merge_params(query, settings));

        let identifier = place_identifier(query.text().as_text());
        if identifier.is_empty() || is_dot_segment(identifier) {
            return Err(ConfigError::InvalidIdentifier {
                lookup: self.name().to_string(),
                identifier: identifier.to_string(),
            });
        }
        let path = build_path(PATH_TEMPLATE, &[("place_id", identifier)]);
        let url = self.context.endpoint(self, HOST, &path, &parameters)?;

        let mut request = RequestDescriptor::get(url).with_header(API_KEY_HEADER, credentials[0]);
        if let Some(mask) = resolve_field_mask(query, settings, DEFAULT_FIELDS) {
            request = request.with_header(FIELD_MASK_HEADER, mask.join(","));
        }
        Ok(request)
    }

    fn fetch(&self, query: &Query) -> Result<Vec<Box<dyn Place>>, LookupError> {
        let request = match self.build_request(query) {
            Err(ConfigError::InvalidIdentifier { identifier, .. }) => {
                self.context.reject_identifier(self, &identifier)?;
                return Ok(Vec::new());
            }
            request => request?,
        };
        if query.is_reverse() {
            self.context.reject_reverse(self, query)?;
            return Ok(Vec::new());
        }

        let Some(document) = self.context.round_trip(self, &request, versioned_error_status)? else {
            return Ok(Vec::new());
        };
        Ok(vec![Box::new(PlacesDetailsResult::new(document)) as Box<dyn Place>])
    }
}
