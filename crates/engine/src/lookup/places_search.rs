//! Text Search on the versioned Places API.

use std::sync::Arc;

use serde_json::{Map, Value, json};
use wayfinder_api::Transport;
use wayfinder_types::{Query, RequestDescriptor};

use crate::config::Configuration;
use crate::error::{ConfigError, LookupError};
use crate::lookup::parameters::{extend_without_override, merge_params, resolve_language, resolve_location_bias, resolve_region};
use crate::lookup::{API_KEY_HEADER, Lookup, LookupContext, resolve_field_mask, versioned_error_status};
use crate::place::{Place, PlacesSearchResult};

const HOST: &str = "places.googleapis.com";
const PATH: &str = "/v1/places:searchText";

/// Fields requested when neither the query nor the configuration selects any.
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
];

/// Free-text search with `POST /v1/places:searchText`.
///
/// Everything except the API key goes into the JSON body: `textQuery`,
/// `languageCode`, `regionCode`, `locationBias` and the field selection as
/// `includedFields.paths`. Language and region are mirrored into the URL so
/// request logs show them.
#[derive(Debug)]
pub struct PlacesSearch {
    context: LookupContext,
}

impl PlacesSearch {
    pub const HANDLE: &'static str = "google_places_search";

    pub fn new(configuration: &Configuration, transport: Arc<dyn Transport>) -> Self {
        Self {
            context: LookupContext::new(configuration, Self::HANDLE, transport),
        }
    }
}

impl Lookup for PlacesSearch {
    fn name(&self) -> &'static str {
        "Google Places Search"
    }

    fn handle(&self) -> &'static str {
        Self::HANDLE
    }

    fn build_request(&self, query: &Query) -> Result<RequestDescriptor, ConfigError> {
        let credentials = self.context.credentials(self)?;
        let settings = self.context.settings();
        let language = resolve_language(query, settings);
        let region = resolve_region(query, settings);

        let mut body = Map::new();
        body.insert("textQuery".to_string(), Value::String(query.text().as_text().to_string()));
        if let Some(bias) = resolve_location_bias(query, settings) {
            body.insert("locationBias".to_string(), bias.clone());
        }
        if let Some(language) = language {
            body.insert("languageCode".to_string(), language.into());
        }
        if let Some(region) = region {
            body.insert("regionCode".to_string(), region.into());
        }
        if let Some(mask) = resolve_field_mask(query, settings, DEFAULT_FIELDS) {
            body.insert("includedFields".to_string(), json!({ "paths": mask }));
        }
        extend_without_override(&mut body, merge_params(query, settings));

        let mut parameters = Map::new();
        if let Some(language) = language {
            parameters.insert("languageCode".to_string(), language.into());
        }
        if let Some(region) = region {
            parameters.insert("regionCode".to_string(), region.into());
        }
        let url = self.context.endpoint(self, HOST, PATH, &parameters)?;

        Ok(RequestDescriptor::post(url, Value::Object(body))
            .with_header("Content-Type", "application/json")
            .with_header(API_KEY_HEADER, credentials[0]))
    }

    fn fetch(&self, query: &Query) -> Result<Vec<Box<dyn Place>>, LookupError> {
        let request = self.build_request(query)?;
        let Some(document) = self.context.round_trip(self, &request, versioned_error_status)? else {
            return Ok(Vec::new());
        };

        let places = wayfinder_util::first_array(&document, &["places"]);
        Ok(places
            .iter()
            .map(|place| Box::new(PlacesSearchResult::new(place.clone())) as Box<dyn Place>)
            .collect())
    }
}
