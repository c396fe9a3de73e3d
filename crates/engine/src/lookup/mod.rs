//! Lookup adapters.
//!
//! A [`Lookup`] turns a [`Query`] into a provider request, performs it through
//! the configured [`Transport`](wayfinder_api::Transport), classifies any
//! provider error and wraps each returned record in a [`Place`].
//!
//! Every variant is immutable after construction and safe to share between
//! threads; a single instance may serve concurrent calls.

mod context;
mod field_mask;
mod legacy_details;
mod legacy_find_place;
mod parameters;
mod places_details;
mod places_search;

pub use context::LookupContext;
pub use field_mask::{normalize_fields, resolve_field_mask};
pub use legacy_details::LegacyPlacesDetails;
pub use legacy_find_place::LegacyFindPlace;
pub use parameters::{merge_params, resolve_language, resolve_location_bias, resolve_region};
pub use places_details::PlacesDetails;
pub use places_search::PlacesSearch;

use std::sync::Arc;

use serde_json::Value;
use wayfinder_api::{HttpTransport, Transport, TransportError};
use wayfinder_types::{ProviderStatus, Query, RequestDescriptor};

use crate::config::{Configuration, Protocol};
use crate::error::{ConfigError, LookupError};
use crate::place::Place;

/// Header carrying the API key on versioned endpoints.
pub const API_KEY_HEADER: &str = "X-Goog-Api-Key";
/// Header carrying the field mask on versioned endpoints.
pub const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

/// A configured adapter for one provider endpoint.
pub trait Lookup: Send + Sync {
    /// Human-readable name used in log lines and error messages.
    fn name(&self) -> &'static str;

    /// Configuration key under `providers`.
    fn handle(&self) -> &'static str;

    /// Names of the credential parts the lookup needs, in order.
    fn required_credential_parts(&self) -> &'static [&'static str] {
        &["key"]
    }

    fn supported_protocols(&self) -> &'static [Protocol] {
        &[Protocol::Https]
    }

    /// Builds the complete request for `query` without performing it.
    fn build_request(&self, query: &Query) -> Result<RequestDescriptor, ConfigError>;

    /// Performs the lookup.
    ///
    /// Classified provider errors and transport failures either surface as
    /// [`LookupError`] or produce an empty list, depending on configuration.
    fn fetch(&self, query: &Query) -> Result<Vec<Box<dyn Place>>, LookupError>;
}

/// Builds the lookup registered under `handle`, if any.
pub fn lookup_for(handle: &str, configuration: &Configuration, transport: Arc<dyn Transport>) -> Option<Box<dyn Lookup>> {
    let lookup: Box<dyn Lookup> = match handle {
        PlacesDetails::HANDLE => Box::new(PlacesDetails::new(configuration, transport)),
        PlacesSearch::HANDLE => Box::new(PlacesSearch::new(configuration, transport)),
        LegacyPlacesDetails::HANDLE => Box::new(LegacyPlacesDetails::new(configuration, transport)),
        LegacyFindPlace::HANDLE => Box::new(LegacyFindPlace::new(configuration, transport)),
        _ => return None,
    };
    Some(lookup)
}

/// The reqwest-backed transport configured by `configuration.transport`.
pub fn default_transport(configuration: &Configuration) -> Result<Arc<dyn Transport>, TransportError> {
    Ok(Arc::new(HttpTransport::new(&configuration.transport)?))
}

/// Handles of every built-in lookup.
pub const LOOKUP_HANDLES: &[&str] = &[
    PlacesDetails::HANDLE,
    PlacesSearch::HANDLE,
    LegacyPlacesDetails::HANDLE,
    LegacyFindPlace::HANDLE,
];

/// Strips the resource prefix the versioned API uses for place names.
pub(crate) fn place_identifier(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix("places/").unwrap_or(text)
}

/// Error status of a versioned API response: the `error` object, if any.
pub(crate) fn versioned_error_status(document: &Value) -> Option<ProviderStatus> {
    let error = wayfinder_util::read_path(document, &["error"])?;
    let status = wayfinder_util::first_str(error, &["status"]).unwrap_or("UNKNOWN");
    let message = wayfinder_util::first_str(error, &["message"]).map(str::to_string);
    Some(ProviderStatus::new(status, message))
}

/// Error status of a legacy response: a top-level `status` other than `OK`/`ZERO_RESULTS`.
pub(crate) fn legacy_error_status(document: &Value) -> Option<ProviderStatus> {
    let status = wayfinder_util::first_str(document, &["status"])?;
    if !crate::classifier::is_error_status(status) {
        return None;
    }
    let message = wayfinder_util::first_str(document, &["error_message"]).map(str::to_string);
    Some(ProviderStatus::new(status, message))
}
