//! Shared plumbing for every lookup: credentials, endpoint URLs and the
//! request/classify/degrade round trip.

use std::sync::Arc;
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;
use wayfinder_api::{Transport, TransportError};
use wayfinder_types::{ErrorKind, ProviderStatus, Query, RequestDescriptor};
use wayfinder_util::http::{body_preview, build_query_pairs, decode_payload};
use wayfinder_util::redact_sensitive;

use crate::classifier::{apply_policy, classify_http_status, classify_status};
use crate::config::{Configuration, Protocol, ProviderSettings, RaisePolicy};
use crate::error::{ConfigError, LookupError};
use crate::lookup::Lookup;

const PREVIEW_LIMIT: usize = 200;

/// Per-lookup state captured from [`Configuration`] at construction.
pub struct LookupContext {
    settings: ProviderSettings,
    always_raise: RaisePolicy,
    raise_on_transport_failure: bool,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for LookupContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupContext")
            .field("settings", &self.settings)
            .field("always_raise", &self.always_raise)
            .field("raise_on_transport_failure", &self.raise_on_transport_failure)
            .finish_non_exhaustive()
    }
}

impl LookupContext {
    pub fn new(configuration: &Configuration, handle: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            settings: configuration.provider(handle),
            always_raise: configuration.always_raise.clone(),
            raise_on_transport_failure: configuration.raise_on_transport_failure,
            transport,
        }
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// Credential parts in the order the lookup declares them.
    ///
    /// Fails with the names of every required part that is absent or blank.
    pub fn credentials(&self, lookup: &dyn Lookup) -> Result<Vec<&str>, ConfigError> {
        let parts = self.settings.api_key.as_ref().map(|key| key.parts()).unwrap_or_default();
        let required = lookup.required_credential_parts();
        let missing = required
            .iter()
            .enumerate()
            .filter(|(index, _)| parts.get(*index).is_none_or(|part| part.trim().is_empty()))
            .map(|(_, name)| name.to_string())
            .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials {
                lookup: lookup.name().to_string(),
                missing,
            });
        }
        Ok(parts.into_iter().take(required.len()).map(str::trim).collect())
    }

    /// The configured protocol (HTTPS when unset), checked against what the lookup supports.
    pub fn protocol(&self, lookup: &dyn Lookup) -> Result<Protocol, ConfigError> {
        let protocol = self.settings.protocol.unwrap_or(Protocol::Https);
        if !lookup.supported_protocols().contains(&protocol) {
            return Err(ConfigError::UnsupportedProtocol {
                lookup: lookup.name().to_string(),
                protocol,
                supported: lookup.supported_protocols().to_vec(),
            });
        }
        Ok(protocol)
    }

    /// Builds `<protocol>://<host><path>` with `parameters` as the query string.
    pub fn endpoint(&self, lookup: &dyn Lookup, host: &str, path: &str, parameters: &Map<String, Value>) -> Result<Url, ConfigError> {
        let protocol = self.protocol(lookup)?;
        let mut url = Url::parse(&format!("{protocol}://{host}{path}")).map_err(|error| ConfigError::InvalidEndpoint {
            lookup: lookup.name().to_string(),
            message: error.to_string(),
        })?;

        let pairs = build_query_pairs(parameters);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Sends `request` and returns the decoded document when it holds results.
    ///
    /// `Ok(None)` means "return an empty result": a classified provider error
    /// the policy does not raise, or a transport failure that is not raised.
    /// `read_status` extracts the provider's error status from a decoded
    /// document, returning `None` when the document reports success.
    pub fn round_trip(
        &self,
        lookup: &dyn Lookup,
        request: &RequestDescriptor,
        read_status: fn(&Value) -> Option<ProviderStatus>,
    ) -> Result<Option<Value>, LookupError> {
        let name = lookup.name();
        let start = Instant::now();
        debug!(
            lookup = name,
            request = %request,
            headers = ?request.headers.keys().collect::<Vec<_>>(),
            "sending lookup request"
        );

        let response = match self.transport.execute(request) {
            Ok(response) => response,
            Err(error) => return self.transport_failure(name, error),
        };
        debug!(
            lookup = name,
            status = response.status,
            duration_ms = start.elapsed().as_millis(),
            "lookup response received"
        );

        let document = match decode_payload(&response.body, Some(response.status)) {
            Ok(document) => document,
            Err(error) if !response.is_success() => {
                let status = http_status(response.status, &redact_sensitive(error.body_preview()));
                apply_policy(name, classify_http_status(response.status), &status, &self.always_raise)?;
                return Ok(None);
            }
            Err(error) => return self.transport_failure(name, TransportError::Decode(error)),
        };

        if let Some(status) = read_status(&document) {
            apply_policy(name, classify_status(&status.status), &status, &self.always_raise)?;
            return Ok(None);
        }
        if !response.is_success() {
            let preview = redact_sensitive(&body_preview(&response.body, PREVIEW_LIMIT));
            let status = http_status(response.status, &preview);
            apply_policy(name, classify_http_status(response.status), &status, &self.always_raise)?;
            return Ok(None);
        }
        Ok(Some(document))
    }

    /// Handles a reverse (coordinate) query sent to a lookup that cannot answer one.
    ///
    /// Classified as an invalid argument without contacting the provider.
    pub fn reject_reverse(&self, lookup: &dyn Lookup, query: &Query) -> Result<(), LookupError> {
        self.reject(lookup, format!("reverse lookups are not supported (query: {})", query.text()))
    }

    /// Handles a place identifier that cannot be placed in the endpoint path.
    pub fn reject_identifier(&self, lookup: &dyn Lookup, identifier: &str) -> Result<(), LookupError> {
        self.reject(lookup, format!("'{identifier}' is not a usable place identifier"))
    }

    fn reject(&self, lookup: &dyn Lookup, message: String) -> Result<(), LookupError> {
        let status = ProviderStatus::new("INVALID_ARGUMENT", Some(message));
        apply_policy(lookup.name(), ErrorKind::InvalidArgument, &status, &self.always_raise)
    }

    fn transport_failure(&self, lookup: &str, error: TransportError) -> Result<Option<Value>, LookupError> {
        if self.raise_on_transport_failure {
            return Err(LookupError::transport(lookup, error));
        }
        warn!(lookup, error = %error, "{lookup}: transport failure; returning no results");
        Ok(None)
    }
}

fn http_status(code: u16, preview: &str) -> ProviderStatus {
    let message = (!preview.is_empty()).then(|| preview.to_string());
    ProviderStatus::new(format!("HTTP_{code}"), message)
}
