//! Wayfinder HTTP transport.
//!
//! Lookups never talk to the network themselves: they build a
//! [`RequestDescriptor`] and hand it to a [`Transport`]. This crate defines
//! that boundary and ships [`HttpTransport`], a reqwest-backed implementation
//! that:
//!
//! - applies a request timeout and a consistent User-Agent
//! - refuses plain HTTP for anything but local development hosts
//! - sends JSON bodies for POST requests
//! - returns the raw status and body without interpreting either
//!
//! # Example
//!
//! ```ignore
//! use wayfinder_api::{HttpTransport, Transport, TransportSettings};
//! use wayfinder_types::RequestDescriptor;
//!
//! let transport = HttpTransport::new(&TransportSettings::default())?;
//! let request = RequestDescriptor::get("https://places.googleapis.com/v1/places/abc".parse()?);
//! let response = transport.execute(&request)?;
//! println!("status: {}", response.status);
//! ```

use std::time::{Duration, Instant};

use reqwest::{Client, Method, header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::runtime::Runtime;
use tracing::{debug, warn};
use url::Url;
use wayfinder_types::{RequestDescriptor, RequestMethod};
use wayfinder_util::http::JsonParseError;

/// Hostnames allowed to use plain HTTP.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Status code and undecoded body of a provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// No usable response could be obtained from the network layer.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("refusing to send request to '{url}': {reason}")]
    InsecureUrl { url: String, reason: String },

    #[error("could not build the HTTP client: {message}")]
    Client { message: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("failed to read response body: {message}")]
    Body { message: String },

    #[error(transparent)]
    Decode(#[from] JsonParseError),
}

impl TransportError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    pub fn insecure_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InsecureUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Performs the network call for a fully formed request.
///
/// Implementations may be shared between threads and called concurrently.
/// They own timeouts and connection handling; the lookups never retry.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError>;
}

/// Settings for [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportSettings {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Overrides the default `wayfinder/<version>` User-Agent.
    pub user_agent: Option<String>,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

/// reqwest-backed [`Transport`] with a synchronous facade.
///
/// The transport owns a Tokio runtime and blocks on it for each call, so it
/// must not be invoked from inside an async context.
#[derive(Debug)]
pub struct HttpTransport {
    http: Client,
    runtime: Runtime,
    user_agent: String,
}

impl HttpTransport {
    pub fn new(settings: &TransportSettings) -> Result<Self, TransportError> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|error| TransportError::Client { message: error.to_string() })?;
        let runtime = Runtime::new().map_err(|error| TransportError::Client {
            message: format!("runtime init failed: {error}"),
        })?;
        let user_agent = settings
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("wayfinder/{}", env!("CARGO_PKG_VERSION")));

        Ok(Self { http, runtime, user_agent })
    }

    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError> {
        validate_request_url(&request.url)?;
        let start = Instant::now();
        let method = match request.method {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
        };

        let mut builder = self
            .http
            .request(method, request.url.clone())
            .header(header::USER_AGENT, &self.user_agent);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|error| {
            warn!(
                request = %request,
                duration_ms = start.elapsed().as_millis(),
                error = %wayfinder_util::redact_sensitive(&error.to_string()),
                "http request failed"
            );
            TransportError::network(wayfinder_util::redact_sensitive(&error.to_string()))
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| TransportError::Body { message: error.to_string() })?;

        debug!(
            request = %request,
            status,
            body_len = body.len(),
            duration_ms = start.elapsed().as_millis(),
            "http request completed"
        );
        Ok(TransportResponse { status, body })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError> {
        self.runtime.block_on(self.send(request))
    }
}

/// Validate that a request URL is acceptable to send.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
pub fn validate_request_url(url: &Url) -> Result<(), TransportError> {
    let host_name = url
        .host_str()
        .ok_or_else(|| TransportError::insecure_url(url.as_str(), "URL must include a host"))?;

    if LOCALHOST_DOMAINS.iter().any(|&allowed| host_name.eq_ignore_ascii_case(allowed)) {
        return Ok(());
    }

    if url.scheme() != "https" {
        return Err(TransportError::insecure_url(
            wayfinder_util::redact_sensitive(url.as_str()),
            format!("https is required for non-localhost hosts; got '{}://'", url.scheme()),
        ));
    }

    Ok(())
}
