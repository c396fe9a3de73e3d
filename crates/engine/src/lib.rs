//! # Wayfinder Engine
//!
//! Pluggable adapters for Google Places lookups. Each adapter turns a
//! [`Query`](wayfinder_types::Query) into a provider request, sends it
//! through a [`Transport`](wayfinder_api::Transport), classifies provider
//! errors, and exposes returned records through the uniform [`Place`]
//! accessor surface.
//!
//! ## Key Features
//!
//! - **Versioned and legacy endpoints**: Place Details and Text Search on the
//!   `v1` API, plus the legacy `details/json` and `findplacefromtext/json`
//! - **Field masks**: query, configuration and built-in defaults with
//!   all-or-nothing precedence
//! - **Error classification**: a status table for both API generations and a
//!   configurable raise-or-degrade policy
//! - **Safe accessors**: missing or malformed fields read as absent
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use wayfinder_api::{Transport, TransportError, TransportResponse};
//! use wayfinder_engine::{Configuration, Lookup, PlacesDetails, ProviderSettings};
//! use wayfinder_types::{Query, RequestDescriptor};
//!
//! struct Canned;
//!
//! impl Transport for Canned {
//!     fn execute(&self, _request: &RequestDescriptor) -> Result<TransportResponse, TransportError> {
//!         Ok(TransportResponse::new(200, r#"{"location":{"latitude":40.750504,"longitude":-73.993439}}"#))
//!     }
//! }
//!
//! let configuration = Configuration::default()
//!     .with_provider(PlacesDetails::HANDLE, ProviderSettings::default().with_api_key("api-key"));
//! let lookup = PlacesDetails::new(&configuration, Arc::new(Canned));
//!
//! let places = lookup.fetch(&Query::new("ChIJhRwB-yFawokR5Phil-QQ3zM"))?;
//! assert_eq!(places[0].latitude(), Some(40.750504));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **`config`**: configuration model and file loading
//! - **`lookup`**: the [`Lookup`] trait, shared request plumbing and the four variants
//! - **`classifier`**: status classification and the raise policy
//! - **`place`**: the [`Place`] trait and one result type per variant
//! - **`error`**: [`ConfigError`] and [`LookupError`]

pub mod classifier;
pub mod config;
pub mod error;
pub mod lookup;
pub mod place;

pub use config::{ApiKey, Configuration, Protocol, ProviderSettings, RaisePolicy, load_config, load_config_from_path};
pub use error::{ConfigError, LookupError};
pub use lookup::{LOOKUP_HANDLES, LegacyFindPlace, LegacyPlacesDetails, Lookup, PlacesDetails, PlacesSearch, default_transport, lookup_for};
pub use place::{BusinessStatus, Place, PriceLevel};
