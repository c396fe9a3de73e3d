//! Shared value types for the Wayfinder lookup adapters.
//!
//! - [`Query`]: the provider-neutral request a caller issues
//! - [`RequestDescriptor`]: the provider-specific HTTP request a lookup builds
//! - [`ProviderStatus`] and [`ErrorKind`]: the error payload and its taxonomy

mod query;
mod request;
mod status;

pub use query::{Coordinates, Query, QueryText, option_keys};
pub use request::{RequestDescriptor, RequestMethod, SENSITIVE_HEADERS, SENSITIVE_QUERY_PARAMETERS};
pub use status::{ErrorKind, ProviderStatus};
