//! Error types surfaced by the lookups.

use thiserror::Error;
use wayfinder_api::TransportError;
use wayfinder_types::{ErrorKind, ProviderStatus};

use crate::config::Protocol;

/// A request that can never succeed: the lookup is misconfigured, or the
/// query names something the endpoint cannot address.
///
/// Raised while building a request, before any transport call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{lookup}: missing credential part(s): {}", .missing.join(", "))]
    MissingCredentials { lookup: String, missing: Vec<String> },

    #[error("{lookup}: protocol '{protocol}' is not supported; use {}", supported_list(.supported))]
    UnsupportedProtocol {
        lookup: String,
        protocol: Protocol,
        supported: Vec<Protocol>,
    },

    #[error("{lookup}: could not build endpoint URL: {message}")]
    InvalidEndpoint { lookup: String, message: String },

    #[error("{lookup}: '{identifier}' is not a usable place identifier")]
    InvalidIdentifier { lookup: String, identifier: String },
}

fn supported_list(protocols: &[Protocol]) -> String {
    protocols.iter().map(Protocol::as_str).collect::<Vec<_>>().join(" or ")
}

/// Failure of a lookup call.
///
/// Classified provider errors only surface here when the configured raise
/// policy names their kind; otherwise the lookup returns an empty result.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{lookup} API error: quota exceeded{}", message_suffix(.message))]
    QuotaExceeded { lookup: String, message: String },

    #[error("{lookup} API error: permission denied{}", message_suffix(.message))]
    PermissionDenied { lookup: String, message: String },

    #[error("{lookup} API error: invalid argument{}", message_suffix(.message))]
    InvalidArgument { lookup: String, message: String },

    #[error("{lookup} API error: {status}{}", message_suffix(.message))]
    Unclassified { lookup: String, status: String, message: String },

    #[error("{lookup}: transport failure: {source}")]
    Transport {
        lookup: String,
        #[source]
        source: TransportError,
    },
}

fn message_suffix(message: &str) -> String {
    if message.is_empty() { String::new() } else { format!(" ({message})") }
}

impl LookupError {
    /// Builds the error variant for an already classified provider status.
    pub fn classified(kind: ErrorKind, lookup: impl Into<String>, status: &ProviderStatus) -> Self {
        let lookup = lookup.into();
        let message = status.message_or_empty().to_string();
        match kind {
            ErrorKind::QuotaExceeded => Self::QuotaExceeded { lookup, message },
            ErrorKind::PermissionDenied => Self::PermissionDenied { lookup, message },
            ErrorKind::InvalidArgument => Self::InvalidArgument { lookup, message },
            ErrorKind::Unclassified => Self::Unclassified {
                lookup,
                status: status.status.clone(),
                message,
            },
        }
    }

    pub fn transport(lookup: impl Into<String>, source: TransportError) -> Self {
        Self::Transport {
            lookup: lookup.into(),
            source,
        }
    }

    /// The classified kind, for provider-reported errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::QuotaExceeded { .. } => Some(ErrorKind::QuotaExceeded),
            Self::PermissionDenied { .. } => Some(ErrorKind::PermissionDenied),
            Self::InvalidArgument { .. } => Some(ErrorKind::InvalidArgument),
            Self::Unclassified { .. } => Some(ErrorKind::Unclassified),
            Self::Config(_) | Self::Transport { .. } => None,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
