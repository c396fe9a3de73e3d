//! Provider status payloads and the closed error taxonomy they classify into.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of classified provider error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Rate or quota exhaustion.
    QuotaExceeded,
    /// Credential rejected or insufficient scope.
    PermissionDenied,
    /// Malformed or unsupported query.
    InvalidArgument,
    /// Any other provider-reported status.
    Unclassified,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 4] = [Self::QuotaExceeded, Self::PermissionDenied, Self::InvalidArgument, Self::Unclassified];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuotaExceeded => "quota_exceeded",
            Self::PermissionDenied => "permission_denied",
            Self::InvalidArgument => "invalid_argument",
            Self::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded error portion of a provider response, `{status, message}`.
///
/// The v1 `error` object deserializes into this directly; its numeric `code`
/// and `details` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ProviderStatus {
    pub fn new(status: impl Into<String>, message: Option<String>) -> Self {
        Self {
            status: status.into(),
            message,
        }
    }

    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}
