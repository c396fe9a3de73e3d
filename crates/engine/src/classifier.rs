//! Maps provider status codes onto [`ErrorKind`] and applies the raise policy.
//!
//! The table covers both Places API generations: the versioned API reports
//! canonical RPC statuses (`RESOURCE_EXHAUSTED`, ...) inside an `error`
//! object, while the legacy web service reports `OVER_QUERY_LIMIT` and
//! friends in a top-level `status` field.

use tracing::warn;
use wayfinder_types::{ErrorKind, ProviderStatus};

use crate::config::RaisePolicy;
use crate::error::LookupError;

static STATUS_TABLE: &[(&str, ErrorKind)] = &[
    ("RESOURCE_EXHAUSTED", ErrorKind::QuotaExceeded),
    ("OVER_QUERY_LIMIT", ErrorKind::QuotaExceeded),
    ("OVER_DAILY_LIMIT", ErrorKind::QuotaExceeded),
    ("PERMISSION_DENIED", ErrorKind::PermissionDenied),
    ("UNAUTHENTICATED", ErrorKind::PermissionDenied),
    ("REQUEST_DENIED", ErrorKind::PermissionDenied),
    ("INVALID_ARGUMENT", ErrorKind::InvalidArgument),
    ("INVALID_REQUEST", ErrorKind::InvalidArgument),
];

/// Legacy statuses that report success.
const SUCCESS_STATUSES: &[&str] = &["OK", "ZERO_RESULTS"];

/// Classifies a provider status string. Unknown statuses are [`ErrorKind::Unclassified`].
pub fn classify_status(status: &str) -> ErrorKind {
    let status = status.trim();
    STATUS_TABLE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(status))
        .map(|(_, kind)| *kind)
        .unwrap_or(ErrorKind::Unclassified)
}

/// Whether a legacy `status` field denotes an error.
pub fn is_error_status(status: &str) -> bool {
    let status = status.trim();
    !SUCCESS_STATUSES.iter().any(|success| success.eq_ignore_ascii_case(status))
}

/// Classifies a non-2xx HTTP response that carried no status object.
pub fn classify_http_status(code: u16) -> ErrorKind {
    match code {
        402 | 429 => ErrorKind::QuotaExceeded,
        401 | 403 => ErrorKind::PermissionDenied,
        400 => ErrorKind::InvalidArgument,
        _ => ErrorKind::Unclassified,
    }
}

/// Raises `status` when the policy names its kind, otherwise logs it.
///
/// `Ok(())` tells the caller to return an empty result.
pub fn apply_policy(lookup: &str, kind: ErrorKind, status: &ProviderStatus, policy: &RaisePolicy) -> Result<(), LookupError> {
    if policy.raises(kind) {
        return Err(LookupError::classified(kind, lookup, status));
    }

    let message = status.message_or_empty();
    match kind {
        ErrorKind::QuotaExceeded => warn!(lookup, status = %status.status, "{lookup} API error: quota exceeded"),
        ErrorKind::PermissionDenied => warn!(lookup, status = %status.status, detail = message, "{lookup} API error: permission denied"),
        ErrorKind::InvalidArgument => warn!(lookup, status = %status.status, detail = message, "{lookup} API error: invalid argument"),
        ErrorKind::Unclassified => warn!(lookup, status = %status.status, detail = message, "{lookup} API error: unexpected status"),
    }
    Ok(())
}
