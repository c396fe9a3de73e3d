//! Helpers shared by the Wayfinder crates: response decoding, URL building,
//! safe JSON reads and log redaction.

pub mod http;
mod json_path;
mod path_processing;

use once_cell::sync::Lazy;
use regex::Regex;

pub use json_path::{first_array, first_bool, first_f64, first_present, first_str, first_u64, read_dotted, read_path};
pub use path_processing::expand_tilde;

static SENSITIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(x-goog-api-key[\x22']?\s*[:=]\s*[\x22']?)([^\s\x22',}]+)",
        r"(?i)([?&]key=)([^&\s\x22']+)",
        r"(?i)(authorization:\s*)(\S+)",
        r"(?i)([A-Z0-9_]*?(?:KEY|TOKEN|SECRET)=)(\S+)",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Redacts values that look like credentials in a string.
///
/// ```rust
/// use wayfinder_util::redact_sensitive;
///
/// let line = "GET https://maps.example.com/json?input=x&key=AIzaSecret";
/// assert_eq!(redact_sensitive(line), "GET https://maps.example.com/json?input=x&key=<redacted>");
/// ```
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for pattern in SENSITIVE_PATTERNS.iter() {
        redacted = pattern
            .replace_all(&redacted, |caps: &regex::Captures| {
                let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{prefix}<redacted>")
            })
            .to_string();
    }
    redacted
}
