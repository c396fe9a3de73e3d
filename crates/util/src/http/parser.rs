//! Response body decoding.

use serde_json::Value;
use thiserror::Error;

const PREVIEW_LIMIT: usize = 200;

/// Decode a provider response body into a JSON document.
///
/// Any parse failure is decorated with the HTTP status (when known) and a
/// whitespace-collapsed preview of the body so truncated or HTML error pages
/// are easy to recognize in logs.
///
/// # Example
/// ```rust
/// use wayfinder_util::http::decode_payload;
///
/// let document = decode_payload(r#"{"places": []}"#, Some(200)).unwrap();
/// assert!(document["places"].is_array());
///
/// let error = decode_payload("<html>busy</html>", Some(503)).unwrap_err();
/// assert_eq!(error.status(), Some(503));
/// assert!(error.body_preview().contains("busy"));
/// ```
pub fn decode_payload(text: &str, status: Option<u16>) -> Result<Value, JsonParseError> {
    serde_json::from_str::<Value>(text).map_err(|error| JsonParseError::new(status, error, body_preview(text, PREVIEW_LIMIT)))
}

/// Collapse whitespace and truncate `text` to roughly `limit` characters.
pub fn body_preview(text: &str, limit: usize) -> String {
    if text.trim().is_empty() {
        return "<empty>".to_string();
    }

    let mut preview = String::new();
    for (count, ch) in text.chars().enumerate() {
        if count >= limit {
            preview.push_str("...");
            break;
        }
        match ch {
            '\n' | '\r' | '\t' => {
                if !preview.ends_with(' ') {
                    preview.push(' ');
                }
            }
            _ => preview.push(ch),
        }
    }

    preview.trim().to_string()
}

/// A response body that could not be decoded as JSON.
#[derive(Debug, Error)]
#[error("failed to decode response ({}): {source}. body preview: {body_preview}", status_note(.status))]
pub struct JsonParseError {
    status: Option<u16>,
    #[source]
    source: serde_json::Error,
    body_preview: String,
}

fn status_note(status: &Option<u16>) -> String {
    status.map(|code| format!("status {code}")).unwrap_or_else(|| "unknown status".to_string())
}

impl JsonParseError {
    pub fn new(status: Option<u16>, source: serde_json::Error, body_preview: String) -> Self {
        Self {
            status,
            source,
            body_preview,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn body_preview(&self) -> &str {
        &self.body_preview
    }
}
