//! Fully formed request descriptors produced by lookups and consumed by transports.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Header names whose values are credentials and must never be logged.
pub const SENSITIVE_HEADERS: &[&str] = &["x-goog-api-key", "authorization"];
/// Query parameter names whose values are credentials and must never be logged.
pub const SENSITIVE_QUERY_PARAMETERS: &[&str] = &["key"];

const REDACTED: &str = "<redacted>";

/// HTTP methods used by the lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Post,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method, URL, headers and optional JSON body for one provider call.
///
/// Built by a lookup without side effects, so equal queries under equal
/// configuration yield equal descriptors.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: RequestMethod,
    pub url: Url,
    pub headers: IndexMap<String, String>,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn get(url: Url) -> Self {
        Self {
            method: RequestMethod::Get,
            url,
            headers: IndexMap::new(),
            body: None,
        }
    }

    pub fn post(url: Url, body: Value) -> Self {
        Self {
            method: RequestMethod::Post,
            url,
            headers: IndexMap::new(),
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// First decoded value of a query-string parameter.
    pub fn query_parameter(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Serialized JSON body, if any.
    pub fn body_text(&self) -> Option<String> {
        self.body.as_ref().map(Value::to_string)
    }

    /// URL with credential query parameters replaced by a placeholder.
    pub fn redacted_url(&self) -> String {
        if self.url.query().is_none() {
            return self.url.to_string();
        }
        let pairs = self
            .url
            .query_pairs()
            .map(|(key, value)| {
                let value = if is_sensitive(SENSITIVE_QUERY_PARAMETERS, &key) {
                    REDACTED.to_string()
                } else {
                    value.into_owned()
                };
                (key.into_owned(), value)
            })
            .collect::<Vec<_>>();
        let mut url = self.url.clone();
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url.to_string()
    }

    /// Headers with credential values replaced by a placeholder.
    pub fn redacted_headers(&self) -> IndexMap<String, String> {
        self.headers
            .iter()
            .map(|(name, value)| {
                let value = if is_sensitive(SENSITIVE_HEADERS, name) {
                    REDACTED.to_string()
                } else {
                    value.clone()
                };
                (name.clone(), value)
            })
            .collect()
    }

    /// Key suitable for memoizing responses: method, redacted URL and body.
    ///
    /// Headers are excluded so credentials never end up in a cache index.
    pub fn cache_key(&self) -> String {
        match self.body_text() {
            Some(body) => format!("{} {} {}", self.method, self.redacted_url(), body),
            None => format!("{} {}", self.method, self.redacted_url()),
        }
    }
}

impl fmt::Display for RequestDescriptor {
    /// Log-safe rendering; credentials are redacted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.redacted_url())
    }
}

fn is_sensitive(names: &[&str], candidate: &str) -> bool {
    names.iter().any(|name| name.eq_ignore_ascii_case(candidate))
}
