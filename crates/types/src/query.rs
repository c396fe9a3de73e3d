//! Query value objects handed to every lookup.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Option keys recognized by the lookups. Any other key is carried along untouched.
pub mod option_keys {
    /// Region bias (`regionCode` / `region`).
    pub const REGION: &str = "region";
    /// Field selection; a list of paths, a comma separated string, or `null`.
    pub const FIELDS: &str = "fields";
    /// Location bias hint for text searches.
    pub const LOCATION_BIAS: &str = "locationbias";
    /// Object of extra provider parameters merged over configured ones.
    pub const PARAMS: &str = "params";
}

static COORDINATE_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+(?:\.\d+)?)\s*,\s*([+-]?\d+(?:\.\d+)?)\s*$").expect("coordinate pattern compiles"));

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true when both components are inside the valid WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// The two logical shapes a query text can take.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryText {
    /// Free text or a provider identifier.
    Text(String),
    /// A coordinate pair, i.e. a reverse lookup, with the text it was read from.
    Coordinates { position: Coordinates, input: String },
}

impl QueryText {
    /// Detects whether `input` is a `"<lat>,<lon>"` pair or free text.
    ///
    /// Pairs outside the valid coordinate ranges stay free text.
    pub fn parse(input: &str) -> Self {
        if let Some(captures) = COORDINATE_PAIR.captures(input)
            && let (Ok(latitude), Ok(longitude)) = (captures[1].parse::<f64>(), captures[2].parse::<f64>())
        {
            let position = Coordinates::new(latitude, longitude);
            if position.is_valid() {
                return Self::Coordinates {
                    position,
                    input: input.to_string(),
                };
            }
        }
        Self::Text(input.to_string())
    }

    /// Textual form used wherever a provider expects a string: the caller's input, verbatim.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Coordinates { input, .. } => input,
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Self::Coordinates { position, .. } => Some(*position),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for QueryText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

/// An immutable place query: text, optional language, and an open options map.
///
/// Options keep the distinction between an absent key and a key present with
/// `null`; lookups rely on it to let a query suppress a configured default.
///
/// ```rust
/// use serde_json::json;
/// use wayfinder_types::{Query, QueryText};
///
/// let query = Query::new("Madison Square Garden")
///     .with_language("de")
///     .with_option("fields", json!(["id", "formattedAddress"]));
/// assert_eq!(query.language(), Some("de"));
/// assert!(query.option("fields").is_some());
/// assert!(matches!(Query::new("40.75, -73.99").text(), QueryText::Coordinates { .. }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    text: QueryText,
    language: Option<String>,
    options: Map<String, Value>,
}

impl Query {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            text: QueryText::parse(text.as_ref()),
            language: None,
            options: Map::new(),
        }
    }

    /// Builds a reverse query for a coordinate pair.
    pub fn reverse(latitude: f64, longitude: f64) -> Self {
        let position = Coordinates::new(latitude, longitude);
        Self {
            text: QueryText::Coordinates {
                position,
                input: position.to_string(),
            },
            language: None,
            options: Map::new(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn text(&self) -> &QueryText {
        &self.text
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// Returns the option value when the key is present, including explicit `null`.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Returns a string option, skipping non-string and blank values.
    pub fn string_option(&self, key: &str) -> Option<&str> {
        self.option(key).and_then(Value::as_str).filter(|value| !value.trim().is_empty())
    }

    pub fn is_reverse(&self) -> bool {
        matches!(self.text, QueryText::Coordinates { .. })
    }
}
