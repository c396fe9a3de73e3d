//! Uniform read access to provider place records.
//!
//! Every accessor on [`Place`] is a lazy read over the raw record through
//! the variant's [`PlaceSchema`]: missing keys, `null`s and type mismatches
//! at any depth read as absent, never as a failure.

mod results;
mod schema;

pub use results::{LegacyDetailsResult, LegacyFindPlaceResult, PlacesDetailsResult, PlacesSearchResult};
pub use schema::{LEGACY_DETAILS, LEGACY_FIND_PLACE, PlaceSchema, VERSIONED_DETAILS, VERSIONED_SEARCH};

use std::fmt;

use serde_json::Value;
use wayfinder_types::Coordinates;
use wayfinder_util::{first_array, first_bool, first_f64, first_present, first_str, first_u64};

/// Price tier, normalized across API generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriceLevel {
    Free,
    Inexpensive,
    Moderate,
    Expensive,
    VeryExpensive,
}

impl PriceLevel {
    /// Reads `PRICE_LEVEL_*` strings and legacy `0..=4` integers.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_u64().and_then(Self::from_tier),
            Value::String(text) => match text.trim().to_ascii_uppercase().as_str() {
                "PRICE_LEVEL_FREE" => Some(Self::Free),
                "PRICE_LEVEL_INEXPENSIVE" => Some(Self::Inexpensive),
                "PRICE_LEVEL_MODERATE" => Some(Self::Moderate),
                "PRICE_LEVEL_EXPENSIVE" => Some(Self::Expensive),
                "PRICE_LEVEL_VERY_EXPENSIVE" => Some(Self::VeryExpensive),
                other => other.parse::<u64>().ok().and_then(Self::from_tier),
            },
            _ => None,
        }
    }

    pub fn from_tier(tier: u64) -> Option<Self> {
        match tier {
            0 => Some(Self::Free),
            1 => Some(Self::Inexpensive),
            2 => Some(Self::Moderate),
            3 => Some(Self::Expensive),
            4 => Some(Self::VeryExpensive),
            _ => None,
        }
    }

    /// Legacy numeric tier, `0` (free) through `4`.
    pub fn tier(&self) -> u8 {
        *self as u8
    }
}

/// Operational status of a place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BusinessStatus {
    Operational,
    ClosedTemporarily,
    ClosedPermanently,
    /// A status this crate does not know, preserved verbatim.
    Other(String),
}

impl BusinessStatus {
    pub fn parse(status: &str) -> Self {
        match status.trim() {
            "OPERATIONAL" => Self::Operational,
            "CLOSED_TEMPORARILY" => Self::ClosedTemporarily,
            "CLOSED_PERMANENTLY" => Self::ClosedPermanently,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Operational => "OPERATIONAL",
            Self::ClosedTemporarily => "CLOSED_TEMPORARILY",
            Self::ClosedPermanently => "CLOSED_PERMANENTLY",
            Self::Other(status) => status,
        }
    }
}

impl fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One place record returned by a lookup.
///
/// Implementors only supply [`raw`](Place::raw) and [`schema`](Place::schema);
/// every other accessor is derived from those two.
pub trait Place: fmt::Debug + Send + Sync {
    /// The unmodified provider record.
    fn raw(&self) -> &Value;

    fn schema(&self) -> &'static PlaceSchema;

    /// Both coordinates, or `None` when either is missing.
    fn coordinates(&self) -> Option<Coordinates> {
        let schema = self.schema();
        let latitude = first_f64(self.raw(), schema.latitude)?;
        let longitude = first_f64(self.raw(), schema.longitude)?;
        Some(Coordinates::new(latitude, longitude))
    }

    fn latitude(&self) -> Option<f64> {
        first_f64(self.raw(), self.schema().latitude)
    }

    fn longitude(&self) -> Option<f64> {
        first_f64(self.raw(), self.schema().longitude)
    }

    fn formatted_address(&self) -> Option<&str> {
        first_str(self.raw(), self.schema().formatted_address)
    }

    /// Alias for [`formatted_address`](Place::formatted_address).
    fn address(&self) -> Option<&str> {
        self.formatted_address()
    }

    fn vicinity(&self) -> Option<&str> {
        first_str(self.raw(), self.schema().vicinity)
    }

    fn name(&self) -> Option<&str> {
        first_str(self.raw(), self.schema().name)
    }

    /// Stable provider identifier.
    fn place_id(&self) -> Option<&str> {
        first_str(self.raw(), self.schema().place_id)
    }

    fn types(&self) -> Vec<&str> {
        first_array(self.raw(), self.schema().types).iter().filter_map(Value::as_str).collect()
    }

    fn website(&self) -> Option<&str> {
        first_str(self.raw(), self.schema().website)
    }

    fn maps_url(&self) -> Option<&str> {
        first_str(self.raw(), self.schema().maps_url)
    }

    fn rating(&self) -> Option<f64> {
        first_f64(self.raw(), self.schema().rating)
    }

    fn rating_count(&self) -> Option<u64> {
        first_u64(self.raw(), self.schema().rating_count)
    }

    fn price_level(&self) -> Option<PriceLevel> {
        first_present(self.raw(), self.schema().price_level).and_then(PriceLevel::from_value)
    }

    fn business_status(&self) -> Option<BusinessStatus> {
        first_str(self.raw(), self.schema().business_status).map(BusinessStatus::parse)
    }

    fn permanently_closed(&self) -> bool {
        self.business_status() == Some(BusinessStatus::ClosedPermanently)
    }

    fn opening_periods(&self) -> &[Value] {
        first_array(self.raw(), self.schema().opening_periods)
    }

    fn open_now(&self) -> Option<bool> {
        first_bool(self.raw(), self.schema().open_now)
    }

    fn photos(&self) -> &[Value] {
        first_array(self.raw(), self.schema().photos)
    }

    fn phone_number(&self) -> Option<&str> {
        first_str(self.raw(), self.schema().phone_number)
    }

    fn reviews(&self) -> &[Value] {
        first_array(self.raw(), self.schema().reviews)
    }

    fn address_components(&self) -> &[Value] {
        first_array(self.raw(), self.schema().address_components)
    }

    /// Address components whose `types` include `kind`, in record order.
    fn address_components_of_type(&self, kind: &str) -> Vec<&Value> {
        let schema = self.schema();
        self.address_components()
            .iter()
            .filter(|component| {
                first_array(component, schema.component_types)
                    .iter()
                    .any(|component_type| component_type.as_str() == Some(kind))
            })
            .collect()
    }

    /// Short text of the first component of type `kind`.
    fn component_short_text(&self, kind: &str) -> Option<&str> {
        let component = self.address_components_of_type(kind).into_iter().next()?;
        first_str(component, self.schema().component_short_text)
    }

    /// Long text of the first component of type `kind`.
    fn component_long_text(&self, kind: &str) -> Option<&str> {
        let component = self.address_components_of_type(kind).into_iter().next()?;
        first_str(component, self.schema().component_long_text)
    }

    fn city(&self) -> Option<&str> {
        self.component_long_text("locality")
    }

    fn state(&self) -> Option<&str> {
        self.component_long_text("administrative_area_level_1")
    }

    fn state_code(&self) -> Option<&str> {
        self.component_short_text("administrative_area_level_1")
    }

    fn country(&self) -> Option<&str> {
        self.component_long_text("country")
    }

    fn country_code(&self) -> Option<&str> {
        self.component_short_text("country")
    }

    fn postal_code(&self) -> Option<&str> {
        self.component_long_text("postal_code")
    }

    fn neighborhood(&self) -> Option<&str> {
        self.component_long_text("neighborhood")
    }

    fn street_number(&self) -> Option<&str> {
        self.component_short_text("street_number")
    }

    fn route(&self) -> Option<&str> {
        self.component_long_text("route")
    }

    /// `"<number> <route>"`; either part may be missing, `None` when both are.
    fn street_address(&self) -> Option<String> {
        match (self.street_number(), self.route()) {
            (Some(number), Some(route)) => Some(format!("{number} {route}")),
            (Some(part), None) | (None, Some(part)) => Some(part.to_string()),
            (None, None) => None,
        }
    }
}
