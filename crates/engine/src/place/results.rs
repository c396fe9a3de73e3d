//! One result type per lookup; each pairs a raw record with its schema.

use serde_json::Value;

use crate::place::Place;
use crate::place::schema::{LEGACY_DETAILS, LEGACY_FIND_PLACE, PlaceSchema, VERSIONED_DETAILS, VERSIONED_SEARCH};

/// A place document returned by the versioned Place Details endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesDetailsResult {
    data: Value,
}

impl PlacesDetailsResult {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Value {
        self.data
    }
}

impl Place for PlacesDetailsResult {
    fn raw(&self) -> &Value {
        &self.data
    }

    fn schema(&self) -> &'static PlaceSchema {
        &VERSIONED_DETAILS
    }
}

/// One element of the versioned Text Search `places` array.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesSearchResult {
    data: Value,
}

impl PlacesSearchResult {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Value {
        self.data
    }
}

impl Place for PlacesSearchResult {
    fn raw(&self) -> &Value {
        &self.data
    }

    fn schema(&self) -> &'static PlaceSchema {
        &VERSIONED_SEARCH
    }
}

/// The `result` object of a legacy details response.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyDetailsResult {
    data: Value,
}

impl LegacyDetailsResult {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Value {
        self.data
    }
}

impl Place for LegacyDetailsResult {
    fn raw(&self) -> &Value {
        &self.data
    }

    fn schema(&self) -> &'static PlaceSchema {
        &LEGACY_DETAILS
    }
}

/// One element of a legacy Find Place `candidates` array.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyFindPlaceResult {
    data: Value,
}

impl LegacyFindPlaceResult {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Value {
        self.data
    }
}

impl Place for LegacyFindPlaceResult {
    fn raw(&self) -> &Value {
        &self.data
    }

    fn schema(&self) -> &'static PlaceSchema {
        &LEGACY_FIND_PLACE
    }
}
