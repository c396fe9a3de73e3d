//! Field mask normalization and precedence.

use indexmap::IndexSet;
use serde_json::Value;
use wayfinder_types::{Query, option_keys};

use crate::config::ProviderSettings;
use crate::lookup::parameters::select_tier;

/// Flattens a field selection into an ordered, de-duplicated list.
///
/// Accepts a string (comma separated), an array (nested arrays are
/// flattened) or `null`. Entries are trimmed and blanks dropped; anything
/// that is not a string is ignored.
///
/// ```rust
/// use serde_json::json;
/// use wayfinder_engine::lookup::normalize_fields;
///
/// let fields = normalize_fields(&json!(["id", ["displayName", " id "], "location,types"]));
/// assert_eq!(fields, vec!["id", "displayName", "location", "types"]);
/// ```
pub fn normalize_fields(value: &Value) -> Vec<String> {
    let mut fields = IndexSet::new();
    collect_fields(value, &mut fields);
    fields.into_iter().collect()
}

fn collect_fields(value: &Value, fields: &mut IndexSet<String>) {
    match value {
        Value::String(text) => {
            for field in text.split(',').map(str::trim).filter(|field| !field.is_empty()) {
                fields.insert(field.to_string());
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_fields(item, fields)),
        _ => {}
    }
}

/// Resolves the field mask for a request.
///
/// The first tier that *has* a value wins as a whole: the query's `fields`
/// option, then the configured `fields`, then `defaults`. An explicit `null`
/// (or empty list) in a tier selects "no mask" rather than falling through.
pub fn resolve_field_mask(query: &Query, settings: &ProviderSettings, defaults: &[&str]) -> Option<Vec<String>> {
    let selected = match select_tier(query.option(option_keys::FIELDS), settings.fields.as_ref()) {
        Some(value) => normalize_fields(value),
        None => defaults.iter().map(|field| field.to_string()).collect(),
    };
    (!selected.is_empty()).then_some(selected)
}
