//! Precedence rules for language, region, location bias and extra parameters.
//!
//! Query values always win over configured ones. Blank strings count as
//! "not given" for the scalar settings.

use serde_json::{Map, Value};
use wayfinder_types::{Query, option_keys};

use crate::config::ProviderSettings;

/// Picks the first tier that holds a key at all, even an explicit `null`.
pub(crate) fn select_tier<'a>(from_query: Option<&'a Value>, configured: Option<&'a Value>) -> Option<&'a Value> {
    from_query.or(configured)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

pub fn resolve_language<'a>(query: &'a Query, settings: &'a ProviderSettings) -> Option<&'a str> {
    non_blank(query.language()).or_else(|| non_blank(settings.language.as_deref()))
}

pub fn resolve_region<'a>(query: &'a Query, settings: &'a ProviderSettings) -> Option<&'a str> {
    non_blank(query.string_option(option_keys::REGION)).or_else(|| non_blank(settings.region.as_deref()))
}

/// Location bias from the query, else from configuration; `null` or blank means none.
pub fn resolve_location_bias<'a>(query: &'a Query, settings: &'a ProviderSettings) -> Option<&'a Value> {
    select_tier(query.option(option_keys::LOCATION_BIAS), settings.locationbias.as_ref()).filter(|value| match value {
        Value::Null => false,
        Value::String(text) => !text.trim().is_empty(),
        _ => true,
    })
}

/// Configured `params` overlaid with the query's `params` object.
///
/// Query entries replace configured entries key by key; a `null` query entry
/// removes the configured key.
pub fn merge_params(query: &Query, settings: &ProviderSettings) -> Map<String, Value> {
    let mut merged = settings.params.clone();
    if let Some(Value::Object(overrides)) = query.option(option_keys::PARAMS) {
        for (key, value) in overrides {
            if value.is_null() {
                merged.remove(key);
            } else {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    merged
}

/// Adds `extra` entries to `target` without replacing keys the lookup already set.
pub(crate) fn extend_without_override(target: &mut Map<String, Value>, extra: Map<String, Value>) {
    for (key, value) in extra {
        target.entry(key).or_insert(value);
    }
}
