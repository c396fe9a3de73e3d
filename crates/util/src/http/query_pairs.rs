use serde_json::{Map, Value};

/// Flattens a JSON parameter map into query-string pairs.
///
/// Arrays repeat the key once per item, `null` entries are dropped, strings
/// are emitted raw and every other value uses its JSON rendering.
pub fn build_query_pairs(parameters: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in parameters {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items.iter().filter(|item| !item.is_null()) {
                    pairs.push((key.clone(), query_value_to_string(item)));
                }
            }
            other => pairs.push((key.clone(), query_value_to_string(other))),
        }
    }
    pairs
}

/// Renders a scalar JSON value the way it should appear in a query string.
pub fn query_value_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
