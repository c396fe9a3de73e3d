//! Safe, never-failing reads over untyped JSON documents.
//!
//! Every lookup result accessor goes through these helpers, so a missing key,
//! a type mismatch, or an explicit `null` at any depth simply yields `None`.

use serde_json::Value;

/// Walks `root` along `path`, one key (or array index) per segment.
///
/// Returns `None` when any segment is missing, when a segment addresses the
/// wrong container type, or when the final value is `null`.
///
/// ```rust
/// use serde_json::json;
/// use wayfinder_util::read_path;
///
/// let place = json!({ "location": { "latitude": 40.75 }, "photos": [{ "name": "p1" }] });
/// assert_eq!(read_path(&place, &["location", "latitude"]), Some(&json!(40.75)));
/// assert_eq!(read_path(&place, &["photos", "0", "name"]), Some(&json!("p1")));
/// assert_eq!(read_path(&place, &["location", "longitude"]), None);
/// assert_eq!(read_path(&place, &["location", "latitude", "deeper"]), None);
/// ```
pub fn read_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = root;
    for segment in path {
        current = match current {
            Value::Object(map) => map.get(*segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    (!current.is_null()).then_some(current)
}

/// [`read_path`] over a dotted path such as `displayName.text`.
///
/// An empty path or `.` addresses the root itself.
pub fn read_dotted<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() || path == "." {
        return (!root.is_null()).then_some(root);
    }
    let segments = path.split('.').filter(|segment| !segment.is_empty()).collect::<Vec<_>>();
    read_path(root, &segments)
}

/// First dotted path in `candidates` that resolves to a value.
pub fn first_present<'a>(root: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates.iter().find_map(|path| read_dotted(root, path))
}

/// First candidate path holding a string.
pub fn first_str<'a>(root: &'a Value, candidates: &[&str]) -> Option<&'a str> {
    candidates.iter().find_map(|path| read_dotted(root, path).and_then(Value::as_str))
}

/// First candidate path holding a number.
pub fn first_f64(root: &Value, candidates: &[&str]) -> Option<f64> {
    candidates.iter().find_map(|path| read_dotted(root, path).and_then(Value::as_f64))
}

/// First candidate path holding a non-negative integer.
pub fn first_u64(root: &Value, candidates: &[&str]) -> Option<u64> {
    candidates.iter().find_map(|path| read_dotted(root, path).and_then(Value::as_u64))
}

/// First candidate path holding a boolean.
pub fn first_bool(root: &Value, candidates: &[&str]) -> Option<bool> {
    candidates.iter().find_map(|path| read_dotted(root, path).and_then(Value::as_bool))
}

/// Items of the first candidate path holding an array; empty when none does.
pub fn first_array<'a>(root: &'a Value, candidates: &[&str]) -> &'a [Value] {
    candidates
        .iter()
        .find_map(|path| read_dotted(root, path).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or_default()
}
