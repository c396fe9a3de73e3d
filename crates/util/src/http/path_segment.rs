use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except RFC 3986 unreserved bytes (`A-Z a-z 0-9 - . _ ~`).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes a value for use as a single URL path segment.
///
/// Unreserved bytes are emitted as-is; everything else, including `/`, is
/// percent-encoded with uppercase hex so the value can never escape its
/// segment.
///
/// # Examples
/// ```rust
/// use wayfinder_util::http::encode_path_segment;
///
/// assert_eq!(encode_path_segment("ChIJhRwB-yFawokR5Phil-QQ3zM"), "ChIJhRwB-yFawokR5Phil-QQ3zM");
/// assert_eq!(encode_path_segment("team/app name"), "team%2Fapp%20name");
/// ```
pub fn encode_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Whether `value` is a `.` or `..` path segment.
///
/// URL parsers collapse these (and their `%2E` spellings) while normalizing the
/// path, so no encoding keeps them inside their segment; callers must refuse them.
pub fn is_dot_segment(value: &str) -> bool {
    matches!(value, "." | "..")
}

/// Replaces `{key}` placeholders in `template` with encoded segment values.
///
/// Placeholders without a matching key are left untouched.
pub fn build_path(template: &str, segments: &[(&str, &str)]) -> String {
    let mut path = template.to_string();
    for (key, value) in segments {
        path = path.replace(&format!("{{{key}}}"), &encode_path_segment(value));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_path_preserves_unreserved_identifier_bytes() {
        let path = build_path("/v1/places/{place_id}", &[("place_id", "ChIJhRwB-yFawokR5Phil-QQ3zM")]);
        assert_eq!(path, "/v1/places/ChIJhRwB-yFawokR5Phil-QQ3zM");
    }

    #[test]
    fn build_path_encodes_reserved_bytes() {
        let path = build_path("/v1/places/{place_id}", &[("place_id", "a/b c?d#e")]);
        assert_eq!(path, "/v1/places/a%2Fb%20c%3Fd%23e");
    }

    #[test]
    fn build_path_encodes_multibyte_characters() {
        assert_eq!(encode_path_segment("café"), "caf%C3%A9");
    }

    #[test]
    fn dot_segments_are_detected() {
        assert!(is_dot_segment("."));
        assert!(is_dot_segment(".."));
        assert!(!is_dot_segment("..."));
        assert!(!is_dot_segment(".hidden"));
        assert_eq!(encode_path_segment("%2E"), "%252E");
    }

    #[test]
    fn build_path_leaves_unknown_placeholders() {
        let path = build_path("/v1/{kind}/{id}", &[("id", "x")]);
        assert_eq!(path, "/v1/{kind}/x");
    }
}
