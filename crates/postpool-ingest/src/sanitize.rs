//! Text sanitization for raw post bodies.
//!
//! Raw exports come from platforms that happily emit unpaired surrogates
//! (Windows paths, emoji split across a copy-paste boundary). A Rust
//! `String` cannot hold those, so they show up at our edges either as
//! invalid bytes (WTF-8/CESU-8 fragments) or as U+FFFD left behind by an
//! earlier lossy decode. Sanitization discards both kinds of residue.

use serde_json::Value;

/// Strip replacement characters from already-decoded text. Idempotent.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|&c| c != '\u{FFFD}').collect()
}

/// Decode bytes as UTF-8, discarding sequences that cannot round-trip.
/// Invalid fragments are dropped, not replaced.
pub fn sanitize_bytes(bytes: &[u8]) -> String {
    sanitize(&String::from_utf8_lossy(bytes))
}

/// Coerce a JSON value to sanitized text. Non-string values are rendered
/// with their JSON representation; null becomes the empty string.
pub fn sanitize_value(value: &Value) -> String {
    match value {
        Value::String(s) => sanitize(s),
        Value::Null => String::new(),
        other => sanitize(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(sanitize("ghosted after 3 interviews 🚀"), "ghosted after 3 interviews 🚀");
    }

    #[test]
    fn idempotent_on_all_inputs() {
        for s in ["", "hello", "a\u{FFFD}b", "தமிழ் post 🚀", "\u{FFFD}\u{FFFD}"] {
            let once = sanitize(s);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn lone_surrogate_bytes_are_dropped() {
        // WTF-8 encoding of U+D800 spliced into valid text
        let bytes = b"before \xED\xA0\x80 after";
        let clean = sanitize_bytes(bytes);
        assert_eq!(clean, "before  after");
        assert_eq!(sanitize(&clean), clean);
    }

    #[test]
    fn replacement_char_residue_is_dropped() {
        assert_eq!(sanitize("emoji gone \u{FFFD} wrong"), "emoji gone  wrong");
    }

    #[test]
    fn coerces_non_string_values() {
        assert_eq!(sanitize_value(&json!(42)), "42");
        assert_eq!(sanitize_value(&json!(null)), "");
        assert_eq!(sanitize_value(&json!("text")), "text");
    }
}
