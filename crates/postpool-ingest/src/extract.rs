//! Per-post metadata extraction via the generative service.
//!
//! One completion call per post. The response is untrusted: it is parsed
//! and shape-checked here, and anything malformed fails the post loudly
//! with the raw payload attached — no defaults are fabricated.

use serde_json::Value;
use tracing::debug;

use postpool_core::{Error, Language, PostMetadata, Result};
use postpool_llm::TextCompleter;

/// Maximum topic tags per post. The prompt caps at two; anything beyond
/// that in the response is model noise and gets truncated.
pub const MAX_TAGS: usize = 2;

fn extraction_prompt(post: &str) -> String {
    format!(
        "\
You are given a LinkedIn post. You need to extract number of lines, language of the post and tags.

Rules:
1. Return a valid JSON only. No preamble, no markdown.
2. JSON object must have exactly three keys: line_count, language, tags.
3. tags is an array of text tags. Extract maximum two tags.
4. language must be one of: English, Hinglish, Tanglish
   - Hinglish means Hindi + English (written in English letters)
   - Tanglish means Tamil + English (written in English letters)

Post:
{post}"
    )
}

/// Extracts line count, language, and tags for a single post.
pub struct MetadataExtractor<'a, C: TextCompleter> {
    completer: &'a C,
}

impl<'a, C: TextCompleter> MetadataExtractor<'a, C> {
    pub fn new(completer: &'a C) -> Self {
        Self { completer }
    }

    /// One service round trip, then strict parse. Errors carry the raw
    /// response text.
    pub async fn extract(&self, post_text: &str) -> Result<PostMetadata> {
        let raw = self.completer.complete(&extraction_prompt(post_text)).await?;
        let metadata = parse_metadata(&raw)?;
        debug!(
            "Extracted metadata: {} lines, {}, tags {:?}",
            metadata.line_count, metadata.language, metadata.tags
        );
        Ok(metadata)
    }
}

/// Drop a Markdown code fence wrapper if the model added one despite the
/// no-markdown instruction.
pub(crate) fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Skip the language hint on the opening fence line (```json)
    match rest.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => rest.trim(),
    }
}

/// Parse and validate a metadata response.
pub fn parse_metadata(raw: &str) -> Result<PostMetadata> {
    let fail = || Error::MetadataParse { raw: raw.to_string() };

    let value: Value = serde_json::from_str(strip_code_fence(raw)).map_err(|_| fail())?;
    let obj = value.as_object().ok_or_else(fail)?;

    let line_count = obj
        .get("line_count")
        .and_then(Value::as_u64)
        .ok_or_else(fail)? as u32;

    let language = obj
        .get("language")
        .and_then(Value::as_str)
        .ok_or_else(fail)?
        .parse::<Language>()
        .map_err(|_| fail())?;

    let raw_tags = obj.get("tags").and_then(Value::as_array).ok_or_else(fail)?;
    let mut tags = Vec::new();
    for tag in raw_tags {
        let tag = tag.as_str().ok_or_else(fail)?.trim();
        if !tag.is_empty() {
            tags.push(tag.to_string());
        }
    }
    tags.truncate(MAX_TAGS);

    Ok(PostMetadata {
        line_count,
        language,
        tags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_response() {
        let raw = r#"{"line_count": 7, "language": "English", "tags": ["Job Search", "Motivation"]}"#;
        let meta = parse_metadata(raw).unwrap();
        assert_eq!(meta.line_count, 7);
        assert_eq!(meta.language, Language::English);
        assert_eq!(meta.tags, vec!["Job Search", "Motivation"]);
    }

    #[test]
    fn tolerates_code_fence_wrapper() {
        let raw = "```json\n{\"line_count\": 2, \"language\": \"Hinglish\", \"tags\": [\"Career\"]}\n```";
        let meta = parse_metadata(raw).unwrap();
        assert_eq!(meta.language, Language::Hinglish);
        assert_eq!(meta.tags, vec!["Career"]);
    }

    #[test]
    fn non_json_fails_with_raw_payload() {
        let raw = "Sure! Here is the metadata you asked for:";
        match parse_metadata(raw) {
            Err(Error::MetadataParse { raw: carried }) => assert_eq!(carried, raw),
            other => panic!("expected MetadataParse, got {other:?}"),
        }
    }

    #[test]
    fn missing_key_is_a_parse_error() {
        let raw = r#"{"line_count": 3, "tags": []}"#;
        assert!(matches!(
            parse_metadata(raw),
            Err(Error::MetadataParse { .. })
        ));
    }

    #[test]
    fn unknown_language_is_a_parse_error() {
        let raw = r#"{"line_count": 3, "language": "French", "tags": []}"#;
        assert!(matches!(
            parse_metadata(raw),
            Err(Error::MetadataParse { .. })
        ));
    }

    #[test]
    fn extra_tags_are_truncated_and_trimmed() {
        let raw = r#"{"line_count": 1, "language": "Tanglish", "tags": [" A ", "B", "C"]}"#;
        let meta = parse_metadata(raw).unwrap();
        assert_eq!(meta.tags, vec!["A", "B"]);
    }

    #[test]
    fn prompt_embeds_the_post() {
        let prompt = extraction_prompt("my post body");
        assert!(prompt.contains("my post body"));
        assert!(prompt.contains("line_count, language, tags"));
    }
}
