//! Post record types shared by the ingest pipeline and the retriever.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Language of a post, as detected by the metadata extractor.
///
/// Hinglish is Hindi + English and Tanglish is Tamil + English, both written
/// in Latin script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Hinglish,
    Tanglish,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hinglish, Language::Tanglish];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hinglish => "Hinglish",
            Language::Tanglish => "Tanglish",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("english") => Ok(Language::English),
            s if s.eq_ignore_ascii_case("hinglish") => Ok(Language::Hinglish),
            s if s.eq_ignore_ascii_case("tanglish") => Ok(Language::Tanglish),
            other => Err(format!("unknown language: {other:?}")),
        }
    }
}

/// Length bucket over `line_count`, used to match posts of similar size.
///
/// Boundaries are fixed: Short covers 0..=5 lines, Medium 6..=12, Long 13+.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthBucket {
    Short,
    Medium,
    Long,
}

impl LengthBucket {
    /// Highest line count still considered Short.
    pub const SHORT_MAX: u32 = 5;
    /// Highest line count still considered Medium.
    pub const MEDIUM_MAX: u32 = 12;

    /// Bucket a line count.
    pub fn for_line_count(line_count: u32) -> LengthBucket {
        if line_count <= Self::SHORT_MAX {
            LengthBucket::Short
        } else if line_count <= Self::MEDIUM_MAX {
            LengthBucket::Medium
        } else {
            LengthBucket::Long
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthBucket::Short => "Short",
            LengthBucket::Medium => "Medium",
            LengthBucket::Long => "Long",
        }
    }
}

impl std::fmt::Display for LengthBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LengthBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("short") => Ok(LengthBucket::Short),
            s if s.eq_ignore_ascii_case("medium") => Ok(LengthBucket::Medium),
            s if s.eq_ignore_ascii_case("long") => Ok(LengthBucket::Long),
            other => Err(format!("unknown length: {other:?}")),
        }
    }
}

/// A post as it appears in the raw input file. Only `text` is interpreted;
/// every other field is carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPost {
    /// Post body. Usually a string; anything else is coerced by the sanitizer.
    #[serde(default)]
    pub text: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Metadata extracted for a single post by the generative service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetadata {
    pub line_count: u32,
    pub language: Language,
    /// At most two topic tags (raw, pre-unification).
    pub tags: Vec<String>,
}

/// A fully processed post: sanitized text, extracted metadata, canonical
/// tags, plus the passthrough fields from the raw record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedPost {
    pub text: String,
    pub line_count: u32,
    pub language: Language,
    /// Sorted, deduplicated canonical tags.
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NormalizedPost {
    /// Field names owned by the pipeline. Metadata always wins over
    /// same-named fields in the raw record, so these are scrubbed from the
    /// passthrough bag at assembly time.
    pub const RESERVED_KEYS: [&'static str; 4] = ["text", "line_count", "language", "tags"];

    /// Assemble a post from sanitized text, extracted metadata, and the raw
    /// record's passthrough fields.
    pub fn from_parts(text: String, metadata: PostMetadata, mut extra: Map<String, Value>) -> Self {
        for key in Self::RESERVED_KEYS {
            extra.remove(key);
        }
        Self {
            text,
            line_count: metadata.line_count,
            language: metadata.language,
            tags: metadata.tags,
            extra,
        }
    }

    pub fn length_bucket(&self) -> LengthBucket {
        LengthBucket::for_line_count(self.line_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bucket_boundaries() {
        assert_eq!(LengthBucket::for_line_count(0), LengthBucket::Short);
        assert_eq!(LengthBucket::for_line_count(5), LengthBucket::Short);
        assert_eq!(LengthBucket::for_line_count(6), LengthBucket::Medium);
        assert_eq!(LengthBucket::for_line_count(12), LengthBucket::Medium);
        assert_eq!(LengthBucket::for_line_count(13), LengthBucket::Long);
        assert_eq!(LengthBucket::for_line_count(50), LengthBucket::Long);
    }

    #[test]
    fn language_parse_is_case_insensitive() {
        assert_eq!("english".parse::<Language>().unwrap(), Language::English);
        assert_eq!(" Tanglish ".parse::<Language>().unwrap(), Language::Tanglish);
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn metadata_overrides_passthrough_fields() {
        let mut extra = Map::new();
        extra.insert("tags".into(), json!(["stale"]));
        extra.insert("line_count".into(), json!(999));
        extra.insert("engagement".into(), json!(42));

        let meta = PostMetadata {
            line_count: 3,
            language: Language::English,
            tags: vec!["Motivation".into()],
        };
        let post = NormalizedPost::from_parts("hello".into(), meta, extra);

        assert_eq!(post.line_count, 3);
        assert_eq!(post.tags, vec!["Motivation"]);
        assert_eq!(post.extra.get("engagement"), Some(&json!(42)));
        assert!(!post.extra.contains_key("tags"));
        assert!(!post.extra.contains_key("line_count"));
    }

    #[test]
    fn raw_post_keeps_unknown_fields() {
        let raw: RawPost =
            serde_json::from_value(json!({"text": "hi", "engagement": 7, "author": "a"})).unwrap();
        assert_eq!(raw.text, json!("hi"));
        assert_eq!(raw.extra.get("engagement"), Some(&json!(7)));
    }
}
