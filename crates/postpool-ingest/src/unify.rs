//! Corpus-wide tag unification.
//!
//! Exactly one completion call regardless of corpus size: the distinct raw
//! tags are rendered into a single prompt and the service returns a JSON
//! object mapping every raw tag to a Title-Case canonical tag. The parse is
//! strict, but applying the mapping is lenient — a tag the service forgot
//! falls back to itself rather than failing the build.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::info;

use postpool_core::{Error, NormalizedPost, Result};
use postpool_llm::TextCompleter;

use crate::extract::strip_code_fence;

/// Mapping from raw tag to canonical tag, total by construction: lookups
/// for unseen tags return the tag itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMapping {
    map: BTreeMap<String, String>,
}

impl TagMapping {
    pub fn from_map(map: BTreeMap<String, String>) -> Self {
        Self { map }
    }

    /// Canonical form of a tag, falling back to the (trimmed) literal when
    /// the mapping has no entry. Never empty for non-empty input, never
    /// fails.
    pub fn apply(&self, tag: &str) -> String {
        let tag = tag.trim();
        self.map.get(tag).cloned().unwrap_or_else(|| tag.to_string())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Distinct trimmed non-empty tags across the corpus, sorted.
pub fn distinct_tags(posts: &[NormalizedPost]) -> Vec<String> {
    let mut tags: Vec<String> = posts
        .iter()
        .flat_map(|p| p.tags.iter())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

fn unification_prompt(tags: &[String]) -> String {
    format!(
        "\
I will give you a list of tags. You need to unify tags with the following requirements:

1. Tags are unified and merged to create a shorter list.
   Example 1: \"Jobseekers\", \"Job Hunting\" can be merged into \"Job Search\".
   Example 2: \"Motivation\", \"Inspiration\", \"Drive\" can be mapped to \"Motivation\".
   Example 3: \"Personal Growth\", \"Personal Development\", \"Self Improvement\" can be mapped to \"Self Improvement\".
   Example 4: \"Scam Alert\", \"Job Scam\" can be mapped to \"Scams\".

2. Each unified tag should follow Title Case convention. Example: \"Motivation\", \"Job Search\".
3. Output should be a JSON object only. No preamble, no markdown.
4. Output should have mapping of original tag and the unified tag.
   For example: {{\"Jobseekers\": \"Job Search\", \"Job Hunting\": \"Job Search\", \"Motivation\": \"Motivation\"}}

Here is the list of tags:
{tags}",
        tags = tags.join(", ")
    )
}

/// Builds the corpus-wide tag mapping with a single service call.
pub struct TagUnifier<'a, C: TextCompleter> {
    completer: &'a C,
}

impl<'a, C: TextCompleter> TagUnifier<'a, C> {
    pub fn new(completer: &'a C) -> Self {
        Self { completer }
    }

    pub async fn unify(&self, posts: &[NormalizedPost]) -> Result<TagMapping> {
        let tags = distinct_tags(posts);
        if tags.is_empty() {
            return Ok(TagMapping::default());
        }

        info!("Unifying {} distinct tags", tags.len());
        let raw = self.completer.complete(&unification_prompt(&tags)).await?;
        parse_mapping(&raw)
    }
}

/// Parse and validate a unification response.
pub fn parse_mapping(raw: &str) -> Result<TagMapping> {
    let fail = || Error::TagMappingParse { raw: raw.to_string() };

    let value: Value = serde_json::from_str(strip_code_fence(raw)).map_err(|_| fail())?;
    let obj = value.as_object().ok_or_else(fail)?;

    let mut map = BTreeMap::new();
    for (tag, canonical) in obj {
        let canonical = canonical.as_str().ok_or_else(fail)?;
        map.insert(tag.clone(), canonical.to_string());
    }
    Ok(TagMapping::from_map(map))
}
