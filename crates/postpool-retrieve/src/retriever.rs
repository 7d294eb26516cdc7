//! Few-shot example retrieval over the normalized corpus.

use std::collections::BTreeSet;
use std::path::Path;

use postpool_core::{Language, LengthBucket, NormalizedPost, Result};

use crate::corpus::Corpus;

/// Pure read/query surface over a loaded corpus. Returned posts are
/// borrowed from the corpus and never mutated.
#[derive(Debug)]
pub struct FewShotRetriever {
    corpus: Corpus,
}

impl FewShotRetriever {
    pub fn new(corpus: Corpus) -> Self {
        Self { corpus }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(Corpus::load(path)?))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Distinct canonical tags across the corpus, sorted.
    pub fn get_tags(&self) -> BTreeSet<String> {
        self.corpus
            .posts()
            .iter()
            .flat_map(|p| p.tags.iter().cloned())
            .collect()
    }

    /// Posts matching the requested tag (exact canonical match), language,
    /// and length bucket. Empty when nothing qualifies — not an error.
    pub fn get_filtered_posts(
        &self,
        tag: &str,
        length: LengthBucket,
        language: Language,
    ) -> Vec<&NormalizedPost> {
        self.corpus
            .posts()
            .iter()
            .filter(|p| {
                p.language == language
                    && p.length_bucket() == length
                    && p.tags.iter().any(|t| t == tag)
            })
            .collect()
    }
}
