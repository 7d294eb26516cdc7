//! Read-only access to the persisted normalized corpus.

use std::path::Path;

use tracing::info;

use postpool_core::{Error, NormalizedPost, Result};

/// The normalized post collection, loaded once and immutable thereafter.
///
/// Construction cost is one file read plus a full JSON parse. Callers that
/// serve many queries hold onto the loaded value; there is no ambient
/// global cache.
#[derive(Debug, Clone)]
pub struct Corpus {
    posts: Vec<NormalizedPost>,
}

impl Corpus {
    pub fn from_posts(posts: Vec<NormalizedPost>) -> Self {
        Self { posts }
    }

    /// Load a corpus from a processed-posts JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let posts: Vec<NormalizedPost> = serde_json::from_slice(&data)
            .map_err(|e| Error::Corpus(format!("{}: {e}", path.display())))?;
        info!("Loaded corpus of {} posts from {}", posts.len(), path.display());
        Ok(Self { posts })
    }

    pub fn posts(&self) -> &[NormalizedPost] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
