//! Corpus build pipeline: sanitize → extract → merge → unify → persist.
//!
//! Records are processed strictly one at a time; the service is never
//! called concurrently. Any extraction failure aborts the whole build —
//! a corpus with silently skipped records would corrupt the retrieval
//! assumptions downstream, so partial corpora are never persisted.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use postpool_core::{Error, NormalizedPost, RawPost, Result};
use postpool_llm::TextCompleter;

use crate::extract::MetadataExtractor;
use crate::sanitize::sanitize_value;
use crate::unify::TagUnifier;

/// Longest text preview attached to a failed-record error.
const PREVIEW_CHARS: usize = 120;

/// Orchestrates the full raw-to-normalized pipeline.
pub struct CorpusBuilder<'a, C: TextCompleter> {
    completer: &'a C,
}

impl<'a, C: TextCompleter> CorpusBuilder<'a, C> {
    pub fn new(completer: &'a C) -> Self {
        Self { completer }
    }

    /// Enrich every record, then rewrite tags through the corpus-wide
    /// mapping. Fails on the first bad record, identifying its index.
    pub async fn build(&self, raw_posts: Vec<RawPost>) -> Result<Vec<NormalizedPost>> {
        let extractor = MetadataExtractor::new(self.completer);
        let total = raw_posts.len();

        let mut enriched = Vec::with_capacity(total);
        for (index, post) in raw_posts.into_iter().enumerate() {
            let text = sanitize_value(&post.text);
            let metadata = extractor.extract(&text).await.map_err(|source| Error::Record {
                index,
                preview: preview(&text),
                source: Box::new(source),
            })?;
            debug!("Enriched post {}/{}", index + 1, total);
            enriched.push(NormalizedPost::from_parts(text, metadata, post.extra));
        }

        let mapping = TagUnifier::new(self.completer).unify(&enriched).await?;
        for post in &mut enriched {
            let canonical: BTreeSet<String> = post.tags.iter().map(|t| mapping.apply(t)).collect();
            post.tags = canonical.into_iter().collect();
        }

        Ok(enriched)
    }

    /// Read a raw UTF-8 JSON array, build, and persist. The output file is
    /// only replaced on full success. Returns the number of posts written.
    pub async fn build_file(&self, raw_path: &Path, out_path: &Path) -> Result<usize> {
        let data = std::fs::read(raw_path)?;
        let raw_posts: Vec<RawPost> = serde_json::from_slice(&data)
            .map_err(|e| Error::Corpus(format!("{}: {e}", raw_path.display())))?;
        info!("Loaded {} raw posts from {}", raw_posts.len(), raw_path.display());

        let corpus = self.build(raw_posts).await?;
        write_corpus(&corpus, out_path)?;
        info!("Saved {} normalized posts to {}", corpus.len(), out_path.display());
        Ok(corpus.len())
    }
}

/// Persist a corpus as pretty-printed UTF-8 JSON, non-ASCII emitted
/// literally. Writes to a temp file in the destination directory and
/// renames it into place so a failed write never clobbers the previous
/// file.
pub fn write_corpus(corpus: &[NormalizedPost], out_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(corpus)?;

    let dir = match out_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.persist(out_path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        text.to_string()
    } else {
        let cut: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}…")
    }
}
