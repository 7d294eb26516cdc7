//! Ingest pipeline: raw posts → sanitized, enriched, tag-normalized corpus.

pub mod builder;
pub mod extract;
pub mod sanitize;
pub mod unify;

pub use builder::{write_corpus, CorpusBuilder};
pub use extract::MetadataExtractor;
pub use sanitize::{sanitize, sanitize_bytes, sanitize_value};
pub use unify::{distinct_tags, TagMapping, TagUnifier};
