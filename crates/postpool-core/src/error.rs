//! Error types for postpool.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The generative service returned non-JSON or wrongly shaped per-post
    /// metadata. Carries the full raw response for diagnosis.
    #[error("Metadata parse failed. Raw output:\n{raw}")]
    MetadataParse { raw: String },

    /// The tag-unification call returned non-JSON or a non-object payload.
    /// Fatal to the whole build; carries the full raw response.
    #[error("Unable to parse unified tags JSON. Raw output:\n{raw}")]
    TagMappingParse { raw: String },

    /// A single record failed during the build. Identifies the record and
    /// keeps a truncated text preview for diagnosis.
    #[error("Failed while processing post index {index} (text preview: {preview:?}): {source}")]
    Record {
        index: usize,
        preview: String,
        #[source]
        source: Box<Error>,
    },

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
