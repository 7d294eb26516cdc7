//! Postpool Core — shared record types, configuration, error taxonomy.

pub mod config;
pub mod error;
pub mod post;

pub use config::DataPaths;
pub use error::{Error, Result};
pub use post::{Language, LengthBucket, NormalizedPost, PostMetadata, RawPost};
