//! Few-shot retrieval over the normalized corpus.
//!
//! Load once, query many times: `Corpus::load` reads the processed file,
//! `FewShotRetriever` answers tag/length/language queries against it.

pub mod corpus;
pub mod prompt;
pub mod retriever;

pub use corpus::Corpus;
pub use prompt::format_examples;
pub use retriever::FewShotRetriever;
