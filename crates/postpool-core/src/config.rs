//! Data directory layout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paths to the postpool data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Raw posts input (`data/post.json`).
    pub raw_file: PathBuf,
    /// Normalized corpus output (`data/processed_posts.json`).
    pub processed_file: PathBuf,
    /// LLM configuration (`data/llm-config.json`).
    pub llm_config_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates the root if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            raw_file: root.join("post.json"),
            processed_file: root.join("processed_posts.json"),
            llm_config_file: root.join("llm-config.json"),
            root,
        })
    }

    /// Resolve the data directory from `POSTPOOL_DATA_DIR`, defaulting to
    /// `data/` in the working directory.
    pub fn from_env() -> std::io::Result<Self> {
        let root = std::env::var("POSTPOOL_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        Self::new(root)
    }
}
