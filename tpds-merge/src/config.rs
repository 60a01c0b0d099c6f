//! Merger configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for staging incoming updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Directory where incoming streams are written before processing.
    pub staging_dir: PathBuf,
    /// Maximum size of a single staged update (in bytes).
    pub max_file_size: u64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            staging_dir: std::env::temp_dir().join("tpds-staging"),
            max_file_size: 50 * 1024 * 1024, // 50 MB
        }
    }
}
