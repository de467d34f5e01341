//! Batch configuration from TOML (`[ask]` section)

use confluence_domain::DEFAULT_CHUNK_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAskConfig {
    /// Answer window when `--timeout` is not given
    pub default_timeout_minutes: u32,
    /// How long past the deadline the collector waits for in-flight answers
    pub grace_seconds: u64,
    /// Largest message printed in one block, in characters
    pub chunk_size: usize,
}

impl Default for FileAskConfig {
    fn default() -> Self {
        Self {
            default_timeout_minutes: 45,
            grace_seconds: 5,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}
