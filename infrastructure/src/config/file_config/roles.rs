//! Role store configuration from TOML (`[roles]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRolesConfig {
    /// JSON file mapping group ids to required role ids
    pub store_path: PathBuf,
}

impl Default for FileRolesConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("required_roles.json"),
        }
    }
}
