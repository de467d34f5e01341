//! Group rosters from TOML (`[groups.<id>]` sections)
//!
//! ```toml
//! [groups.book-club]
//! members = [
//!     { id = "u1", display_name = "alice", roles = ["voters"], administrator = true },
//!     { id = "u2", display_name = "bob" },
//! ]
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGroupConfig {
    pub members: Vec<FileMemberConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMemberConfig {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub administrator: bool,
    /// Whether prompts can be delivered to this member
    #[serde(default = "default_reachable")]
    pub reachable: bool,
}

fn default_reachable() -> bool {
    true
}
