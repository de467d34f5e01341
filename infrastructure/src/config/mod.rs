//! Configuration file loading for confluence
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./confluence.toml` or `./.confluence.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/confluence/config.toml`
//! 4. Environment: `CONFLUENCE_ASK__CHUNK_SIZE=1500` style variables
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAskConfig, FileConfig, FileGroupConfig, FileLoggingConfig,
    FileMemberConfig, FileOracleConfig, FileOutputConfig, FileRolesConfig,
};
pub use loader::ConfigLoader;
