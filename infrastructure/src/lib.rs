//! Infrastructure layer for confluence
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod directory;
pub mod logging;
pub mod oracle;
pub mod roles;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAskConfig, FileConfig, FileGroupConfig,
    FileLoggingConfig, FileMemberConfig, FileOracleConfig, FileOutputConfig, FileRolesConfig,
};
pub use directory::RosterDirectory;
pub use logging::JsonlBatchLogger;
pub use oracle::OpenAiChatOracle;
pub use roles::JsonFileRoleStore;
