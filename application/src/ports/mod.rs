//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod batch_logger;
pub mod group_directory;
pub mod progress;
pub mod prompt_channel;
pub mod role_store;
pub mod text_oracle;
