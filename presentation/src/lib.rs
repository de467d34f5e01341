//! Presentation layer for confluence
//!
//! This crate contains CLI definitions, the terminal prompt channel,
//! output formatters and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;
pub mod terminal;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use terminal::{RouteError, TerminalPromptChannel};
