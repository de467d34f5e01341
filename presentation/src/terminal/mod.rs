//! Terminal prompt channel
//!
//! Prompts are printed to stdout and answers are typed back on stdin.

mod channel;

pub use channel::{RouteError, TerminalPromptChannel};
