//! Text-generation oracle adapters
//!
//! Provides [`OpenAiChatOracle`], which implements the
//! [`TextOracle`](confluence_application::TextOracle) port against any
//! OpenAI-compatible chat completions endpoint.

mod openai;

pub use openai::OpenAiChatOracle;
