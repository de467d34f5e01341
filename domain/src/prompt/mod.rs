//! Prompt domain
//!
//! Texts shown to participants and sent to the text-generation oracle.

mod template;

pub use template::PromptTemplate;
