//! Text-generation oracle port
//!
//! The oracle maps an input document to an output document. It is treated
//! as an opaque, non-deterministic function.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while calling the oracle
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing API key: set {0}")]
    MissingApiKey(String),

    #[error("Timeout")]
    Timeout,
}

/// One generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub user_content: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// Gateway to the text-generation service
///
/// Implementations must not retry: a failure is reported as-is and the
/// caller decides whether to try again.
#[async_trait]
pub trait TextOracle: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, OracleError>;
}
