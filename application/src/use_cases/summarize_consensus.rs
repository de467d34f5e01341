//! Consensus summarization
//!
//! One oracle call per invocation, no retries. A redo repeats the call with
//! the same snapshot.

use crate::config::SummaryParams;
use crate::ports::text_oracle::{GenerationRequest, OracleError, TextOracle};
use confluence_domain::{ConsensusRequest, ConsensusResult, PromptTemplate};
use std::sync::Arc;
use tracing::{info, warn};

pub struct SummarizeConsensusUseCase<O: TextOracle + ?Sized> {
    oracle: Arc<O>,
    params: SummaryParams,
}

impl<O: TextOracle + ?Sized> Clone for SummarizeConsensusUseCase<O> {
    fn clone(&self) -> Self {
        Self {
            oracle: Arc::clone(&self.oracle),
            params: self.params,
        }
    }
}

impl<O: TextOracle + ?Sized> SummarizeConsensusUseCase<O> {
    pub fn new(oracle: Arc<O>, params: SummaryParams) -> Self {
        Self { oracle, params }
    }

    /// The exact oracle input for `request`
    pub fn generation_request(&self, request: &ConsensusRequest) -> GenerationRequest {
        GenerationRequest {
            system_instruction: PromptTemplate::summarization_system().to_string(),
            user_content: request.user_content(),
            max_output_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
        }
    }

    /// Summarize the collected answers
    pub async fn summarize(
        &self,
        request: &ConsensusRequest,
    ) -> Result<ConsensusResult, OracleError> {
        info!(
            "Summarizing {} answers to {:?}",
            request.answers().len(),
            request.question().content()
        );

        let summary = self
            .oracle
            .generate(&self.generation_request(request))
            .await
            .inspect_err(|e| warn!("Consensus summary failed: {}", e))?;

        Ok(ConsensusResult::new(request, summary.trim()))
    }

    /// Summarize the same snapshot again.
    ///
    /// Answers are not re-collected; only the oracle is asked again.
    pub async fn redo(&self, request: &ConsensusRequest) -> Result<ConsensusResult, OracleError> {
        info!("Redoing consensus summary");
        self.summarize(request).await
    }
}
