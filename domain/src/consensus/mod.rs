//! Consensus request and result value objects

use crate::collection::CollectedAnswer;
use crate::core::question::Question;
use crate::prompt::PromptTemplate;
use serde::{Deserialize, Serialize};

/// Snapshot of what gets summarized (Value Object)
///
/// Built once per batch. A redo re-sends exactly this snapshot; it never
/// re-collects answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusRequest {
    question: Question,
    answers: Vec<String>,
}

impl ConsensusRequest {
    pub fn new(question: Question, answers: Vec<String>) -> Self {
        Self { question, answers }
    }

    pub fn from_collected(question: Question, answers: &[CollectedAnswer]) -> Self {
        Self::new(question, answers.iter().map(|a| a.text.clone()).collect())
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Answers in order, each followed by a blank line
    pub fn joined_answers(&self) -> String {
        self.answers.iter().fold(String::new(), |mut joined, answer| {
            joined.push_str(answer);
            joined.push_str("\n\n");
            joined
        })
    }

    /// The user content sent to the oracle
    pub fn user_content(&self) -> String {
        PromptTemplate::summarization_prompt(self.question.content(), &self.joined_answers())
    }
}

/// A synthesized consensus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub question: String,
    pub joined_answers: Vec<String>,
    pub summary: String,
}

impl ConsensusResult {
    pub fn new(request: &ConsensusRequest, summary: impl Into<String>) -> Self {
        Self {
            question: request.question().content().to_string(),
            joined_answers: request.answers().to_vec(),
            summary: summary.into(),
        }
    }
}
