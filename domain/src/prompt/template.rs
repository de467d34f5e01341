//! Prompt templates for the ask-group flow

use crate::slot::Deadline;
use crate::util::take_chars;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Placeholder length of the answer field
    pub const PLACEHOLDER_CHARS: usize = 100;

    /// Title of the prompt shown to participants
    pub fn ask_title() -> &'static str {
        "Confluence Experiment"
    }

    /// Time limit notice attached to each prompt
    pub fn time_limit_notice(deadline: &Deadline) -> String {
        format!(
            "Please reply within {} minutes. The voting period ends at {}.",
            deadline.budget_minutes(),
            deadline.formatted_end()
        )
    }

    /// Placeholder shown in the answer field: the start of the question
    pub fn answer_placeholder(question: &str) -> &str {
        take_chars(question, Self::PLACEHOLDER_CHARS)
    }

    /// Acknowledgement returned to a participant after submitting
    pub fn submission_receipt(minutes_remaining: u64) -> String {
        format!(
            "Thank you for voting. Answers will be summarized in approximately {} minutes.",
            minutes_remaining
        )
    }

    /// System instruction for the consensus summary
    pub fn summarization_system() -> &'static str {
        "You are an AI language model that summarizes responses to a given question."
    }

    /// User content for the consensus summary
    pub fn summarization_prompt(question: &str, joined_answers: &str) -> String {
        format!(
            "Question: {}\n\nResponses:\n{}\n\nPlease provide a detailed summary and consensus of the responses.",
            question, joined_answers
        )
    }
}
