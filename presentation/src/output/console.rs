//! Console output formatter for ask-group results
//!
//! Long texts are split with [`chunk_text`] so every printed block stays
//! within the configured message size.

use crate::cli::commands::OutputFormat;
use colored::Colorize;
use confluence_application::{AskGroupOutcome, PromptDelivery, SubmissionReceipt};
use confluence_domain::{
    CollectionReport, ConsensusResult, DEFAULT_CHUNK_SIZE, PromptTemplate, SlotState, chunk_text,
};
use serde_json::json;

/// Formats prompts and results for console display
pub struct ConsoleFormatter {
    chunk_size: usize,
}

impl Default for ConsoleFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ConsoleFormatter {
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Enable or disable colored output process-wide
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// The prompt shown to one participant
    pub fn format_prompt(delivery: &PromptDelivery) -> String {
        let name = &delivery.participant().display_name;
        let question = delivery.question().content();

        let mut output = String::new();
        output.push_str(&Self::header(&format!(
            "{} · {}",
            PromptTemplate::ask_title(),
            name
        )));
        output.push('\n');
        output.push_str(&format!("{}\n\n", question));
        output.push_str(&format!(
            "{}\n",
            PromptTemplate::time_limit_notice(delivery.deadline()).dimmed()
        ));
        output.push_str(&format!(
            "{} {}: {}",
            "Reply with".dimmed(),
            name.bold(),
            PromptTemplate::answer_placeholder(question).italic()
        ));
        output
    }

    /// Acknowledgement shown to the invoker once the batch starts
    pub fn format_acknowledgement() -> String {
        format!("{}", "Polling Initiated".green().bold())
    }

    pub fn format_receipt(receipt: &SubmissionReceipt) -> String {
        format!("{} {}", "v".green(), receipt.message())
    }

    /// Format the outcome as printable blocks, each within the chunk size
    pub fn format_outcome(&self, outcome: &AskGroupOutcome, format: OutputFormat) -> Vec<String> {
        match format {
            OutputFormat::Json => vec![Self::format_json(outcome)],
            OutputFormat::Summary => self.format_result(outcome),
            OutputFormat::Full => {
                let mut blocks = vec![Self::format_report(outcome.report())];
                blocks.extend(self.format_result(outcome));
                blocks
            }
        }
    }

    /// Blocks for a re-generated consensus
    pub fn format_redo(&self, result: &ConsensusResult) -> Vec<String> {
        self.titled(
            "Consensus",
            &format!(
                "Question\n{}\n\nConsensus\n{}",
                result.question, result.summary
            ),
        )
    }

    fn format_result(&self, outcome: &AskGroupOutcome) -> Vec<String> {
        match outcome {
            AskGroupOutcome::NoResponses { .. } => {
                self.titled("No Responses", "No responses provided to summarize")
            }
            AskGroupOutcome::SingleResponse { answer, .. } => {
                self.titled("One Response", &answer.text)
            }
            AskGroupOutcome::Consensus { result, .. } => {
                let joined: String = result
                    .joined_answers
                    .iter()
                    .map(|answer| format!("{}\n\n", answer))
                    .collect();
                let mut blocks = self.titled("Responses", joined.trim_end());
                blocks.extend(self.titled(
                    "Consensus (beta)",
                    &format!(
                        "Question\n{}\n\nConsensus\n{}",
                        result.question, result.summary
                    ),
                ));
                blocks
            }
        }
    }

    /// One line per participant with the final state of their slot
    pub fn format_report(report: &CollectionReport) -> String {
        let mut output = Self::section_header("Participants");
        for slot in report.slots() {
            let name = slot.participant().display_name.as_str();
            let line = match slot.state() {
                SlotState::Answered(text) => format!("{} {}: {}", "v".green(), name.bold(), text),
                SlotState::TimedOut => format!("{} {} (no answer)", "-".yellow(), name),
                SlotState::DeliveryFailed(reason) => {
                    format!("{} {} (not delivered: {})", "x".red(), name, reason)
                }
                SlotState::Pending => format!("{} {} (pending)", "?".dimmed(), name),
            };
            output.push_str(&format!("  {}\n", line));
        }
        output.push_str(&format!(
            "\n{} answered, {} timed out, {} undelivered\n",
            report.answered_count(),
            report.timed_out_count(),
            report.delivery_failed_count()
        ));
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &AskGroupOutcome) -> String {
        let slots: Vec<_> = outcome
            .report()
            .slots()
            .iter()
            .map(|slot| {
                json!({
                    "participant": slot.participant(),
                    "state": slot.state().as_str(),
                    "answer": slot.answer(),
                })
            })
            .collect();

        let result = match outcome {
            AskGroupOutcome::NoResponses { .. } => json!({ "kind": "no_responses" }),
            AskGroupOutcome::SingleResponse { answer, .. } => {
                json!({ "kind": "single_response", "answer": answer })
            }
            AskGroupOutcome::Consensus { result, .. } => {
                json!({ "kind": "consensus", "consensus": result })
            }
        };

        let value = json!({
            "question": outcome.question().content(),
            "slots": slots,
            "result": result,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Title line followed by the body, split into chunk-sized blocks
    fn titled(&self, title: &str, body: &str) -> Vec<String> {
        let chunks = chunk_text(body, self.chunk_size).unwrap_or_else(|_| vec![body.to_string()]);
        let total = chunks.len();
        chunks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| {
                let heading = if total > 1 {
                    format!("{} ({}/{})", title, index + 1, total)
                } else {
                    title.to_string()
                };
                format!("{}\n{}", Self::section_header(&heading), chunk)
            })
            .collect()
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
