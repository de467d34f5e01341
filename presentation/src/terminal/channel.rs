//! [`PromptChannel`] adapter for a shared terminal.
//!
//! Every delivered prompt is printed and its submitter is registered under
//! the participant's display name. Input lines of the form
//! `<display name>: <answer>` are routed to the matching slot.

use crate::output::console::ConsoleFormatter;
use async_trait::async_trait;
use confluence_application::{
    DeliveryError, PromptChannel, PromptDelivery, SlotSubmitter, SubmissionReceipt, SubmitError,
};
use confluence_domain::{ConsensusResult, Participant, ParticipantId};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::debug;

/// Why an input line did not reach a slot
#[derive(Error, Debug, PartialEq)]
pub enum RouteError {
    #[error("Expected \"<name>: <answer>\"")]
    Malformed,

    #[error("No open prompt for {0}")]
    UnknownParticipant(String),

    #[error("{0}")]
    Rejected(#[from] SubmitError),
}

pub struct TerminalPromptChannel {
    unreachable: HashSet<ParticipantId>,
    open: Mutex<HashMap<String, SlotSubmitter>>,
}

impl TerminalPromptChannel {
    /// `unreachable` lists participants whose deliveries fail
    pub fn new(unreachable: HashSet<ParticipantId>) -> Self {
        Self {
            unreachable,
            open: Mutex::new(HashMap::new()),
        }
    }

    /// Route one input line to the slot of the named participant
    pub fn route_line(&self, line: &str) -> Result<SubmissionReceipt, RouteError> {
        let (name, answer) = line.split_once(':').ok_or(RouteError::Malformed)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(RouteError::Malformed);
        }

        let submitter = self
            .open
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| RouteError::UnknownParticipant(name.to_string()))?;

        Ok(submitter.submit(answer.trim())?)
    }

    /// Display names with a registered prompt
    pub fn open_prompts(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .open
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    fn register(&self, delivery: PromptDelivery) -> Result<(), DeliveryError> {
        let participant = delivery.participant();
        if self.unreachable.contains(&participant.id) {
            return Err(DeliveryError::Unreachable(participant.to_string()));
        }

        let mut open = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        // Answers are routed by display name, so it must identify one slot
        match open.entry(participant.display_name.clone()) {
            Entry::Occupied(entry) => Err(DeliveryError::AddressTaken(entry.key().clone())),
            Entry::Vacant(entry) => {
                println!("{}", ConsoleFormatter::format_prompt(&delivery));
                entry.insert(delivery.into_submitter());
                Ok(())
            }
        }
    }
}

#[async_trait]
impl PromptChannel for TerminalPromptChannel {
    async fn deliver(&self, delivery: PromptDelivery) -> Result<(), DeliveryError> {
        self.register(delivery)
    }

    async fn deliver_to_invoker(&self, delivery: PromptDelivery) -> Result<(), DeliveryError> {
        println!("{}", ConsoleFormatter::format_acknowledgement());
        self.register(delivery)
    }

    /// Only checks reachability; on a shared terminal the CLI prints the
    /// consensus once for everyone.
    async fn send_consensus(
        &self,
        participant: &Participant,
        _result: &ConsensusResult,
    ) -> Result<(), DeliveryError> {
        if self.unreachable.contains(&participant.id) {
            return Err(DeliveryError::Unreachable(participant.to_string()));
        }
        debug!("Consensus shared with {}", participant);
        Ok(())
    }
}
