//! Interactive prompt channel port
//!
//! The channel shows each participant the question and, later and on its
//! own schedule, hands their answer to the [`SlotSubmitter`] carried by the
//! delivery.
//!
//! ```text
//! PromptDispatcher ──deliver(PromptDelivery)──▶ channel adapter
//!                                                   │
//!                          participant answers ◀────┘
//!                                                   │
//! ResponseCollector ◀──── SlotSubmitter::submit ────┘
//! ```

use crate::batch::SlotSubmitter;
use async_trait::async_trait;
use confluence_domain::{ConsensusResult, Deadline, Participant, Question, SlotId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Participant {0} cannot receive prompts")]
    Unreachable(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Another open prompt is already addressed to {0}")]
    AddressTaken(String),
}

/// A prompt bound to one response slot
#[derive(Debug, Clone)]
pub struct PromptDelivery {
    submitter: SlotSubmitter,
}

impl PromptDelivery {
    pub fn new(submitter: SlotSubmitter) -> Self {
        Self { submitter }
    }

    pub fn slot_id(&self) -> SlotId {
        self.submitter.slot_id()
    }

    pub fn participant(&self) -> &Participant {
        self.submitter.participant()
    }

    pub fn question(&self) -> &Question {
        self.submitter.question()
    }

    pub fn deadline(&self) -> &Deadline {
        self.submitter.deadline()
    }

    /// Handle the adapter uses to record the answer
    pub fn submitter(&self) -> &SlotSubmitter {
        &self.submitter
    }

    pub fn into_submitter(self) -> SlotSubmitter {
        self.submitter
    }
}

/// Channel delivering prompts and results to participants
#[async_trait]
pub trait PromptChannel: Send + Sync {
    /// Deliver a prompt to a participant other than the invoker
    async fn deliver(&self, delivery: PromptDelivery) -> Result<(), DeliveryError>;

    /// Deliver the prompt to the invoker.
    ///
    /// The invocation itself must be acknowledged, so adapters with a
    /// synchronous reply path override this; the default delivers normally.
    async fn deliver_to_invoker(&self, delivery: PromptDelivery) -> Result<(), DeliveryError> {
        self.deliver(delivery).await
    }

    /// Send the responses and consensus to a participant
    async fn send_consensus(
        &self,
        participant: &Participant,
        result: &ConsensusResult,
    ) -> Result<(), DeliveryError>;
}
