//! Slot cell: the promise behind one response slot
//!
//! The submitter and the deadline timer race for the single transition out
//! of `Pending`. Both go through the cell's mutex, so whichever takes the
//! lock first decides the terminal state and the other becomes a no-op.

use chrono::Utc;
use confluence_domain::{
    Deadline, Participant, PromptTemplate, Question, ResponseSlot, SlotError, SlotId, SlotState,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::debug;

/// Why a submission was not recorded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("The voting period has ended")]
    Closed,

    #[error("An answer was already recorded")]
    AlreadyAnswered,

    #[error("The prompt was never delivered")]
    NotDelivered,

    #[error("Answer is {length} characters, the limit is {limit}")]
    AnswerTooLong { length: usize, limit: usize },
}

/// Acknowledgement for an accepted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub slot: SlotId,
    /// Whole minutes until the batch is summarized
    pub minutes_remaining: u64,
}

impl SubmissionReceipt {
    pub fn message(&self) -> String {
        PromptTemplate::submission_receipt(self.minutes_remaining)
    }
}

pub(crate) struct SlotCell {
    slot: Mutex<ResponseSlot>,
    resolved: Notify,
    expires_at: Instant,
    // Immutable copies so submitters can read them without locking
    id: SlotId,
    participant: Participant,
    question: Question,
    deadline: Deadline,
}

impl SlotCell {
    pub(crate) fn new(slot: ResponseSlot, expires_at: Instant) -> Arc<Self> {
        Arc::new(Self {
            id: slot.id(),
            participant: slot.participant().clone(),
            question: slot.question().clone(),
            deadline: *slot.deadline(),
            slot: Mutex::new(slot),
            resolved: Notify::new(),
            expires_at,
        })
    }

    fn lock(&self) -> MutexGuard<'_, ResponseSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn slot_id(&self) -> SlotId {
        self.id
    }

    pub(crate) fn snapshot(&self) -> ResponseSlot {
        self.lock().clone()
    }

    /// `Pending → DeliveryFailed`; returns whether the transition happened
    pub(crate) fn fail_delivery(&self, reason: impl Into<String>) -> bool {
        let failed = self.lock().fail_delivery(reason).is_ok();
        if failed {
            self.resolved.notify_one();
        }
        failed
    }

    /// `Pending → TimedOut`; returns whether the transition happened
    pub(crate) fn expire(&self) -> bool {
        let expired = self.lock().expire();
        if expired {
            self.resolved.notify_one();
        }
        expired
    }

    fn submit(&self, answer: String) -> Result<SubmissionReceipt, SubmitError> {
        let mut slot = self.lock();

        // The deadline is authoritative even if the collector's timer has
        // not been polled yet.
        if Instant::now() >= self.expires_at {
            slot.expire();
        }

        match slot.state() {
            SlotState::Pending => {}
            SlotState::Answered(_) => return Err(SubmitError::AlreadyAnswered),
            SlotState::TimedOut => return Err(SubmitError::Closed),
            SlotState::DeliveryFailed(_) => return Err(SubmitError::NotDelivered),
        }

        slot.submit(answer).map_err(|e| match e {
            SlotError::AnswerTooLong { length, limit } => {
                SubmitError::AnswerTooLong { length, limit }
            }
            SlotError::AlreadyTerminal { .. } => SubmitError::Closed,
        })?;

        let receipt = SubmissionReceipt {
            slot: slot.id(),
            minutes_remaining: slot.deadline().minutes_remaining(Utc::now()),
        };
        drop(slot);

        self.resolved.notify_one();
        Ok(receipt)
    }

    /// Wait until the slot is terminal, expiring it when the deadline fires
    pub(crate) async fn wait(&self) -> ResponseSlot {
        loop {
            let notified = self.resolved.notified();
            {
                let slot = self.lock();
                if slot.is_terminal() {
                    return slot.clone();
                }
            }

            tokio::select! {
                _ = notified => {}
                _ = tokio::time::sleep_until(self.expires_at) => {
                    let mut slot = self.lock();
                    if slot.expire() {
                        debug!("{} for {} timed out", slot.id(), slot.participant());
                    }
                    return slot.clone();
                }
            }
        }
    }
}

/// Handle through which a prompt channel records one participant's answer
#[derive(Clone)]
pub struct SlotSubmitter {
    cell: Arc<SlotCell>,
}

impl SlotSubmitter {
    pub(crate) fn new(cell: Arc<SlotCell>) -> Self {
        Self { cell }
    }

    pub fn slot_id(&self) -> SlotId {
        self.cell.slot_id()
    }

    pub fn participant(&self) -> &Participant {
        &self.cell.participant
    }

    pub fn question(&self) -> &Question {
        &self.cell.question
    }

    pub fn deadline(&self) -> &Deadline {
        &self.cell.deadline
    }

    /// Whether an answer would currently be accepted
    pub fn is_open(&self) -> bool {
        Instant::now() < self.cell.expires_at && self.cell.snapshot().is_pending()
    }

    /// Record the participant's answer.
    ///
    /// Rejected once the slot is terminal, including after the deadline.
    pub fn submit(&self, answer: impl Into<String>) -> Result<SubmissionReceipt, SubmitError> {
        self.cell.submit(answer.into())
    }
}

impl std::fmt::Debug for SlotSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotSubmitter")
            .field("slot", &self.slot_id())
            .field("participant", &self.cell.participant.id)
            .finish()
    }
}
