//! Response slot entity and its state machine

use super::deadline::Deadline;
use crate::core::question::Question;
use crate::participant::Participant;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position of a slot in its batch, i.e. the dispatch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(usize);

impl SlotId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot-{}", self.0)
    }
}

/// State of a response slot.
///
/// The answer text lives inside [`SlotState::Answered`], so a slot can only
/// hold an answer in that state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum SlotState {
    /// Waiting for the participant
    Pending,
    /// Participant submitted text (possibly empty) before the deadline
    Answered(String),
    /// Deadline elapsed without an answer
    TimedOut,
    /// The prompt could not be delivered
    DeliveryFailed(String),
}

impl SlotState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SlotState::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotState::Pending => "pending",
            SlotState::Answered(_) => "answered",
            SlotState::TimedOut => "timed_out",
            SlotState::DeliveryFailed(_) => "delivery_failed",
        }
    }
}

impl std::fmt::Display for SlotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rejected slot transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("{slot} is already {state}")]
    AlreadyTerminal { slot: SlotId, state: &'static str },

    #[error("Answer is {length} characters, the limit is {limit}")]
    AnswerTooLong { length: usize, limit: usize },
}

/// One outstanding request to one participant (Entity)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSlot {
    id: SlotId,
    participant: Participant,
    question: Question,
    deadline: Deadline,
    state: SlotState,
}

impl ResponseSlot {
    /// Longest answer a participant may submit
    pub const MAX_ANSWER_CHARS: usize = 400;

    pub fn new(id: SlotId, participant: Participant, question: Question, deadline: Deadline) -> Self {
        Self {
            id,
            participant,
            question,
            deadline,
            state: SlotState::Pending,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn deadline(&self) -> &Deadline {
        &self.deadline
    }

    pub fn state(&self) -> &SlotState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SlotState::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// The submitted answer, present only when answered
    pub fn answer(&self) -> Option<&str> {
        match &self.state {
            SlotState::Answered(text) => Some(text),
            _ => None,
        }
    }

    /// `Pending → Answered`.
    ///
    /// An over-long answer is rejected without consuming the slot, so the
    /// participant can submit again.
    pub fn submit(&mut self, answer: impl Into<String>) -> Result<(), SlotError> {
        self.ensure_pending()?;
        let answer = answer.into();
        let length = answer.chars().count();
        if length > Self::MAX_ANSWER_CHARS {
            return Err(SlotError::AnswerTooLong {
                length,
                limit: Self::MAX_ANSWER_CHARS,
            });
        }
        self.state = SlotState::Answered(answer);
        Ok(())
    }

    /// `Pending → TimedOut`. Returns whether the transition happened.
    pub fn expire(&mut self) -> bool {
        if self.is_pending() {
            self.state = SlotState::TimedOut;
            true
        } else {
            false
        }
    }

    /// `Pending → DeliveryFailed`
    pub fn fail_delivery(&mut self, reason: impl Into<String>) -> Result<(), SlotError> {
        self.ensure_pending()?;
        self.state = SlotState::DeliveryFailed(reason.into());
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), SlotError> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(SlotError::AlreadyTerminal {
                slot: self.id,
                state: self.state.as_str(),
            })
        }
    }
}
