//! Collection outcome
//!
//! Folding the terminal slots of a batch into a three-way outcome is a
//! business rule: summarization runs only for two or more answers.

use crate::participant::Participant;
use crate::slot::{ResponseSlot, SlotState};
use serde::{Deserialize, Serialize};

/// An answer collected from one participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedAnswer {
    pub participant: Participant,
    pub text: String,
}

impl CollectedAnswer {
    pub fn new(participant: Participant, text: impl Into<String>) -> Self {
        Self {
            participant,
            text: text.into(),
        }
    }
}

/// What a completed batch yielded, in dispatch order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "answers", rename_all = "snake_case")]
pub enum CollectionOutcome {
    /// Nobody answered; the summarizer must not be called
    NoResponses,
    /// Exactly one answer; it is the result as-is
    SingleResponse(CollectedAnswer),
    /// Two or more answers to summarize
    Multiple(Vec<CollectedAnswer>),
}

impl CollectionOutcome {
    pub fn from_answers(mut answers: Vec<CollectedAnswer>) -> Self {
        match answers.len() {
            0 => CollectionOutcome::NoResponses,
            1 => CollectionOutcome::SingleResponse(answers.remove(0)),
            _ => CollectionOutcome::Multiple(answers),
        }
    }

    pub fn answer_count(&self) -> usize {
        match self {
            CollectionOutcome::NoResponses => 0,
            CollectionOutcome::SingleResponse(_) => 1,
            CollectionOutcome::Multiple(answers) => answers.len(),
        }
    }
}

/// Final slot snapshots of a batch plus the derived outcome
#[derive(Debug, Clone)]
pub struct CollectionReport {
    slots: Vec<ResponseSlot>,
    outcome: CollectionOutcome,
}

impl CollectionReport {
    /// Build a report from terminal slots.
    ///
    /// Slots are ordered by their [`SlotId`](crate::slot::SlotId), so the
    /// answers follow dispatch order whatever order they arrived in.
    pub fn new(mut slots: Vec<ResponseSlot>) -> Self {
        slots.sort_by_key(|slot| slot.id());
        let answers = slots
            .iter()
            .filter_map(|slot| {
                slot.answer()
                    .map(|text| CollectedAnswer::new(slot.participant().clone(), text))
            })
            .collect();
        Self {
            outcome: CollectionOutcome::from_answers(answers),
            slots,
        }
    }

    pub fn slots(&self) -> &[ResponseSlot] {
        &self.slots
    }

    pub fn outcome(&self) -> &CollectionOutcome {
        &self.outcome
    }

    pub fn answered_count(&self) -> usize {
        self.outcome.answer_count()
    }

    pub fn timed_out_count(&self) -> usize {
        self.count_where(|state| matches!(state, SlotState::TimedOut))
    }

    pub fn delivery_failed_count(&self) -> usize {
        self.count_where(|state| matches!(state, SlotState::DeliveryFailed(_)))
    }

    pub fn all_terminal(&self) -> bool {
        self.slots.iter().all(ResponseSlot::is_terminal)
    }

    fn count_where(&self, predicate: impl Fn(&SlotState) -> bool) -> usize {
        self.slots.iter().filter(|slot| predicate(slot.state())).count()
    }
}
