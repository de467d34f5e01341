//! Batches and their response slots
//!
//! A [`Batch`] owns one slot cell per participant, all bound to the same
//! deadline. Cells are shared with the prompt channel through
//! [`SlotSubmitter`] handles and awaited by the
//! [`ResponseCollector`](crate::ResponseCollector).

mod cell;

pub use cell::{SlotSubmitter, SubmissionReceipt, SubmitError};
pub(crate) use cell::SlotCell;

use chrono::Utc;
use confluence_domain::{Deadline, DomainError, Participant, Question, ResponseSlot, SlotId};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// A wall-clock [`Deadline`] paired with the monotonic instant it ends at.
///
/// Both clocks are read together when the deadline starts; the slot timer
/// ends when the printed end time passes, however late the batch opens.
#[derive(Debug, Clone, Copy)]
pub struct BatchDeadline {
    deadline: Deadline,
    expires_at: Instant,
}

impl BatchDeadline {
    /// Start a `minutes` long answer window now
    pub fn start(minutes: u32) -> Result<Self, DomainError> {
        let started = Instant::now();
        let deadline = Deadline::from_minutes(minutes, Utc::now())?;
        Ok(Self {
            expires_at: started + deadline.budget(),
            deadline,
        })
    }

    /// Start a `budget` long answer window now
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
            deadline: Deadline::after(budget, Utc::now()),
        }
    }

    pub fn deadline(&self) -> &Deadline {
        &self.deadline
    }

    /// Monotonic instant at which pending slots time out
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }
}

/// The slots created for one ask-group invocation
pub struct Batch {
    question: Question,
    deadline: BatchDeadline,
    cells: Vec<Arc<SlotCell>>,
}

impl Batch {
    /// Open an empty batch bound to an already running deadline
    pub fn open(question: Question, deadline: BatchDeadline) -> Self {
        Self {
            question,
            deadline,
            cells: Vec::new(),
        }
    }

    /// Add a pending slot for `participant`, numbered in dispatch order
    pub(crate) fn open_slot(&mut self, participant: Participant) -> Arc<SlotCell> {
        let slot = ResponseSlot::new(
            SlotId::new(self.cells.len()),
            participant,
            self.question.clone(),
            self.deadline.deadline,
        );
        let cell = SlotCell::new(slot, self.deadline.expires_at);
        self.cells.push(Arc::clone(&cell));
        cell
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn deadline(&self) -> &Deadline {
        &self.deadline.deadline
    }

    /// Monotonic instant at which pending slots time out
    pub fn expires_at(&self) -> Instant {
        self.deadline.expires_at
    }

    /// Current state of every slot, in dispatch order
    pub fn snapshot(&self) -> Vec<ResponseSlot> {
        self.cells.iter().map(|cell| cell.snapshot()).collect()
    }

    pub(crate) fn cells(&self) -> &[Arc<SlotCell>] {
        &self.cells
    }
}
