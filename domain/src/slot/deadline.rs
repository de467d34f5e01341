//! Batch deadline value object

use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Absolute instant after which a batch stops accepting answers.
///
/// Set once at batch creation and shared, unchanged, by every slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    ends_at: DateTime<Utc>,
    budget: Duration,
}

impl Deadline {
    /// Deadline `minutes` after `now`
    pub fn from_minutes(minutes: u32, now: DateTime<Utc>) -> Result<Self, DomainError> {
        if minutes == 0 {
            return Err(DomainError::InvalidTimeout);
        }
        Ok(Self::after(Duration::from_secs(u64::from(minutes) * 60), now))
    }

    /// Deadline `budget` after `now`
    pub fn after(budget: Duration, now: DateTime<Utc>) -> Self {
        let delta = chrono::Duration::from_std(budget).unwrap_or(chrono::Duration::MAX);
        let ends_at = now.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { ends_at, budget }
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    /// Total time granted to participants
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Budget rounded down to whole minutes
    pub fn budget_minutes(&self) -> u64 {
        self.budget.as_secs() / 60
    }

    /// Whole minutes left at `now`, never negative
    pub fn minutes_remaining(&self, now: DateTime<Utc>) -> u64 {
        let remaining = (self.ends_at - now).num_seconds().max(0);
        (remaining / 60) as u64
    }

    /// End time as shown in prompts (`%Y-%m-%d %H:%M:%S`)
    pub fn formatted_end(&self) -> String {
        self.ends_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
