//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as the default answer window and the oracle sampling parameters.

use std::time::Duration;

/// Sampling parameters for the consensus summary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryParams {
    /// Upper bound on generated output, in tokens
    pub max_tokens: u32,
    /// Randomness of the oracle output
    pub temperature: f32,
}

impl Default for SummaryParams {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.6,
        }
    }
}

/// Application behavior configuration.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Answer window when the invoker gives none
    pub default_timeout_minutes: u32,
    /// Extra time the collector allows past the deadline for in-flight submissions
    pub grace: Duration,
    pub summary: SummaryParams,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            default_timeout_minutes: 45,
            grace: Duration::from_secs(5),
            summary: SummaryParams::default(),
        }
    }
}

impl BehaviorConfig {
    pub fn with_grace_seconds(mut self, seconds: u64) -> Self {
        self.grace = Duration::from_secs(seconds);
        self
    }

    pub fn with_default_timeout_minutes(mut self, minutes: u32) -> Self {
        self.default_timeout_minutes = minutes;
        self
    }

    pub fn with_summary(mut self, summary: SummaryParams) -> Self {
        self.summary = summary;
        self
    }
}
