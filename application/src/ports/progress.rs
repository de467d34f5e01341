//! Progress notification port
//!
//! Defines the interface for reporting progress while a batch is dispatched,
//! collected and summarized.

use confluence_domain::{CollectionReport, Participant, ResponseSlot};

/// Callback for progress updates during an ask-group run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, chat status message, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called before the first prompt is delivered
    fn on_dispatch_start(&self, total: usize);

    /// Called after each delivery attempt
    fn on_prompt_delivered(&self, participant: &Participant, delivered: bool);

    /// Called when a slot reaches a terminal state
    fn on_slot_resolved(&self, slot: &ResponseSlot);

    /// Called once every slot is terminal
    fn on_collection_complete(&self, report: &CollectionReport);

    fn on_summary_start(&self) {}

    fn on_summary_complete(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_dispatch_start(&self, _total: usize) {}
    fn on_prompt_delivered(&self, _participant: &Participant, _delivered: bool) {}
    fn on_slot_resolved(&self, _slot: &ResponseSlot) {}
    fn on_collection_complete(&self, _report: &CollectionReport) {}
}
