//! Port for structured batch event logging.
//!
//! Defines the [`BatchEventLogger`] trait for recording what happened to a
//! batch (deliveries, failures, resolutions, summaries) in a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures batch
//! history in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured batch event for logging.
pub struct BatchEvent {
    /// Event type identifier (e.g., "batch_started", "delivery_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl BatchEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging batch events.
///
/// `log` is synchronous and infallible; a logging failure never affects the
/// batch.
pub trait BatchEventLogger: Send + Sync {
    fn log(&self, event: BatchEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoBatchLogger;

impl BatchEventLogger for NoBatchLogger {
    fn log(&self, _event: BatchEvent) {}
}
