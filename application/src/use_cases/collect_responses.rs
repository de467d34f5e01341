//! Response collection (fan-in)
//!
//! Waits on every slot of a batch concurrently. Each slot races its own
//! submission against the shared deadline; the batch completes when all
//! races are decided. Output order is dispatch order.

use crate::batch::Batch;
use crate::ports::progress::ProgressNotifier;
use confluence_domain::CollectionReport;
use futures::future::join_all;
use std::time::Duration;
use tracing::{info, warn};

pub struct ResponseCollector {
    grace: Duration,
}

impl ResponseCollector {
    pub fn new(grace: Duration) -> Self {
        Self { grace }
    }

    /// Block until every slot is terminal, then fold the answers.
    ///
    /// Never returns while a slot is pending, and never waits longer than
    /// the deadline plus the grace window.
    pub async fn collect(&self, batch: Batch, progress: &dyn ProgressNotifier) -> CollectionReport {
        let hard_stop = batch.expires_at() + self.grace;

        let waits = batch.cells().iter().map(|cell| async move {
            let slot = cell.wait().await;
            progress.on_slot_resolved(&slot);
            slot
        });

        let slots = match tokio::time::timeout_at(hard_stop, join_all(waits)).await {
            Ok(slots) => slots,
            Err(_) => {
                warn!(
                    "Collection exceeded its grace window; expiring pending slots of {}",
                    batch.question()
                );
                batch
                    .cells()
                    .iter()
                    .map(|cell| {
                        cell.expire();
                        cell.snapshot()
                    })
                    .collect()
            }
        };

        let report = CollectionReport::new(slots);
        info!(
            "Collected {} answers ({} timed out, {} undelivered)",
            report.answered_count(),
            report.timed_out_count(),
            report.delivery_failed_count()
        );
        progress.on_collection_complete(&report);
        report
    }
}

impl Default for ResponseCollector {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}
