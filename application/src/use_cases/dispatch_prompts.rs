//! Prompt dispatch (fan-out)
//!
//! Creates one slot per participant and delivers a prompt bound to it.
//! A failed delivery fails that slot only; the batch always contains every
//! participant so the collector waits on a complete membership.

use crate::batch::{Batch, BatchDeadline, SlotSubmitter};
use crate::ports::batch_logger::{BatchEvent, BatchEventLogger, NoBatchLogger};
use crate::ports::progress::ProgressNotifier;
use crate::ports::prompt_channel::{PromptChannel, PromptDelivery};
use confluence_domain::{Participant, ParticipantId, Question};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct PromptDispatcher<C: PromptChannel + ?Sized> {
    channel: Arc<C>,
    logger: Arc<dyn BatchEventLogger>,
}

impl<C: PromptChannel + ?Sized> PromptDispatcher<C> {
    pub fn new(channel: Arc<C>) -> Self {
        Self {
            channel,
            logger: Arc::new(NoBatchLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn BatchEventLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Open a batch for `participants` and deliver every prompt.
    ///
    /// The invoker's prompt goes through the channel's acknowledgement path.
    pub async fn dispatch(
        &self,
        question: &Question,
        deadline: BatchDeadline,
        participants: &[Participant],
        invoker: &ParticipantId,
        progress: &dyn ProgressNotifier,
    ) -> Batch {
        let mut batch = Batch::open(question.clone(), deadline);

        info!("Dispatching prompt to {} participants", participants.len());
        progress.on_dispatch_start(participants.len());

        for participant in participants {
            let cell = batch.open_slot(participant.clone());
            let delivery = PromptDelivery::new(SlotSubmitter::new(Arc::clone(&cell)));
            let slot_id = delivery.slot_id();

            let result = if participant.id == *invoker {
                self.channel.deliver_to_invoker(delivery).await
            } else {
                self.channel.deliver(delivery).await
            };

            match result {
                Ok(()) => {
                    debug!("Delivered {} to {}", slot_id, participant);
                    progress.on_prompt_delivered(participant, true);
                    self.logger.log(BatchEvent::new(
                        "prompt_delivered",
                        json!({ "slot": slot_id.index(), "participant": participant.id }),
                    ));
                }
                Err(e) => {
                    warn!("Could not deliver prompt to {}: {}", participant, e);
                    cell.fail_delivery(e.to_string());
                    progress.on_prompt_delivered(participant, false);
                    self.logger.log(BatchEvent::new(
                        "delivery_failed",
                        json!({
                            "slot": slot_id.index(),
                            "participant": participant.id,
                            "error": e.to_string(),
                        }),
                    ));
                }
            }
        }

        batch
    }
}
