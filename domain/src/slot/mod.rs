//! Response slot domain
//!
//! A [`ResponseSlot`] represents one outstanding request to one participant.
//!
//! ```text
//!            submit()           
//!   Pending ──────────▶ Answered
//!      │
//!      ├── expire() ──▶ TimedOut
//!      │
//!      └── fail_delivery() ──▶ DeliveryFailed
//! ```
//!
//! Every terminal state is final: a slot leaves `Pending` exactly once.

mod deadline;
mod state;

pub use deadline::Deadline;
pub use state::{ResponseSlot, SlotError, SlotId, SlotState};
