//! Domain layer for confluence
//!
//! This crate contains the core business rules of group consensus gathering.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Batch
//!
//! One `ask_group` invocation broadcasts a question to a set of participants.
//! Every participant gets a [`ResponseSlot`]; all slots of a batch share one
//! [`Deadline`].
//!
//! ## Collection Outcome
//!
//! Once every slot is terminal, the answered slots are folded into a
//! [`CollectionOutcome`]:
//!
//! - **NoResponses**: nobody answered, nothing to summarize
//! - **SingleResponse**: the lone answer is the result
//! - **Multiple**: two or more answers go to the consensus summarizer

pub mod access;
pub mod chunking;
pub mod collection;
pub mod consensus;
pub mod core;
pub mod participant;
pub mod prompt;
pub mod slot;
pub mod util;

// Re-export commonly used types
pub use access::{AccessDenied, AccessPolicy};
pub use chunking::{DEFAULT_CHUNK_SIZE, chunk_text};
pub use collection::{CollectedAnswer, CollectionOutcome, CollectionReport};
pub use consensus::{ConsensusRequest, ConsensusResult};
pub use core::{error::DomainError, question::Question};
pub use participant::{GroupId, Invoker, Participant, ParticipantId, RoleId, parse_target_names};
pub use prompt::PromptTemplate;
pub use slot::{Deadline, ResponseSlot, SlotError, SlotId, SlotState};
