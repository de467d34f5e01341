//! Application layer for confluence
//!
//! This crate contains the response-collection core, use cases and port
//! definitions. It depends only on the domain layer.
//!
//! # Flow
//!
//! ```text
//! ParticipantResolver → PromptDispatcher → ResponseCollector → SummarizeConsensusUseCase
//! ```
//!
//! [`AskGroupUseCase`] drives the whole flow; [`SetRequiredRoleUseCase`]
//! administers the role store consulted before each dispatch.

pub mod batch;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use batch::{Batch, BatchDeadline, SlotSubmitter, SubmissionReceipt, SubmitError};
pub use config::{BehaviorConfig, SummaryParams};
pub use ports::{
    batch_logger::{BatchEvent, BatchEventLogger, NoBatchLogger},
    group_directory::{DirectoryError, GroupDirectory},
    progress::{NoProgress, ProgressNotifier},
    prompt_channel::{DeliveryError, PromptChannel, PromptDelivery},
    role_store::{InMemoryRoleStore, RoleStore, RoleStoreError},
    text_oracle::{GenerationRequest, OracleError, TextOracle},
};
pub use use_cases::ask_group::{AskGroupError, AskGroupInput, AskGroupOutcome, AskGroupUseCase};
pub use use_cases::collect_responses::ResponseCollector;
pub use use_cases::dispatch_prompts::PromptDispatcher;
pub use use_cases::resolve_participants::ParticipantResolver;
pub use use_cases::set_required_role::{SetRequiredRoleError, SetRequiredRoleUseCase};
pub use use_cases::summarize_consensus::SummarizeConsensusUseCase;
