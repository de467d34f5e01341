//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod ask_group;
pub mod collect_responses;
pub mod dispatch_prompts;
pub mod resolve_participants;
pub mod set_required_role;
pub mod summarize_consensus;

#[cfg(test)]
pub(crate) mod test_support;
