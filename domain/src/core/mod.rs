//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a validated question to pose to the group
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod question;
