//! Access control rules
//!
//! Checked strictly before dispatch; nothing here is concurrent.

use crate::participant::{Invoker, RoleId};
use thiserror::Error;

/// The invoker may not run the command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("You don't have the required role '{0}' to use this command.")]
    MissingRole(RoleId),

    #[error("You must be a server administrator to use this command.")]
    NotAdministrator,
}

/// Access policy for group commands
pub struct AccessPolicy;

impl AccessPolicy {
    /// `ask_group` requires the configured role, if any
    pub fn check_ask(required: Option<&RoleId>, invoker: &Invoker) -> Result<(), AccessDenied> {
        match required {
            Some(role) if !invoker.has_role(role) => Err(AccessDenied::MissingRole(role.clone())),
            _ => Ok(()),
        }
    }

    /// Only administrators may change the required role
    pub fn check_admin(invoker: &Invoker) -> Result<(), AccessDenied> {
        if invoker.administrator {
            Ok(())
        } else {
            Err(AccessDenied::NotAdministrator)
        }
    }
}
