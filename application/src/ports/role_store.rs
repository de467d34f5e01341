//! Role configuration store port
//!
//! Maps a group to the role required to run `ask_group`. Read before every
//! invocation, written only by administrators.

use async_trait::async_trait;
use confluence_domain::{GroupId, RoleId};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoleStoreError {
    #[error("Role store I/O error: {0}")]
    Io(String),

    #[error("Role store is corrupt: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn required_role(&self, group: &GroupId) -> Result<Option<RoleId>, RoleStoreError>;

    async fn set_required_role(&self, group: &GroupId, role: RoleId)
    -> Result<(), RoleStoreError>;
}

/// Non-persistent store, for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct InMemoryRoleStore {
    roles: RwLock<HashMap<GroupId, RoleId>>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(self, group: impl Into<GroupId>, role: impl Into<RoleId>) -> Self {
        self.roles
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(group.into(), role.into());
        self
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn required_role(&self, group: &GroupId) -> Result<Option<RoleId>, RoleStoreError> {
        let roles = self
            .roles
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(roles.get(group).cloned())
    }

    async fn set_required_role(
        &self,
        group: &GroupId,
        role: RoleId,
    ) -> Result<(), RoleStoreError> {
        self.roles
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(group.clone(), role);
        Ok(())
    }
}
