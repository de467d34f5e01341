//! Set Required Role use case
//!
//! Administrative command that configures which role may run `ask_group`
//! in a group.

use crate::ports::role_store::{RoleStore, RoleStoreError};
use confluence_domain::{AccessDenied, AccessPolicy, GroupId, Invoker, RoleId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum SetRequiredRoleError {
    #[error("Access denied: {0}")]
    AccessDenied(#[from] AccessDenied),

    #[error("Could not save the required role: {0}")]
    RoleStore(#[from] RoleStoreError),
}

pub struct SetRequiredRoleUseCase<R: RoleStore + ?Sized> {
    store: Arc<R>,
}

impl<R: RoleStore + ?Sized> SetRequiredRoleUseCase<R> {
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Require `role` for `ask_group` in `group`; administrators only
    pub async fn execute(
        &self,
        group: &GroupId,
        invoker: &Invoker,
        role: RoleId,
    ) -> Result<(), SetRequiredRoleError> {
        if let Err(denied) = AccessPolicy::check_admin(invoker) {
            warn!(
                "{} tried to set the required role of {} without administrator rights",
                invoker.participant, group
            );
            return Err(denied.into());
        }

        self.store.set_required_role(group, role.clone()).await?;
        info!("Required role for {} set to {}", group, role);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::role_store::InMemoryRoleStore;
    use crate::use_cases::test_support::member;

    #[tokio::test]
    async fn test_admin_sets_role() {
        let store = Arc::new(InMemoryRoleStore::new());
        let use_case = SetRequiredRoleUseCase::new(Arc::clone(&store));
        let group = GroupId::new("g");

        use_case
            .execute(
                &group,
                &Invoker::new(member("alice")).as_administrator(),
                RoleId::new("voters"),
            )
            .await
            .unwrap();

        assert_eq!(
            store.required_role(&group).await.unwrap(),
            Some(RoleId::new("voters"))
        );
    }

    #[tokio::test]
    async fn test_non_admin_rejected_and_store_untouched() {
        let store = Arc::new(InMemoryRoleStore::new());
        let use_case = SetRequiredRoleUseCase::new(Arc::clone(&store));
        let group = GroupId::new("g");

        let err = use_case
            .execute(&group, &Invoker::new(member("bob")), RoleId::new("voters"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SetRequiredRoleError::AccessDenied(AccessDenied::NotAdministrator)
        ));
        assert_eq!(store.required_role(&group).await.unwrap(), None);
    }
}
