//! Group membership port

use async_trait::async_trait;
use confluence_domain::{GroupId, Participant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Unknown group: {0}")]
    UnknownGroup(GroupId),

    #[error("Membership source unavailable: {0}")]
    Unavailable(String),
}

/// Read-only view of group membership
#[async_trait]
pub trait GroupDirectory: Send + Sync {
    /// Every member of the group
    async fn members(&self, group: &GroupId) -> Result<Vec<Participant>, DirectoryError>;

    /// The member whose display name is exactly `name` (case-sensitive)
    async fn find_by_display_name(
        &self,
        group: &GroupId,
        name: &str,
    ) -> Result<Option<Participant>, DirectoryError> {
        Ok(self
            .members(group)
            .await?
            .into_iter()
            .find(|member| member.display_name == name))
    }
}
