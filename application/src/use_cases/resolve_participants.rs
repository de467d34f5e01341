//! Participant resolution
//!
//! Turns a group and an optional list of display names into the ordered,
//! duplicate-free set of participants to query.

use crate::ports::group_directory::{DirectoryError, GroupDirectory};
use confluence_domain::{GroupId, Participant};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

pub struct ParticipantResolver<D: GroupDirectory + ?Sized> {
    directory: Arc<D>,
}

impl<D: GroupDirectory + ?Sized> ParticipantResolver<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Resolve the participants of one batch.
    ///
    /// With `names`, each name is matched exactly against the membership
    /// and unmatched names are dropped; without, the whole group is used.
    /// The invoker is always included, appended last when not already
    /// present.
    pub async fn resolve(
        &self,
        group: &GroupId,
        invoker: &Participant,
        names: Option<&[String]>,
    ) -> Result<Vec<Participant>, DirectoryError> {
        let candidates = match names {
            Some(names) => {
                let mut found = Vec::with_capacity(names.len());
                for name in names {
                    match self.directory.find_by_display_name(group, name).await? {
                        Some(member) => found.push(member),
                        None => debug!("No member of {} is named {:?}", group, name),
                    }
                }
                found
            }
            None => self.directory.members(group).await?,
        };

        let mut seen = HashSet::new();
        let mut participants: Vec<Participant> = candidates
            .into_iter()
            .filter(|member| seen.insert(member.id.clone()))
            .collect();

        if !seen.contains(&invoker.id) {
            participants.push(invoker.clone());
        }

        Ok(participants)
    }
}
