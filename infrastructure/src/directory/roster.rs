//! Static group directory built from the `[groups]` config sections.
//!
//! Besides answering membership queries, the roster knows each member's
//! roles and administrator flag, which the CLI uses to build the
//! [`Invoker`] of a command.

use async_trait::async_trait;
use confluence_application::{DirectoryError, GroupDirectory};
use confluence_domain::{GroupId, Invoker, Participant, ParticipantId, RoleId};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use crate::config::FileGroupConfig;

#[derive(Debug, Clone)]
struct RosterMember {
    participant: Participant,
    roles: Vec<RoleId>,
    administrator: bool,
    reachable: bool,
}

#[derive(Debug, Default)]
pub struct RosterDirectory {
    groups: HashMap<GroupId, Vec<RosterMember>>,
}

impl RosterDirectory {
    pub fn from_config(groups: &BTreeMap<String, FileGroupConfig>) -> Self {
        let groups = groups
            .iter()
            .map(|(id, group)| {
                let members = group
                    .members
                    .iter()
                    .map(|member| RosterMember {
                        participant: Participant::new(
                            member.id.as_str(),
                            member.display_name.as_str(),
                        ),
                        roles: member.roles.iter().map(|r| RoleId::new(r.as_str())).collect(),
                        administrator: member.administrator,
                        reachable: member.reachable,
                    })
                    .collect();
                (GroupId::new(id.as_str()), members)
            })
            .collect::<HashMap<_, _>>();

        debug!("Roster loaded with {} group(s)", groups.len());
        Self { groups }
    }

    /// The member of `group` whose id or display name is `who`, as an invoker
    pub fn invoker(&self, group: &GroupId, who: &str) -> Option<Invoker> {
        let members = self.groups.get(group)?;
        members
            .iter()
            .find(|m| m.participant.id.as_str() == who)
            .or_else(|| members.iter().find(|m| m.participant.display_name == who))
            .map(|m| {
                let invoker =
                    Invoker::new(m.participant.clone()).with_roles(m.roles.iter().cloned());
                if m.administrator {
                    invoker.as_administrator()
                } else {
                    invoker
                }
            })
    }

    /// Members marked `reachable = false`, across all groups
    pub fn unreachable(&self) -> HashSet<ParticipantId> {
        self.groups
            .values()
            .flatten()
            .filter(|m| !m.reachable)
            .map(|m| m.participant.id.clone())
            .collect()
    }

    pub fn has_group(&self, group: &GroupId) -> bool {
        self.groups.contains_key(group)
    }
}

#[async_trait]
impl GroupDirectory for RosterDirectory {
    async fn members(&self, group: &GroupId) -> Result<Vec<Participant>, DirectoryError> {
        self.groups
            .get(group)
            .map(|members| members.iter().map(|m| m.participant.clone()).collect())
            .ok_or_else(|| DirectoryError::UnknownGroup(group.clone()))
    }
}
