//! Participants, groups and roles
//!
//! Identities are opaque to the core: the external collaborator supplies
//! them, the domain only compares and orders them.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Stable identifier of a participant
    ParticipantId
);
string_id!(
    /// Identifier of a group (server, team, channel...)
    GroupId
);
string_id!(
    /// Identifier of a role within a group
    RoleId
);

/// Someone who can receive a prompt and later supply an answer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// The participant invoking a command, with the grants used for access checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoker {
    pub participant: Participant,
    pub roles: Vec<RoleId>,
    pub administrator: bool,
}

impl Invoker {
    pub fn new(participant: Participant) -> Self {
        Self {
            participant,
            roles: Vec::new(),
            administrator: false,
        }
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = RoleId>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    pub fn as_administrator(mut self) -> Self {
        self.administrator = true;
        self
    }

    pub fn has_role(&self, role: &RoleId) -> bool {
        self.roles.contains(role)
    }
}

/// Split a free-form target string into display names.
///
/// Tokens are whitespace separated; a leading `@` mention marker is dropped.
/// Returns `None` when no names remain, meaning "the whole group".
pub fn parse_target_names(target: &str) -> Option<Vec<String>> {
    let names: Vec<String> = target
        .split_whitespace()
        .map(|token| token.trim_start_matches('@'))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() { None } else { Some(names) }
}
