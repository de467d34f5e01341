//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application and domain
//! types after validation.

mod ask;
mod groups;
mod logging;
mod oracle;
mod output;
mod roles;

pub use ask::FileAskConfig;
pub use groups::{FileGroupConfig, FileMemberConfig};
pub use logging::FileLoggingConfig;
pub use oracle::FileOracleConfig;
pub use output::FileOutputConfig;
pub use roles::FileRolesConfig;

use confluence_application::{BehaviorConfig, SummaryParams};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("ask.default_timeout_minutes cannot be 0")]
    ZeroTimeout,

    #[error("ask.chunk_size cannot be 0")]
    ZeroChunkSize,

    #[error("oracle.max_tokens cannot be 0")]
    ZeroMaxTokens,

    #[error("oracle.temperature must be between 0.0 and 2.0, got {0}")]
    TemperatureOutOfRange(f32),

    #[error("groups.{group}: member {index} has an empty {field}")]
    EmptyMemberField {
        group: String,
        index: usize,
        field: &'static str,
    },

    #[error("groups.{group}: display_name {name:?} is used by more than one member")]
    DuplicateDisplayName { group: String, name: String },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Batch settings
    pub ask: FileAskConfig,
    /// Text-generation oracle settings
    pub oracle: FileOracleConfig,
    /// Role store settings
    pub roles: FileRolesConfig,
    /// Batch event log settings
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Group rosters, keyed by group id
    pub groups: BTreeMap<String, FileGroupConfig>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.ask.default_timeout_minutes == 0 {
            issues.push(ConfigValidationError::ZeroTimeout);
        }
        if self.ask.chunk_size == 0 {
            issues.push(ConfigValidationError::ZeroChunkSize);
        }
        if self.oracle.max_tokens == 0 {
            issues.push(ConfigValidationError::ZeroMaxTokens);
        }
        if !(0.0..=2.0).contains(&self.oracle.temperature) {
            issues.push(ConfigValidationError::TemperatureOutOfRange(
                self.oracle.temperature,
            ));
        }

        for (group, config) in &self.groups {
            let mut names = BTreeSet::new();
            for (index, member) in config.members.iter().enumerate() {
                if member.id.trim().is_empty() {
                    issues.push(ConfigValidationError::EmptyMemberField {
                        group: group.clone(),
                        index,
                        field: "id",
                    });
                }
                if member.display_name.trim().is_empty() {
                    issues.push(ConfigValidationError::EmptyMemberField {
                        group: group.clone(),
                        index,
                        field: "display_name",
                    });
                } else if !names.insert(member.display_name.as_str()) {
                    issues.push(ConfigValidationError::DuplicateDisplayName {
                        group: group.clone(),
                        name: member.display_name.clone(),
                    });
                }
            }
        }

        issues
    }

    /// Use case behavior derived from `[ask]` and `[oracle]`
    pub fn behavior_config(&self) -> BehaviorConfig {
        BehaviorConfig::default()
            .with_default_timeout_minutes(self.ask.default_timeout_minutes)
            .with_grace_seconds(self.ask.grace_seconds)
            .with_summary(SummaryParams {
                max_tokens: self.oracle.max_tokens,
                temperature: self.oracle.temperature,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[ask]
default_timeout_minutes = 30
grace_seconds = 2
chunk_size = 1500

[oracle]
base_url = "http://localhost:8080"
model = "gpt-4o-mini"
max_tokens = 300
temperature = 0.2

[roles]
store_path = "/var/lib/confluence/roles.json"

[logging]
batch_log = "batches.jsonl"

[output]
color = false

[groups.team]
members = [{ id = "u1", display_name = "alice" }]
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ask.default_timeout_minutes, 30);
        assert_eq!(config.ask.chunk_size, 1500);
        assert_eq!(config.oracle.base_url, "http://localhost:8080");
        assert_eq!(config.oracle.model, "gpt-4o-mini");
        assert_eq!(
            config.roles.store_path.to_string_lossy(),
            "/var/lib/confluence/roles.json"
        );
        assert_eq!(
            config.logging.batch_log.as_deref().map(|p| p.to_string_lossy().into_owned()),
            Some("batches.jsonl".to_string())
        );
        assert!(!config.output.color);
        assert_eq!(config.groups["team"].members[0].display_name, "alice");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[oracle]
model = "gpt-4o"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.oracle.model, "gpt-4o");
        // Defaults should apply
        assert_eq!(config.oracle.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.ask.default_timeout_minutes, 45);
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let toml_str = r#"
[ask]
default_timeout_minutes = 0
chunk_size = 0

[oracle]
max_tokens = 0
temperature = 3.5

[groups.team]
members = [{ id = "u1", display_name = "  " }]
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();

        assert_eq!(
            issues,
            vec![
                ConfigValidationError::ZeroTimeout,
                ConfigValidationError::ZeroChunkSize,
                ConfigValidationError::ZeroMaxTokens,
                ConfigValidationError::TemperatureOutOfRange(3.5),
                ConfigValidationError::EmptyMemberField {
                    group: "team".to_string(),
                    index: 0,
                    field: "display_name",
                },
            ]
        );
    }

    #[test]
    fn test_validate_rejects_shared_display_name() {
        let toml_str = r#"
[groups.team]
members = [
    { id = "u1", display_name = "sam" },
    { id = "u2", display_name = "alex" },
    { id = "u3", display_name = "sam" },
]

[groups.other]
members = [{ id = "u1", display_name = "sam" }]
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(
            config.validate(),
            vec![ConfigValidationError::DuplicateDisplayName {
                group: "team".to_string(),
                name: "sam".to_string(),
            }]
        );
    }

    #[test]
    fn test_behavior_config_conversion() {
        let toml_str = r#"
[ask]
default_timeout_minutes = 15
grace_seconds = 1

[oracle]
max_tokens = 256
temperature = 1.0
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let behavior = config.behavior_config();

        assert_eq!(behavior.default_timeout_minutes, 15);
        assert_eq!(behavior.grace, std::time::Duration::from_secs(1));
        assert_eq!(behavior.summary.max_tokens, 256);
        assert_eq!(behavior.summary.temperature, 1.0);
    }
}
