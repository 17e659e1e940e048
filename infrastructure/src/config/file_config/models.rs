//! Role-based model configuration from TOML (`[models]` section)

use arena_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Model used by each collaborator role
///
/// # Example
///
/// ```toml
/// [models]
/// leader = "gpt-4o"            # Default for teams without their own model
/// evaluator = "gpt-4o-mini"
/// judge = "gpt-4o-mini"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub leader: String,
    pub evaluator: String,
    pub judge: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            leader: "gpt-4o".to_string(),
            evaluator: "gpt-4o-mini".to_string(),
            judge: "gpt-4o-mini".to_string(),
        }
    }
}

impl FileModelsConfig {
    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        [
            ("leader", &self.leader),
            ("evaluator", &self.evaluator),
            ("judge", &self.judge),
        ]
        .into_iter()
        .filter(|(_, model)| model.trim().is_empty())
        .map(|(field, _)| {
            ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: format!("models.{}", field),
                },
                format!("models.{}: model name cannot be empty", field),
            )
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_model_names() {
        let models = FileModelsConfig {
            evaluator: "  ".to_string(),
            ..Default::default()
        };
        let issues = models.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::EmptyModelName {
                field: "models.evaluator".to_string()
            }
        );
    }
}
