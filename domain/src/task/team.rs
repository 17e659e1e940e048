//! Team configuration

use crate::core::ids::TeamId;
use serde::{Deserialize, Serialize};

/// One team taking part in an execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamConfig {
    pub team_id: TeamId,
    /// Display name; defaults to the id
    pub team_name: String,
    /// Leader model override for this team
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Extra instructions appended to the leader's task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl TeamConfig {
    pub fn new(team_id: TeamId) -> Self {
        let team_name = team_id.to_string();
        Self {
            team_id,
            team_name,
            model: None,
            instructions: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.team_name = name;
        }
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_defaults_to_id() {
        let team = TeamConfig::new(TeamId::new("red").unwrap());
        assert_eq!(team.team_name, "red");
    }

    #[test]
    fn test_blank_name_keeps_default() {
        let team = TeamConfig::new(TeamId::new("red").unwrap()).with_name("  ");
        assert_eq!(team.team_name, "red");
        let team = team.with_name("Red Team");
        assert_eq!(team.team_name, "Red Team");
    }
}
