//! Team definitions from TOML (`[[teams]]` array)

use arena_domain::{ConfigIssue, ConfigIssueCode, DomainError, TeamConfig, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One `[[teams]]` entry
///
/// # Example
///
/// ```toml
/// [[teams]]
/// id = "concise"
/// name = "Concise Writers"
/// model = "gpt-4o-mini"
/// instructions = "Keep the answer under 200 words."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTeamConfig {
    pub id: String,
    pub name: Option<String>,
    pub model: Option<String>,
    pub instructions: Option<String>,
}

impl FileTeamConfig {
    pub fn to_team_config(&self) -> Result<TeamConfig, DomainError> {
        let mut team = TeamConfig::new(TeamId::new(self.id.trim())?);
        if let Some(name) = &self.name {
            team = team.with_name(name);
        }
        if let Some(model) = self.model.as_ref().filter(|m| !m.trim().is_empty()) {
            team = team.with_model(model);
        }
        if let Some(instructions) = self.instructions.as_ref().filter(|i| !i.trim().is_empty()) {
            team = team.with_instructions(instructions);
        }
        Ok(team)
    }
}

pub(super) fn team_issues(teams: &[FileTeamConfig]) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (index, team) in teams.iter().enumerate() {
        let id = team.id.trim();
        if id.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::BlankTeamId,
                format!("teams[{}]: id cannot be empty", index),
            ));
            continue;
        }
        if !seen.insert(id) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::DuplicateTeam {
                    team_id: id.to_string(),
                },
                format!("teams[{}]: duplicate team id '{}'", index, id),
            ));
        }
        if team.model.as_ref().is_some_and(|m| m.trim().is_empty()) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyModelName {
                    field: format!("teams[{}].model", index),
                },
                format!("teams[{}].model is empty; using models.leader", index),
            ));
        }
    }
    issues
}
