//! Console output formatter

use super::formatter::OutputFormatter;
use arena_domain::{ExecutionSummary, FailedTeamInfo, LeaderBoardEntry, TeamRanking};
use colored::Colorize;

/// Formats execution results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete execution summary
    pub fn format(summary: &ExecutionSummary) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Team Arena Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Prompt:".cyan().bold(),
            summary.user_prompt
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Execution:".cyan().bold(),
            summary.execution_id
        ));
        output.push_str(&format!(
            "{} {} total, {} succeeded, {} failed ({:.1}s)\n",
            "Teams:".cyan().bold(),
            summary.total_teams,
            summary.succeeded,
            summary.failed,
            summary.duration_ms() as f64 / 1000.0
        ));

        output.push_str(&Self::section_header("Leaderboard"));
        if summary.results.is_empty() {
            output.push_str(&format!("{}\n", "No team produced a result.".yellow()));
        } else {
            output.push_str(&Self::entries_table(&summary.results));
        }

        if !summary.failed_teams.is_empty() {
            output.push_str(&Self::section_header("Failed Teams"));
            for failure in &summary.failed_teams {
                output.push_str(&Self::failure_line(failure));
            }
        }

        if let Some(best) = &summary.best {
            output.push_str(&Self::section_header("Best Submission"));
            output.push_str(&format!(
                "\n{}\n\n{}\n",
                format!(
                    "── {} ({}) round {}: {:.1} ──",
                    best.team_name,
                    best.team_id,
                    best.round_number,
                    best.score.value()
                )
                .yellow()
                .bold(),
                best.submission_content
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(summary: &ExecutionSummary) -> String {
        serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
    }

    /// Leaderboard of a finished execution
    pub fn format_leaderboard(summary: &ExecutionSummary) -> String {
        Self::format_entries(&summary.results)
    }

    /// Stored leaderboard rows, best first
    pub fn format_entries(entries: &[LeaderBoardEntry]) -> String {
        if entries.is_empty() {
            return format!("{}\n", "No leaderboard entries.".yellow());
        }
        let mut output = format!(
            "{}\n{}\n",
            "=== Leaderboard ===".cyan().bold(),
            Self::entries_table(entries)
        );
        if let Some(first) = entries.first() {
            output.push_str(&format!("{} {}\n", "Execution:".dimmed(), first.execution_id));
        }
        output
    }

    /// Live ranking rows, best first
    pub fn format_rankings(rankings: &[TeamRanking]) -> String {
        if rankings.is_empty() {
            return format!("{}\n", "No ranked teams.".yellow());
        }
        let mut output = format!(
            "{}\n{:>4}  {:<24} {:>7} {:>7}\n",
            "=== Ranking ===".cyan().bold(),
            "#",
            "Team",
            "Best",
            "Rounds"
        );
        for (index, ranking) in rankings.iter().enumerate() {
            output.push_str(&format!(
                "{:>4}  {:<24} {:>7.1} {:>7}\n",
                index + 1,
                Self::truncate(&ranking.team_name, 24),
                ranking.max_score.value(),
                ranking.total_rounds
            ));
        }
        output
    }

    fn entries_table(entries: &[LeaderBoardEntry]) -> String {
        let mut output = format!(
            "{:>4}  {:<24} {:>7} {:>6}  {}\n",
            "#", "Team", "Score", "Round", "Exit"
        );
        for (index, entry) in entries.iter().enumerate() {
            let exit = entry.exit_reason.map(|r| r.as_str()).unwrap_or("-");
            let line = format!(
                "{:>4}  {:<24} {:>7.1} {:>6}  {}",
                index + 1,
                Self::truncate(&entry.team_name, 24),
                entry.score.value(),
                entry.round_number,
                exit
            );
            if index == 0 {
                output.push_str(&format!("{}\n", line.green().bold()));
            } else {
                output.push_str(&format!("{}\n", line));
            }
        }
        output
    }

    fn failure_line(failure: &FailedTeamInfo) -> String {
        let round = failure
            .failed_round
            .map(|r| format!(" in round {}", r))
            .unwrap_or_default();
        format!(
            "  {} {} ({}){}: {}\n",
            "x".red(),
            failure.team_name,
            failure.team_id,
            round,
            failure.error
        )
    }

    fn truncate(text: &str, width: usize) -> String {
        if text.chars().count() <= width {
            text.to_string()
        } else {
            let kept: String = text.chars().take(width.saturating_sub(1)).collect();
            format!("{}…", kept)
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, summary: &ExecutionSummary) -> String {
        Self::format(summary)
    }

    fn format_json(&self, summary: &ExecutionSummary) -> String {
        Self::format_json(summary)
    }

    fn format_leaderboard(&self, summary: &ExecutionSummary) -> String {
        Self::format_leaderboard(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_domain::{ExecutionId, ExitReason, Score, TeamId};
    use chrono::Utc;

    fn entry(team: &str, score: f64) -> LeaderBoardEntry {
        let now = Utc::now();
        LeaderBoardEntry {
            execution_id: ExecutionId::new("exec-1"),
            team_id: TeamId::new(team).unwrap(),
            team_name: team.to_string(),
            round_number: 2,
            submission_content: format!("{team} submission"),
            score: Score::new(score).unwrap(),
            score_details: serde_json::json!({}),
            final_submission: true,
            exit_reason: Some(ExitReason::MaxRoundsReached),
            created_at: now,
            updated_at: now,
        }
    }

    fn summary() -> ExecutionSummary {
        let now = Utc::now();
        ExecutionSummary::new(
            ExecutionId::new("exec-1"),
            "Write a haiku",
            vec![entry("alpha", 88.0), entry("beta", 61.5)],
            vec![
                FailedTeamInfo::new(TeamId::new("gamma").unwrap(), "gamma", "leader exploded")
                    .in_round(1),
            ],
            now,
            now,
        )
    }

    #[test]
    fn test_format_summary() {
        let output = ConsoleFormatter::format(&summary());
        assert!(output.contains("Write a haiku"));
        assert!(output.contains("alpha"));
        assert!(output.contains("88.0"));
        assert!(output.contains("leader exploded"));
        assert!(output.contains(" in round 1"));
        assert!(output.contains("alpha submission"));
    }

    #[test]
    fn test_format_json_round_trips() {
        let json = ConsoleFormatter::format_json(&summary());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["results"][0]["team_id"], "alpha");
        assert_eq!(value["failed_teams"][0]["team_id"], "gamma");
    }

    #[test]
    fn test_format_rankings() {
        let rankings = vec![TeamRanking {
            team_id: TeamId::new("alpha").unwrap(),
            team_name: "Alpha".to_string(),
            max_score: Score::new(75.0).unwrap(),
            total_rounds: 3,
        }];
        let output = ConsoleFormatter::format_rankings(&rankings);
        assert!(output.contains("Alpha"));
        assert!(output.contains("75.0"));
    }

    #[test]
    fn test_empty_entries() {
        assert!(ConsoleFormatter::format_entries(&[]).contains("No leaderboard entries."));
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(ConsoleFormatter::truncate("abcdef", 4), "abc…");
        assert_eq!(ConsoleFormatter::truncate("abc", 4), "abc");
    }
}
