//! Progress reporting for arena executions

use arena_application::ArenaProgressNotifier;
use arena_domain::{ExitReason, TeamId};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;

/// Reports progress with one bar per team
///
/// Bars count rounds against `max_rounds`; a team that stops early is
/// finished at whatever round it reached.
pub struct ProgressReporter {
    multi: MultiProgress,
    max_rounds: u32,
    bars: Mutex<HashMap<TeamId, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new(max_rounds: u32) -> Self {
        Self {
            multi: MultiProgress::new(),
            max_rounds,
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn team_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, team_id: &TeamId, f: impl FnOnce(&ProgressBar)) {
        if let Ok(bars) = self.bars.lock()
            && let Some(bar) = bars.get(team_id)
        {
            f(bar);
        }
    }
}

impl ArenaProgressNotifier for ProgressReporter {
    fn on_execution_start(&self, total_teams: usize) {
        let _ = self.multi.println(format!(
            "{} {} ({} teams)",
            "->".cyan(),
            "Running teams".bold(),
            total_teams
        ));
    }

    fn on_team_start(&self, team_id: &TeamId, team_name: &str) {
        let bar = self
            .multi
            .add(ProgressBar::new(u64::from(self.max_rounds)));
        bar.set_style(Self::team_style());
        bar.set_prefix(team_name.to_string());
        bar.set_message("Starting...");
        if let Ok(mut bars) = self.bars.lock() {
            bars.insert(team_id.clone(), bar);
        }
    }

    fn on_round_complete(&self, team_id: &TeamId, round_number: u32, score: f64) {
        self.with_bar(team_id, |bar| {
            bar.set_position(u64::from(round_number));
            bar.set_message(format!("round {}: {:.1}", round_number, score));
        });
    }

    fn on_judgment(&self, team_id: &TeamId, _round_number: u32, should_continue: bool) {
        if should_continue {
            self.with_bar(team_id, |bar| bar.set_message("judge: continue"));
        }
    }

    fn on_team_finished(&self, team_id: &TeamId, best_score: f64, reason: ExitReason) {
        self.with_bar(team_id, |bar| {
            bar.finish_with_message(format!(
                "{} best {:.1} ({})",
                "v".green(),
                best_score,
                reason
            ));
        });
    }

    fn on_team_failed(&self, team_id: &TeamId, error: &str) {
        self.with_bar(team_id, |bar| {
            bar.abandon_with_message(format!("{} {}", "x".red(), error));
        });
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ArenaProgressNotifier for SimpleProgress {
    fn on_execution_start(&self, total_teams: usize) {
        eprintln!("{} {} ({} teams)", "->".cyan(), "Running teams".bold(), total_teams);
    }

    fn on_team_start(&self, team_id: &TeamId, team_name: &str) {
        eprintln!("  {} {} started", team_id.as_str().bold(), team_name);
    }

    fn on_round_complete(&self, team_id: &TeamId, round_number: u32, score: f64) {
        eprintln!("  {} round {}: {:.1}", team_id, round_number, score);
    }

    fn on_team_finished(&self, team_id: &TeamId, best_score: f64, reason: ExitReason) {
        eprintln!(
            "  {} {} best {:.1} ({})",
            "v".green(),
            team_id,
            best_score,
            reason
        );
    }

    fn on_team_failed(&self, team_id: &TeamId, error: &str) {
        eprintln!("  {} {} failed: {}", "x".red(), team_id, error);
    }

    fn on_execution_complete(&self) {
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_tracks_bars_per_team() {
        let reporter = ProgressReporter::new(3);
        let alpha = TeamId::new("alpha").unwrap();

        reporter.on_team_start(&alpha, "Alpha");
        reporter.on_round_complete(&alpha, 2, 55.0);

        let bars = reporter.bars.lock().unwrap();
        assert_eq!(bars[&alpha].position(), 2);
        assert_eq!(bars[&alpha].length(), Some(3));
    }

    #[test]
    fn test_unknown_team_is_ignored() {
        let reporter = ProgressReporter::new(3);
        reporter.on_round_complete(&TeamId::new("ghost").unwrap(), 1, 10.0);
        assert!(reporter.bars.lock().unwrap().is_empty());
    }
}
