//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for execution results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Leaderboard, failures and the winning submission
    Summary,
    /// Only the ranked leaderboard
    Leaderboard,
    /// JSON output
    Json,
}

/// CLI arguments for team-arena
#[derive(Parser, Debug)]
#[command(name = "team-arena")]
#[command(author, version, about = "Team Arena - Independent LLM teams compete over improvement rounds")]
#[command(long_about = r#"
Team Arena runs several independent teams against the same task.

Each team works in rounds:
1. Submit: the team's leader produces a submission
2. Evaluate: an evaluator scores it from 0 to 100
3. Judge: after the minimum number of rounds, a judge decides whether
   another round is likely to improve the score

Every round is stored in a SQLite database and the best round of each team
is ranked on the leaderboard.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./arena.toml        Project-level config
3. ~/.config/team-arena/config.toml   Global config

Example:
  team-arena run "Write a limerick about borrow checking" --team alpha --team beta
  team-arena run "Summarize RFC 9110" --min-rounds 2 --max-rounds 4 --output json
  team-arena leaderboard --execution-id 3f2a...
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Path to the round database (overrides [database] path)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Show configuration file locations and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every team against a prompt
    Run(RunArgs),
    /// Show the stored leaderboard of an execution
    Leaderboard(LeaderboardArgs),
    /// Show the live ranking of an execution
    Ranking(RankingArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// The task every team works on
    pub prompt: String,

    /// Team ids to run (can be specified multiple times; replaces [[teams]])
    #[arg(short, long = "team", value_name = "ID")]
    pub teams: Vec<String>,

    /// Rounds every team runs before the judge is consulted
    #[arg(long, value_name = "N")]
    pub min_rounds: Option<u32>,

    /// Upper bound on rounds per team
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<u32>,

    /// Overall execution timeout in seconds (0 = none)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub output: OutputFormat,
}

#[derive(Args, Debug)]
pub struct LeaderboardArgs {
    /// Execution to show
    #[arg(long, value_name = "ID")]
    pub execution_id: String,

    /// Maximum number of teams to show
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub limit: usize,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RankingArgs {
    /// Execution to show
    #[arg(long, value_name = "ID")]
    pub execution_id: String,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
