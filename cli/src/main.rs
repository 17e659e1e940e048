//! CLI entrypoint for Team Arena
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use arena_application::{
    ArenaPorts, ArenaProgressNotifier, LlmEvaluator, LlmGateway, LlmJudge, LlmLeader, NoProgress,
    NoRunEventLogger, RoundStore, RunArenaInput, RunArenaUseCase, RunEventLogger,
};
use arena_domain::{ExecutionId, RoundBounds, Severity, TeamConfig, TeamId};
use arena_infrastructure::{
    ConfigLoader, FileConfig, JsonlRunEventLogger, OpenAiGateway, OpenAiSettings,
    SqliteRoundStore, StoreOptions,
};
use arena_presentation::{
    Cli, Command, ConsoleFormatter, LeaderboardArgs, OutputFormat, ProgressReporter, RankingArgs,
    RunArgs, SimpleProgress,
};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    let _log_guard = init_logging(cli.verbose, config.logging.log_dir.as_deref());
    info!("Starting Team Arena");

    if cli.show_config {
        show_config(cli.config.as_deref(), &config)?;
        return Ok(());
    }

    check_config(&config)?;

    let Some(command) = cli.command else {
        bail!("No command given. Try `team-arena run <PROMPT>` or `team-arena --help`.");
    };

    // === Dependency Injection ===
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.database.resolved_path());
    let store = Arc::new(
        SqliteRoundStore::open(
            &db_path,
            StoreOptions::default().with_retry(config.database.retry_policy()),
        )
        .with_context(|| format!("Failed to open database {}", db_path.display()))?,
    );

    let result = match command {
        Command::Run(args) => run(args, &config, store.clone(), cli.quiet).await,
        Command::Leaderboard(args) => leaderboard(args, store.as_ref()).await,
        Command::Ranking(args) => ranking(args, store.as_ref()).await,
    };

    if let Err(e) = store.close().await {
        warn!("Failed to checkpoint database: {}", e);
    }
    result
}

/// Initialize logging based on verbosity level, plus an optional daily log file
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "team-arena.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

/// Print warnings and fail on configuration errors
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in issues.iter().filter(|i| i.severity == Severity::Warning) {
        eprintln!("warning: {}", issue.message);
    }
    let errors: Vec<&str> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| i.message.as_str())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }
    Ok(())
}

fn show_config(config_path: Option<&Path>, config: &FileConfig) -> Result<()> {
    println!("Configuration sources (in priority order):");
    for source in ConfigLoader::sources(config_path) {
        let marker = if source.found { "FOUND" } else { "     " };
        println!("  [{}] {:<8} {}", marker, source.label, source.path.display());
    }
    println!("  [     ] Env      ARENA_<SECTION>__<KEY>");
    println!("  [     ] Default  built-in defaults");

    for issue in config.validate() {
        println!("  {:?}: {}", issue.severity, issue.message);
    }

    println!("\nMerged configuration:\n");
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// `--team` ids, resolved against `[[teams]]` entries with the same id
fn select_teams(requested: &[String], config: &FileConfig) -> Result<Vec<TeamConfig>> {
    let configured = config.team_configs()?;
    if requested.is_empty() {
        return Ok(configured);
    }

    requested
        .iter()
        .map(|id| -> Result<TeamConfig> {
            let team_id = TeamId::new(id.trim())?;
            Ok(configured
                .iter()
                .find(|team| team.team_id == team_id)
                .cloned()
                .unwrap_or_else(|| TeamConfig::new(team_id)))
        })
        .collect()
}

async fn run(
    args: RunArgs,
    config: &FileConfig,
    store: Arc<SqliteRoundStore>,
    quiet: bool,
) -> Result<()> {
    let mut params = config.execution_params()?;
    let bounds = RoundBounds::new(
        args.min_rounds.unwrap_or(params.bounds.min_rounds()),
        args.max_rounds.unwrap_or(params.bounds.max_rounds()),
    )?;
    params = params.with_bounds(bounds);
    if let Some(secs) = args.timeout {
        params = params.with_overall_timeout((secs > 0).then(|| Duration::from_secs(secs)));
    }

    let teams = select_teams(&args.teams, config)?;
    if teams.is_empty() {
        bail!("No teams configured. Pass --team <ID> or add [[teams]] to the config file.");
    }

    let openai = &config.providers.openai;
    let api_key = openai.resolve_api_key();
    if api_key.is_none() {
        warn!(
            "No API key in ${} or providers.openai.api_key; sending unauthenticated requests",
            openai.api_key_env
        );
    }
    let gateway: Arc<dyn LlmGateway> = Arc::new(OpenAiGateway::new(OpenAiSettings {
        base_url: openai.base_url.clone(),
        api_key,
        max_tokens: openai.max_tokens,
        request_timeout: Duration::from_secs(openai.request_timeout_secs),
    })?);

    let execution_id = ExecutionId::generate();
    let events: Arc<dyn RunEventLogger> = match config
        .logging
        .event_log_dir
        .as_ref()
        .and_then(|dir| JsonlRunEventLogger::for_execution(dir, &execution_id))
    {
        Some(logger) => {
            info!("Writing run events to {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoRunEventLogger),
    };

    let progress: Arc<dyn ArenaProgressNotifier> = if quiet || args.output == OutputFormat::Json
    {
        Arc::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Arc::new(ProgressReporter::new(bounds.max_rounds()))
    } else {
        Arc::new(SimpleProgress)
    };

    let store: Arc<dyn RoundStore> = store;
    let ports = ArenaPorts {
        leader: Arc::new(LlmLeader::new(gateway.clone(), &config.models.leader)),
        evaluator: Arc::new(LlmEvaluator::new(gateway.clone(), &config.models.evaluator)),
        judge: Arc::new(LlmJudge::new(gateway, &config.models.judge)),
        store,
        progress,
        events,
    };
    let use_case = RunArenaUseCase::new(ports, params);

    // Ctrl-C stops every team the same way the overall timeout does
    let cancellation = CancellationToken::new();
    let interrupt = {
        let token = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling teams");
                token.cancel();
            }
        })
    };

    info!(execution_id = %execution_id, teams = teams.len(), "Starting execution");
    let input = RunArenaInput::new(args.prompt, teams).with_execution_id(execution_id);
    let summary = use_case.execute_with_cancellation(input, cancellation).await;
    interrupt.abort();
    let summary = summary?;

    let output = match args.output {
        OutputFormat::Summary => ConsoleFormatter::format(&summary),
        OutputFormat::Leaderboard => ConsoleFormatter::format_leaderboard(&summary),
        OutputFormat::Json => ConsoleFormatter::format_json(&summary),
    };
    println!("{}", output);

    if summary.all_failed() {
        bail!("All {} teams failed", summary.total_teams);
    }
    Ok(())
}

async fn leaderboard(args: LeaderboardArgs, store: &SqliteRoundStore) -> Result<()> {
    let execution_id = ExecutionId::new(args.execution_id);
    let entries = store.get_leaderboard(&execution_id, args.limit).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", ConsoleFormatter::format_entries(&entries));
    }
    Ok(())
}

async fn ranking(args: RankingArgs, store: &SqliteRoundStore) -> Result<()> {
    let execution_id = ExecutionId::new(args.execution_id);
    let rankings = store.get_ranking(&execution_id).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rankings)?);
    } else {
        print!("{}", ConsoleFormatter::format_rankings(&rankings));
    }
    Ok(())
}
