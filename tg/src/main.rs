//! tg - gather markdown task list items into one TODO file

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use todogather::cli::Cli;
use todogather::config::Config;
use todogather::pipeline::{self, RunSummary, StopToken};

fn parse_level(level: &str) -> tracing::Level {
    match level.to_uppercase().as_str() {
        "TRACE" => tracing::Level::TRACE,
        "DEBUG" => tracing::Level::DEBUG,
        "INFO" => tracing::Level::INFO,
        "WARN" | "WARNING" => tracing::Level::WARN,
        "ERROR" => tracing::Level::ERROR,
        other => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to WARN", other);
            tracing::Level::WARN
        }
    }
}

/// Level priority: --log-level / config > RUST_LOG > WARN
fn setup_logging(level: Option<&str>) -> Result<()> {
    let filter = match level.map(parse_level) {
        Some(level) => EnvFilter::from_default_env().add_directive(level.into()),
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy(),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| eyre::eyre!("{}", e))?;

    debug!(?level, "Logging initialized");
    Ok(())
}

fn report(summary: &RunSummary, config: &Config) {
    println!(
        "{} {} pending, {} completed -> {}",
        "✓".green(),
        summary.pending.to_string().yellow(),
        summary.completed.to_string().dimmed(),
        config.output.display().to_string().cyan()
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref())
        .context("Failed to load configuration")?
        .merge_cli(&cli);

    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;
    info!(root = %config.root.display(), watch = cli.watch, "todogather starting");

    let options = config.run_options();
    if cli.watch {
        let stop = StopToken::new();
        pipeline::watch(&options, config.watch_interval(), &stop)?;
    } else {
        let summary = pipeline::run_once(&options)?;
        report(&summary, &config);
    }

    Ok(())
}
