use std::path::PathBuf;

use clap::Parser;

use wiezen_cli::commands::{Command, execute, open_ledger};
use wiezen_cli::config::ScorekeeperConfig;
use wiezen_cli::logging::init_logging;
use wiezen_core::RoundCatalog;

/// Score sheet for a game of Belgian whist.
#[derive(Debug, Parser)]
#[command(
    name = "wiezen",
    author,
    version,
    about = "Keeps the score of a kleurenwiezen game"
)]
struct Cli {
    /// Path to the YAML configuration file. Defaults apply when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the saved game location.
    #[arg(long, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Write JSON logs to the configured log file.
    #[arg(long)]
    structured_logs: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => ScorekeeperConfig::from_path(path)?,
        None => ScorekeeperConfig::default(),
    };

    if let Some(store) = cli.store {
        config.store.path = store;
    }

    if cli.structured_logs {
        config.logging.enable_structured = true;
    }

    config.validate()?;

    let logging_guard = init_logging(&config.logging)?;
    if let Some(guard) = logging_guard.as_ref() {
        tracing::info!(path = %guard.log_path.display(), "writing structured logs");
    }
    let catalog = RoundCatalog::standard();
    let mut ledger = open_ledger(&config)?;

    let report = execute(&cli.command, &mut ledger, &catalog)?;
    print!("{report}");

    Ok(())
}
