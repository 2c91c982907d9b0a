//! Command-line interface for index-plan
//!
//! Provides `plan`, `rules` and `baseline` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod baseline;
mod plan;
mod rules;
mod utils;

/// Plan which files of your checkouts get handed to the semantic indexer
#[derive(Parser)]
#[command(name = "index-plan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the indexable set, classify it and compare with the baseline
    Plan(plan::PlanArgs),

    /// Print the compiled ignore rules for a collection
    Rules(rules::RulesArgs),

    /// Overwrite the baseline with the current indexable set
    Baseline(baseline::BaselineArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG replaces the default filter entirely when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
        EnvFilter::default().add_directive(level.into())
    });
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Plan(args) => plan::run(args),
        Commands::Rules(args) => rules::run(args),
        Commands::Baseline(args) => baseline::run(args),
    }
}
