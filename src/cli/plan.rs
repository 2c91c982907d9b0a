//! Plan command implementation

use anyhow::{Context, Result};
use clap::Args;
use index_plan::baseline::{load_baseline, write_changes, ChangesRecord};
use index_plan::domain::WarningLevel;
use index_plan::plan::Planner;
use index_plan::render::{render_json, render_text};
use index_plan::rules::RuleCompiler;
use std::path::PathBuf;

use super::utils::TargetArgs;

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Number of collections to walk in parallel
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Skip files larger than this (bytes) unless a collection sets its own limit
    #[arg(long, value_name = "BYTES")]
    pub max_file_bytes: Option<u64>,

    /// Baseline file to compare against
    #[arg(long, value_name = "FILE")]
    pub baseline: Option<PathBuf>,

    /// Write the changes record to this file
    #[arg(long, value_name = "FILE")]
    pub changes_out: Option<PathBuf>,

    /// Exit with an error when the overall warning level is red
    #[arg(long)]
    pub fail_on_red: bool,
}

pub fn run(args: PlanArgs) -> Result<()> {
    let config = args.target.load_config()?;
    let specs = args.target.collection_specs(&config)?;

    let compiler = RuleCompiler::with_overrides(config.override_table());
    let planner = Planner::new(compiler, config.thresholds)?
        .default_max_file_bytes(args.max_file_bytes.unwrap_or(config.max_file_bytes))
        .jobs(args.jobs.unwrap_or(config.jobs));
    let summary = planner.plan_all(&specs)?;

    let baseline_path =
        args.baseline.clone().unwrap_or_else(|| config.baseline_path(&args.target.workspace));
    let baseline = load_baseline(&baseline_path);
    let changes = ChangesRecord::from_plan(&summary.included_paths, baseline.as_ref());

    let changes_out = args
        .changes_out
        .clone()
        .or_else(|| config.changes_path.as_ref().map(|p| args.target.workspace.join(p)));
    if let Some(path) = changes_out {
        write_changes(&path, &changes)
            .with_context(|| format!("Failed writing changes record to {}", path.display()))?;
    }

    if args.json {
        println!("{}", render_json(&summary, Some(&changes))?);
    } else {
        print!("{}", render_text(&summary, Some(&changes)));
    }

    if args.fail_on_red && summary.warning_level == WarningLevel::Red {
        anyhow::bail!("Plan exceeds error thresholds");
    }
    Ok(())
}
