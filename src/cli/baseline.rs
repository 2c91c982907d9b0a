//! Baseline command implementation

use anyhow::{Context, Result};
use clap::Args;
use index_plan::baseline::save_baseline;
use index_plan::plan::Planner;
use index_plan::rules::RuleCompiler;
use std::path::PathBuf;

use super::utils::TargetArgs;

#[derive(Args)]
pub struct BaselineArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Baseline file to overwrite
    #[arg(long, value_name = "FILE")]
    pub baseline: Option<PathBuf>,
}

pub fn run(args: BaselineArgs) -> Result<()> {
    let config = args.target.load_config()?;
    let specs = args.target.collection_specs(&config)?;

    let compiler = RuleCompiler::with_overrides(config.override_table());
    let planner = Planner::new(compiler, config.thresholds)?
        .default_max_file_bytes(config.max_file_bytes)
        .jobs(config.jobs);
    let summary = planner.plan_all(&specs)?;

    let path = args.baseline.unwrap_or_else(|| config.baseline_path(&args.target.workspace));
    let baseline = save_baseline(&path, summary.included_paths)
        .with_context(|| format!("Failed writing baseline to {}", path.display()))?;

    println!("Baseline saved: {} files to {}", baseline.file_count, path.display());
    Ok(())
}
