//! Rules command implementation

use anyhow::Result;
use clap::Args;
use index_plan::rules::RuleCompiler;
use index_plan::scan::is_indexable;
use std::path::PathBuf;

use super::utils::parse_csv;

#[derive(Args)]
pub struct RulesArgs {
    /// Collection id whose rules to print
    #[arg(value_name = "ID")]
    pub id: String,

    /// Workspace directory holding the config file
    #[arg(short = 'w', long, value_name = "DIR", default_value = ".")]
    pub workspace: PathBuf,

    /// Path to config file (index-plan.toml or index-plan.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report the verdict for these relative paths instead (comma-separated)
    #[arg(long, value_name = "PATHS")]
    pub check: Option<String>,
}

pub fn run(args: RulesArgs) -> Result<()> {
    let config = index_plan::config::load_config(&args.workspace, args.config.as_deref())?;
    let rules = RuleCompiler::with_overrides(config.override_table()).compile(&args.id)?;

    match parse_csv(&args.check) {
        Some(paths) => {
            for path in paths {
                let verdict =
                    if is_indexable(&rules, &path, false) { "included" } else { "excluded" };
                println!("{}\t{}", verdict, path);
            }
        }
        None => print!("{}", rules.render()),
    }
    Ok(())
}
