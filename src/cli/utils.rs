//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use index_plan::config::{load_config, IndexPlanConfig};
use index_plan::domain::CollectionSpec;
use std::path::{Path, PathBuf};

/// Where to find the configuration and which collections to plan.
#[derive(Args)]
pub struct TargetArgs {
    /// Workspace directory holding the config file and checkouts
    #[arg(short = 'w', long, value_name = "DIR", default_value = ".")]
    pub workspace: PathBuf,

    /// Path to config file (index-plan.toml or index-plan.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Plan a single checkout at this path instead of the configured collections
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Only plan these collection ids (comma-separated)
    #[arg(long, value_name = "IDS")]
    pub only: Option<String>,
}

impl TargetArgs {
    pub fn load_config(&self) -> Result<IndexPlanConfig> {
        load_config(&self.workspace, self.config.as_deref()).context("Failed to load configuration")
    }

    /// Resolve the collections to plan from `--path` or the config file.
    pub fn collection_specs(&self, config: &IndexPlanConfig) -> Result<Vec<CollectionSpec>> {
        if let Some(path) = &self.path {
            return Ok(vec![adhoc_spec(path)]);
        }

        let mut specs = config.collection_specs(&self.workspace);
        if let Some(only) = parse_csv(&self.only) {
            specs.retain(|spec| only.contains(&spec.id));
        }
        if specs.is_empty() {
            anyhow::bail!(
                "No collections to plan: pass --path or add [[collections]] to index-plan.toml"
            );
        }
        Ok(specs)
    }
}

/// Spec for a checkout given directly on the command line; its directory
/// name doubles as id and local dir.
fn adhoc_spec(path: &Path) -> CollectionSpec {
    let name = path
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .or_else(|| path.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| "collection".to_string());
    CollectionSpec {
        id: name.clone(),
        local_dir: name,
        root: path.to_path_buf(),
        max_file_bytes: None,
    }
}

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace and
/// discarding empty segments.  Returns `None` when `value` is `None`.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_csv_trims_and_drops_empty() {
        assert_eq!(
            parse_csv(&Some(" react, ,next.js ".to_string())),
            Some(vec!["react".to_string(), "next.js".to_string()])
        );
        assert_eq!(parse_csv(&None), None);
    }

    #[test]
    fn adhoc_spec_uses_directory_name() {
        let spec = adhoc_spec(Path::new("/does/not/exist/my-app"));
        assert_eq!(spec.id, "my-app");
        assert_eq!(spec.local_dir, "my-app");
    }
}
