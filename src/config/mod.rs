//! Configuration loading
//!
//! Settings come from defaults, an optional config file, and `INDEX_PLAN_`
//! environment variables, in increasing order of precedence.

pub mod loader;

pub use loader::{apply_env_overrides, load_config, ENV_PREFIX};

use crate::domain::{CollectionSpec, Thresholds, DEFAULT_MAX_FILE_BYTES};
use crate::error::Result;
use crate::rules::{OverrideRule, OverrideTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One configured checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub id: String,
    /// Directory name under `collections_dir`; defaults to `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexPlanConfig {
    /// Directory holding the checkouts, relative to the workspace.
    pub collections_dir: PathBuf,
    pub baseline_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes_path: Option<PathBuf>,
    pub max_file_bytes: u64,
    pub jobs: usize,
    pub thresholds: Thresholds,
    pub collections: Vec<CollectionEntry>,
    /// Extra exclusions keyed by collection id, appended after built-ins.
    pub overrides: BTreeMap<String, Vec<OverrideRule>>,
}

impl Default for IndexPlanConfig {
    fn default() -> Self {
        Self {
            collections_dir: PathBuf::from("repos"),
            baseline_path: PathBuf::from(".index-plan/baseline.json"),
            changes_path: None,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            jobs: 1,
            thresholds: Thresholds::default(),
            collections: Vec::new(),
            overrides: BTreeMap::new(),
        }
    }
}

impl IndexPlanConfig {
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()
    }

    /// Resolve configured collections to concrete roots under `workspace`.
    pub fn collection_specs(&self, workspace: &Path) -> Vec<CollectionSpec> {
        let base = workspace.join(&self.collections_dir);
        self.collections
            .iter()
            .map(|entry| {
                let local_dir = entry.local_dir.clone().unwrap_or_else(|| entry.id.clone());
                CollectionSpec {
                    id: entry.id.clone(),
                    root: base.join(&local_dir),
                    local_dir,
                    max_file_bytes: entry.max_file_bytes,
                }
            })
            .collect()
    }

    /// Built-in override table extended with the configured entries.
    pub fn override_table(&self) -> OverrideTable {
        let mut table = OverrideTable::builtin();
        for (id, rules) in &self.overrides {
            table.extend(id, rules.iter().cloned());
        }
        table
    }

    pub fn baseline_path(&self, workspace: &Path) -> PathBuf {
        workspace.join(&self.baseline_path)
    }
}
