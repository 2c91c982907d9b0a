//! Change record handed to downstream consumers after planning.

use super::diff::diff;
use super::snapshot::{now_iso8601, write_json, Baseline};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangesRecord {
    pub timestamp: String,
    /// Timestamp of the baseline compared against; `None` on a first run.
    pub baseline_date: Option<String>,
    pub total_files: usize,
    pub new_files: Vec<String>,
    pub removed_files: Vec<String>,
    pub has_changes: bool,
}

impl ChangesRecord {
    /// Compare the current paths with `baseline`. Without a baseline every
    /// current path counts as new.
    pub fn from_plan(current: &[String], baseline: Option<&Baseline>) -> Self {
        let unique: BTreeSet<&String> = current.iter().collect();
        let (new_files, removed_files) = match baseline {
            Some(baseline) => {
                let result = diff(current, baseline);
                (result.new_files, result.removed_files)
            }
            None => (unique.iter().map(|s| s.to_string()).collect(), Vec::new()),
        };
        let has_changes = !new_files.is_empty() || !removed_files.is_empty();

        Self {
            timestamp: now_iso8601(),
            baseline_date: baseline.map(|b| b.timestamp.clone()),
            total_files: unique.len(),
            new_files,
            removed_files,
            has_changes,
        }
    }
}

pub fn write_changes(path: &Path, record: &ChangesRecord) -> Result<()> {
    write_json(path, record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_run_treats_everything_as_new() {
        let record = ChangesRecord::from_plan(&strings(&["r/b.ts", "r/a.ts", "r/a.ts"]), None);
        assert_eq!(record.new_files, vec!["r/a.ts", "r/b.ts"]);
        assert!(record.removed_files.is_empty());
        assert_eq!(record.total_files, 2);
        assert!(record.baseline_date.is_none());
        assert!(record.has_changes);
    }

    #[test]
    fn with_baseline_uses_diff() {
        let baseline =
            Baseline::with_timestamp(strings(&["a", "b", "c"]), "2026-01-01T00:00:00.000Z".into());
        let record = ChangesRecord::from_plan(&strings(&["a", "b", "d"]), Some(&baseline));
        assert_eq!(record.new_files, vec!["d"]);
        assert_eq!(record.removed_files, vec!["c"]);
        assert_eq!(record.baseline_date.as_deref(), Some("2026-01-01T00:00:00.000Z"));
        assert_eq!(record.total_files, 3);
    }

    #[test]
    fn unchanged_plan_has_no_changes() {
        let current = strings(&["a", "b"]);
        let baseline = Baseline::new(current.clone());
        let record = ChangesRecord::from_plan(&current, Some(&baseline));
        assert!(!record.has_changes);
    }

    #[test]
    fn written_record_uses_camel_case_keys() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("changes.json");
        let record = ChangesRecord::from_plan(&strings(&["a"]), None);
        write_changes(&path, &record).expect("write");

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
        let keys =
            ["timestamp", "baselineDate", "totalFiles", "newFiles", "removedFiles", "hasChanges"];
        for key in keys {
            assert!(raw.get(key).is_some(), "missing key {}", key);
        }
        assert!(raw["baselineDate"].is_null());
    }
}
