//! Set difference between a walk and a stored baseline.

use super::snapshot::Baseline;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub new_files: Vec<String>,
    pub removed_files: Vec<String>,
}

impl DiffResult {
    pub fn has_changes(&self) -> bool {
        !self.new_files.is_empty() || !self.removed_files.is_empty()
    }
}

/// Paths added since `baseline` and paths no longer present, both sorted.
///
/// Only meaningful when a baseline exists; first-run handling belongs to
/// the caller.
pub fn diff(current: &[String], baseline: &Baseline) -> DiffResult {
    let current: BTreeSet<&str> = current.iter().map(String::as_str).collect();
    let previous: BTreeSet<&str> = baseline.files.iter().map(String::as_str).collect();

    DiffResult {
        new_files: current.difference(&previous).map(|s| s.to_string()).collect(),
        removed_files: previous.difference(&current).map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reports_new_and_removed() {
        let baseline = Baseline::with_timestamp(strings(&["a", "b", "c"]), "t".to_string());
        let result = diff(&strings(&["a", "b", "d"]), &baseline);
        assert_eq!(result.new_files, vec!["d"]);
        assert_eq!(result.removed_files, vec!["c"]);
        assert!(result.has_changes());
    }

    #[test]
    fn same_set_has_no_changes() {
        let current = strings(&["repo/z.ts", "repo/a.ts", "other/m.ts"]);
        let baseline = Baseline::new(current.clone());
        let result = diff(&current, &baseline);
        assert!(result.new_files.is_empty());
        assert!(result.removed_files.is_empty());
        assert!(!result.has_changes());
    }

    #[test]
    fn duplicates_do_not_repeat() {
        let baseline = Baseline::with_timestamp(strings(&["a"]), "t".to_string());
        let result = diff(&strings(&["b", "b", "a", "c", "b"]), &baseline);
        assert_eq!(result.new_files, vec!["b", "c"]);
        assert!(result.removed_files.is_empty());
    }

    #[test]
    fn output_is_sorted() {
        let baseline = Baseline::with_timestamp(strings(&["y", "x", "w"]), "t".to_string());
        let result = diff(&strings(&["q", "p", "r"]), &baseline);
        assert_eq!(result.new_files, vec!["p", "q", "r"]);
        assert_eq!(result.removed_files, vec!["w", "x", "y"]);
    }

    #[test]
    fn empty_baseline_makes_everything_new() {
        let baseline = Baseline::with_timestamp(Vec::new(), "t".to_string());
        let result = diff(&strings(&["a", "b"]), &baseline);
        assert_eq!(result.new_files, vec!["a", "b"]);
    }
}
