//! Collection walking with layered ignore rules

use crate::domain::FileRecord;
use crate::rules::CollectionRuleSet;
use crate::utils::is_hidden_path;

pub mod walker;

pub use walker::{walk, TreeWalker, WalkStats};

/// Whether a single path would be indexed, combining the hidden-path rule
/// with the compiled rules. Either separator is accepted.
pub fn is_indexable(rules: &CollectionRuleSet, rel_path: &str, is_dir: bool) -> bool {
    !is_hidden_path(rel_path) && !rules.is_excluded(rel_path, is_dir)
}

/// Prefix each record with the collection's local directory, as stored in
/// baselines.
pub fn qualified_paths(local_dir: &str, files: &[FileRecord]) -> Vec<String> {
    files.iter().map(|f| format!("{}/{}", local_dir, f.relative_path)).collect()
}
