//! Collection tree walker
//!
//! Drives `ignore::WalkBuilder` with the standard filters turned off so the
//! compiled rule set is the only source of exclusions. Hidden and excluded
//! subtrees are pruned in `filter_entry` before they are descended.

use crate::domain::{FileRecord, DEFAULT_MAX_FILE_BYTES};
use crate::rules::CollectionRuleSet;
use crate::utils::to_forward_slashes;
use ignore::{DirEntry, WalkBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counters describing why entries were left out of a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub files_included: usize,
    pub skipped_hidden: usize,
    pub skipped_rules: usize,
    pub skipped_size: usize,
    pub skipped_symlink_dirs: usize,
    pub unreadable: usize,
}

/// Prune counts recorded from inside the `filter_entry` callback.
#[derive(Debug, Default)]
struct PruneCounters {
    hidden: AtomicUsize,
    rules: AtomicUsize,
}

/// Walks one collection root against its compiled rule set.
pub struct TreeWalker<'a> {
    root: PathBuf,
    rules: &'a CollectionRuleSet,
    max_file_bytes: u64,
    stats: WalkStats,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: impl Into<PathBuf>, rules: &'a CollectionRuleSet) -> Self {
        Self {
            root: root.into(),
            rules,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            stats: WalkStats::default(),
        }
    }

    /// Files strictly larger than this are dropped.
    pub fn max_file_bytes(mut self, max_bytes: u64) -> Self {
        self.max_file_bytes = max_bytes;
        self
    }

    /// Walk the tree and return included files sorted by relative path.
    ///
    /// A missing root yields no files. Entries that cannot be read are
    /// skipped one by one.
    pub fn walk(&mut self) -> Vec<FileRecord> {
        self.stats = WalkStats::default();
        let mut files = Vec::new();

        if !self.root.is_dir() {
            tracing::debug!("Collection root {} does not exist", self.root.display());
            return files;
        }

        let counters = Arc::new(PruneCounters::default());
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .hidden(false) // Hidden names are pruned and counted in `filter_entry`
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(prune_filter(self.root.clone(), self.rules.clone(), counters.clone()));

        for entry_result in builder.build() {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    self.stats.unreadable += 1;
                    continue;
                }
            };
            if let Some(record) = self.visit(&entry) {
                files.push(record);
            }
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        self.stats.files_included = files.len();
        self.stats.skipped_hidden = counters.hidden.load(Ordering::Relaxed);
        self.stats.skipped_rules = counters.rules.load(Ordering::Relaxed);
        files
    }

    /// Size one entry that survived pruning. Directories yield nothing.
    fn visit(&mut self, entry: &DirEntry) -> Option<FileRecord> {
        if entry.file_type().map_or(true, |ft| ft.is_dir()) {
            return None;
        }
        let rel_path = relative_path(&self.root, entry.path())?;

        // Symlinks are resolved for size but never descended into.
        let metadata = if entry.path_is_symlink() {
            match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_dir() => {
                    tracing::debug!("Not following directory symlink {}", rel_path);
                    self.stats.skipped_symlink_dirs += 1;
                    return None;
                }
                Ok(meta) => meta,
                Err(e) => {
                    tracing::debug!("Skipping broken symlink {}: {}", rel_path, e);
                    self.stats.unreadable += 1;
                    return None;
                }
            }
        } else {
            match entry.metadata() {
                Ok(meta) => meta,
                Err(e) => {
                    tracing::debug!("Skipping {} (stat failed): {}", rel_path, e);
                    self.stats.unreadable += 1;
                    return None;
                }
            }
        };

        let size = metadata.len();
        if size > self.max_file_bytes {
            tracing::debug!(
                "Skipping {} ({} bytes over limit {})",
                rel_path,
                size,
                self.max_file_bytes
            );
            self.stats.skipped_size += 1;
            return None;
        }

        Some(FileRecord::new(rel_path, size))
    }

    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }
}

/// Entry filter: the hidden-name check runs before the rule set, and a
/// rejected directory is never descended.
fn prune_filter(
    root: PathBuf,
    rules: CollectionRuleSet,
    counters: Arc<PruneCounters>,
) -> impl Fn(&DirEntry) -> bool + Send + Sync + 'static {
    move |entry| {
        if entry.depth() == 0 {
            return true;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            counters.hidden.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        let Some(rel_path) = relative_path(&root, entry.path()) else {
            return false;
        };
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        if rules.excludes_entry(&rel_path, is_dir) {
            tracing::debug!("Excluded by rules: {}{}", rel_path, if is_dir { "/" } else { "" });
            counters.rules.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        true
    }
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(to_forward_slashes)
}

/// Walk `root` with `rules`, dropping files larger than `max_file_bytes`.
pub fn walk(root: &Path, rules: &CollectionRuleSet, max_file_bytes: u64) -> Vec<FileRecord> {
    TreeWalker::new(root, rules).max_file_bytes(max_file_bytes).walk()
}
