//! Core data model shared by the walker, aggregator and planner.

use crate::error::{PlanError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default per-file size cap (1 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1_048_576;

/// Histogram bucket for file names without an extension.
pub const NO_EXTENSION: &str = "(no ext)";

/// Maximum number of entries kept in `PlanResult::top_largest_files`.
pub const TOP_LARGEST_LIMIT: usize = 10;

/// A file that survived hidden-path, pattern and size filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Path relative to the collection root, always `/`-separated.
    pub relative_path: String,
    pub size_bytes: u64,
}

impl FileRecord {
    pub fn new(relative_path: impl Into<String>, size_bytes: u64) -> Self {
        Self { relative_path: relative_path.into(), size_bytes }
    }
}

/// Three-tier severity. Ordering is `Green < Yellow < Red`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    Green,
    Yellow,
    Red,
}

impl Default for WarningLevel {
    fn default() -> Self {
        Self::Green
    }
}

impl WarningLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Warning/error limits for total bytes and file count.
///
/// Error limits must be strictly greater than the matching warning limits;
/// [`Thresholds::new`] and [`Thresholds::validate`] enforce this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub warning_bytes: u64,
    pub error_bytes: u64,
    pub warning_count: usize,
    pub error_count: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning_bytes: 15 * 1024 * 1024,
            error_bytes: 50 * 1024 * 1024,
            warning_count: 2_500,
            error_count: 10_000,
        }
    }
}

impl Thresholds {
    pub fn new(
        warning_bytes: u64,
        error_bytes: u64,
        warning_count: usize,
        error_count: usize,
    ) -> Result<Self> {
        let thresholds = Self { warning_bytes, error_bytes, warning_count, error_count };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.error_bytes <= self.warning_bytes {
            return Err(PlanError::InvalidThresholds(format!(
                "error_bytes ({}) must exceed warning_bytes ({})",
                self.error_bytes, self.warning_bytes
            )));
        }
        if self.error_count <= self.warning_count {
            return Err(PlanError::InvalidThresholds(format!(
                "error_count ({}) must exceed warning_count ({})",
                self.error_count, self.warning_count
            )));
        }
        Ok(())
    }
}

/// Aggregated statistics and classification for one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    pub included_file_count: usize,
    pub included_total_bytes: u64,
    pub top_largest_files: Vec<FileRecord>,
    /// `(extension, count)` pairs, most frequent first.
    pub extension_histogram: Vec<(String, usize)>,
    pub warning_level: WarningLevel,
    pub warnings: Vec<String>,
}

/// Input describing one checked-out collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSpec {
    pub id: String,
    /// Directory name used as the prefix of baseline paths.
    pub local_dir: String,
    pub root: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_bytes: Option<u64>,
}

/// Plan for one collection, including the paths it would index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPlan {
    pub id: String,
    pub local_dir: String,
    pub root_exists: bool,
    #[serde(flatten)]
    pub result: PlanResult,
    #[serde(skip)]
    pub included_paths: Vec<String>,
}

/// Overall plan across every collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub collection_count: usize,
    pub included_file_count: usize,
    pub included_total_bytes: u64,
    pub warning_level: WarningLevel,
    pub collections: Vec<CollectionPlan>,
    /// Every included path as `<local_dir>/<relative_path>`, sorted.
    #[serde(skip)]
    pub included_paths: Vec<String>,
}
