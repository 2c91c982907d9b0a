//! Persisted snapshot of previously indexed paths.

use crate::error::{PlanError, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths that were handed to the indexer on the last successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baseline {
    /// ISO-8601 time the snapshot was taken.
    pub timestamp: String,
    pub file_count: usize,
    /// `<local_dir>/<relative_path>` entries, sorted and unique.
    pub files: Vec<String>,
}

impl Baseline {
    pub fn new<I>(files: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self::with_timestamp(files, now_iso8601())
    }

    pub fn with_timestamp<I>(files: I, timestamp: String) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let files: Vec<String> = files.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        Self { timestamp, file_count: files.len(), files }
    }
}

pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Snapshot `files` and overwrite whatever baseline exists at `path`.
pub fn save_baseline<I>(path: &Path, files: I) -> Result<Baseline>
where
    I: IntoIterator<Item = String>,
{
    let baseline = Baseline::new(files);
    write_json(path, &baseline)?;
    tracing::info!("Saved baseline with {} files to {}", baseline.file_count, path.display());
    Ok(baseline)
}

/// Load the baseline at `path`.
///
/// Returns `None` when the file is missing, unreadable or malformed; the
/// diff is advisory, so a damaged snapshot is treated as absent.
pub fn load_baseline(path: &Path) -> Option<Baseline> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!("Ignoring unreadable baseline {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str::<Baseline>(&content) {
        Ok(baseline) => Some(baseline),
        Err(e) => {
            tracing::warn!("Ignoring corrupt baseline {}: {}", path.display(), e);
            None
        }
    }
}

/// Write pretty JSON through a temporary sibling file, then rename.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let io_err = |source| PlanError::BaselineIo { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let body = serde_json::to_string_pretty(value)?;
    let tmp = temp_sibling(path);
    fs::write(&tmp, body).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

/// `<file name>.tmp` next to `path`; the full name is kept so outputs that
/// share a stem never share a temp file.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
