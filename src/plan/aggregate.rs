//! Plan statistics and threshold classification.

use crate::domain::{
    CollectionPlan, FileRecord, PlanResult, PlanSummary, Thresholds, WarningLevel, NO_EXTENSION,
    TOP_LARGEST_LIMIT,
};
use crate::utils::{format_bytes, format_with_commas};
use std::collections::HashMap;

/// Lower-cased suffix after the last dot of the file name.
pub fn extension_key(relative_path: &str) -> String {
    let name = relative_path.rsplit('/').next().unwrap_or(relative_path);
    match name.rfind('.') {
        Some(idx) => name[idx + 1..].to_lowercase(),
        None => NO_EXTENSION.to_string(),
    }
}

/// Build the extension histogram, most frequent first, ties by extension.
pub fn extension_histogram(records: &[FileRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        *counts.entry(extension_key(&record.relative_path)).or_insert(0) += 1;
    }
    let mut histogram: Vec<(String, usize)> = counts.into_iter().collect();
    histogram.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    histogram
}

/// Largest files first, ties by path, at most ten.
pub fn top_largest(records: &[FileRecord]) -> Vec<FileRecord> {
    let mut sorted: Vec<&FileRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.size_bytes.cmp(&a.size_bytes).then_with(|| a.relative_path.cmp(&b.relative_path))
    });
    sorted.into_iter().take(TOP_LARGEST_LIMIT).cloned().collect()
}

/// Classify totals against the threshold ladder.
///
/// The level is decided first. Messages then name only the crossings at that
/// level's tier: a red plan lists its error-tier crossings, a yellow plan its
/// warning-tier ones (one for bytes, one for count, at most).
pub fn classify(
    total_bytes: u64,
    file_count: usize,
    thresholds: &Thresholds,
) -> (WarningLevel, Vec<String>) {
    let bytes_error = total_bytes > thresholds.error_bytes;
    let count_error = file_count > thresholds.error_count;
    let bytes_warning = total_bytes > thresholds.warning_bytes;
    let count_warning = file_count > thresholds.warning_count;

    let mut warnings = Vec::new();
    let level = if bytes_error || count_error {
        if bytes_error {
            warnings.push(bytes_message(total_bytes, "error", thresholds.error_bytes));
        }
        if count_error {
            warnings.push(count_message(file_count, "error", thresholds.error_count));
        }
        WarningLevel::Red
    } else if bytes_warning || count_warning {
        if bytes_warning {
            warnings.push(bytes_message(total_bytes, "warning", thresholds.warning_bytes));
        }
        if count_warning {
            warnings.push(count_message(file_count, "warning", thresholds.warning_count));
        }
        WarningLevel::Yellow
    } else {
        WarningLevel::Green
    };

    (level, warnings)
}

fn bytes_message(total: u64, tier: &str, threshold: u64) -> String {
    format!(
        "Total size {} ({} bytes) exceeds {} threshold of {} ({} bytes)",
        format_bytes(total),
        format_with_commas(total),
        tier,
        format_bytes(threshold),
        format_with_commas(threshold)
    )
}

fn count_message(count: usize, tier: &str, threshold: usize) -> String {
    format!(
        "File count {} exceeds {} threshold of {} files",
        format_with_commas(count as u64),
        tier,
        format_with_commas(threshold as u64)
    )
}

/// Aggregate one collection's walk into a plan result.
pub fn aggregate(records: &[FileRecord], thresholds: &Thresholds) -> PlanResult {
    let included_file_count = records.len();
    let included_total_bytes: u64 = records.iter().map(|r| r.size_bytes).sum();
    let (warning_level, warnings) = classify(included_total_bytes, included_file_count, thresholds);

    PlanResult {
        included_file_count,
        included_total_bytes,
        top_largest_files: top_largest(records),
        extension_histogram: extension_histogram(records),
        warning_level,
        warnings,
    }
}

/// Combine per-collection plans. Every plan is counted, including ones for
/// collections that are not checked out.
pub fn summarize(collections: Vec<CollectionPlan>) -> PlanSummary {
    let mut summary = PlanSummary { collection_count: collections.len(), ..Default::default() };

    for plan in &collections {
        summary.included_file_count += plan.result.included_file_count;
        summary.included_total_bytes += plan.result.included_total_bytes;
        summary.warning_level = summary.warning_level.max(plan.result.warning_level);
        summary.included_paths.extend(plan.included_paths.iter().cloned());
    }
    summary.included_paths.sort();
    summary.collections = collections;
    summary
}
