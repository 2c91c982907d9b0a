//! Plan summary rendering.

use crate::baseline::ChangesRecord;
use crate::domain::{PlanSummary, WarningLevel};
use crate::error::Result;
use crate::utils::{format_bytes, format_with_commas};
use console::style;
use serde_json::{Map, Value};

const MAX_LISTED_CHANGES: usize = 20;

fn styled_level(level: WarningLevel) -> String {
    let label = level.as_str().to_uppercase();
    match level {
        WarningLevel::Green => style(label).green().to_string(),
        WarningLevel::Yellow => style(label).yellow().to_string(),
        WarningLevel::Red => style(label).red().bold().to_string(),
    }
}

/// Human-readable plan summary.
pub fn render_text(summary: &PlanSummary, changes: Option<&ChangesRecord>) -> String {
    let mut out = String::new();

    for plan in &summary.collections {
        let result = &plan.result;
        out.push_str(&format!("{} [{}]\n", plan.id, styled_level(result.warning_level)));
        if plan.root_exists {
            out.push_str(&format!(
                "  Files: {}  Size: {}\n",
                format_with_commas(result.included_file_count as u64),
                format_bytes(result.included_total_bytes)
            ));
            if !result.extension_histogram.is_empty() {
                let top: Vec<String> = result
                    .extension_histogram
                    .iter()
                    .take(5)
                    .map(|(ext, count)| format!("{} {}", ext, count))
                    .collect();
                out.push_str(&format!("  Extensions: {}\n", top.join(", ")));
            }
            if let Some(largest) = result.top_largest_files.first() {
                out.push_str(&format!(
                    "  Largest: {} ({})\n",
                    largest.relative_path,
                    format_bytes(largest.size_bytes)
                ));
            }
        }
        for warning in &result.warnings {
            out.push_str(&format!("  ! {}\n", warning));
        }
    }

    out.push_str(&format!(
        "\nTotal: {} collections, {} files, {} [{}]\n",
        summary.collection_count,
        format_with_commas(summary.included_file_count as u64),
        format_bytes(summary.included_total_bytes),
        styled_level(summary.warning_level)
    ));

    if let Some(changes) = changes {
        match &changes.baseline_date {
            None => out.push_str(&format!(
                "No baseline found: all {} files are new\n",
                format_with_commas(changes.total_files as u64)
            )),
            Some(date) if !changes.has_changes => {
                out.push_str(&format!("No changes since baseline ({})\n", date));
            }
            Some(date) => {
                out.push_str(&format!(
                    "Changes since baseline ({}): +{} new, -{} removed\n",
                    date,
                    changes.new_files.len(),
                    changes.removed_files.len()
                ));
                for path in changes.new_files.iter().take(MAX_LISTED_CHANGES) {
                    out.push_str(&format!("  + {}\n", path));
                }
                for path in changes.removed_files.iter().take(MAX_LISTED_CHANGES) {
                    out.push_str(&format!("  - {}\n", path));
                }
            }
        }
    }

    out
}

/// JSON plan summary; `changes` is included when supplied.
pub fn render_json(summary: &PlanSummary, changes: Option<&ChangesRecord>) -> Result<String> {
    let mut report = match serde_json::to_value(summary)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Some(changes) = changes {
        report.insert("changes".to_string(), serde_json::to_value(changes)?);
    }
    Ok(serde_json::to_string_pretty(&Value::Object(report))?)
}
