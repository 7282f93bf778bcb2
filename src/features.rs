//! Derived features: description length and top-K project grouping.
//!
//! This is the last stage that shapes the table. Its output is the
//! immutable input to every aggregate query.

use std::collections::HashSet;

use tracing::info;

use crate::analyzers::utility::top_values;
use crate::record::{AnalysisRecord, Record};

const OTHER_PROJECT: &str = "Other";
const UNKNOWN: &str = "Unknown";

/// Finalizes cleaned records into [`AnalysisRecord`]s.
///
/// `desc_length` counts Unicode code points of the description, falling
/// back to the summary and then to zero. `project_grouped` collapses the
/// project long tail to the `top_project_count` most frequent names plus
/// "Other"; the top set is computed once over the whole cleaned table so
/// every later grouping sees the same buckets.
pub fn derive(records: Vec<Record>, top_project_count: usize) -> Vec<AnalysisRecord> {
    let top: HashSet<String> = top_values(
        records.iter().filter_map(|r| r.project.as_deref()),
        top_project_count,
    )
    .into_iter()
    .collect();

    info!(
        top_projects = top.len(),
        rows = records.len(),
        "Deriving features"
    );

    records
        .into_iter()
        .map(|r| {
            let desc_length = desc_length(r.description.as_deref(), r.summary.as_deref());
            let project_grouped = match r.project.as_deref() {
                Some(p) if top.contains(p) => p.to_string(),
                _ => OTHER_PROJECT.to_string(),
            };

            AnalysisRecord {
                row: r.row,
                severity: r.priority.unwrap_or_default(),
                status: r.status.unwrap_or_else(|| UNKNOWN.to_string()),
                issuetype: r.issuetype.unwrap_or_else(|| UNKNOWN.to_string()),
                project: r.project,
                desc_length,
                project_grouped,
            }
        })
        .collect()
}

/// Code-point count of the description, else the summary, else 0.
fn desc_length(description: Option<&str>, summary: Option<&str>) -> usize {
    match description {
        Some(d) if !d.trim().is_empty() => d.chars().count(),
        _ => summary.map(|s| s.chars().count()).unwrap_or(0),
    }
}
