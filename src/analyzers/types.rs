//! Data types produced by the aggregation queries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::cleaner::CleanSummary;

/// One value's share of a frequency distribution.
///
/// `count` is the exact underlying value; `percent` carries the
/// two-decimal rounding reports present.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
    pub percent: f64,
}

/// Frequency distribution of one categorical field, entries ordered by
/// value.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FrequencyTable {
    pub field: String,
    pub total: usize,
    pub entries: Vec<FrequencyEntry>,
}

/// Two-way frequency table with row and column margins.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CrossTab {
    pub row_field: String,
    pub col_field: String,
    /// Column values in display order (sorted, "Other" last).
    pub columns: Vec<String>,
    /// row value → column value → joint count. Absent cells are zero.
    pub rows: BTreeMap<String, BTreeMap<String, usize>>,
    pub row_totals: BTreeMap<String, usize>,
    pub col_totals: BTreeMap<String, usize>,
    pub total: usize,
}

/// Descriptive statistics of a numeric field within one group.
///
/// `std_dev` is the sample standard deviation and is `null` in JSON for
/// groups with fewer than two members.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroupSummary {
    pub group: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: Option<f64>,
}

/// Grouped numeric summary over the whole table, groups ordered by name.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroupedSummaryTable {
    pub group_field: String,
    pub numeric_field: String,
    pub groups: Vec<GroupSummary>,
}

/// Per-column missing-cell count from the raw-file survey.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColumnMissing {
    pub column: String,
    pub missing: usize,
    pub missing_pct: f64,
}

/// Pre-cleaning survey of a source file.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InspectReport {
    pub source: String,
    pub rows: usize,
    /// Column names in header order.
    pub columns: Vec<String>,
    /// Columns with at least one missing cell, most-missing first.
    pub missing: Vec<ColumnMissing>,
}

/// Complete result of one analysis run, serialized as the report output.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisReport {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub rows_analyzed: usize,
    pub cleaning: CleanSummary,
    pub severity_distribution: FrequencyTable,
    pub severity_by_status: CrossTab,
    pub severity_by_project: CrossTab,
    pub severity_by_issuetype: CrossTab,
    pub desc_length_by_severity: GroupedSummaryTable,
}
