//! The three aggregate queries: frequency distributions, two-way
//! cross-tabulations, and grouped numeric summaries.
//!
//! All of them are read-only views over the finalized table and can run
//! in any order.

use std::collections::{BTreeMap, HashSet};

use crate::analyzers::types::{
    CrossTab, FrequencyEntry, FrequencyTable, GroupSummary, GroupedSummaryTable,
};
use crate::analyzers::utility::{mean, median, pct, round2, sample_stddev, top_values};
use crate::record::{AnalysisRecord, Field, NumericField};

/// Catch-all bucket for column values outside a top-N restriction.
pub const OTHER_BUCKET: &str = "Other";

/// Count and percentage of every distinct value of `field`, ordered by
/// value.
pub fn frequency(records: &[AnalysisRecord], field: Field) -> FrequencyTable {
    let total = records.len();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(r.get(field)).or_default() += 1;
    }

    FrequencyTable {
        field: field.name().to_string(),
        total,
        entries: counts
            .into_iter()
            .map(|(value, count)| FrequencyEntry {
                value: value.to_string(),
                count,
                percent: round2(pct(count, total)),
            })
            .collect(),
    }
}

/// Joint counts of `row_field` × `col_field`, with margins.
///
/// When `top_cols` is given, the kept column values are the N most
/// frequent over the entire table, never per row slice, and everything
/// else lands in [`OTHER_BUCKET`]. Computing the restriction globally
/// keeps the buckets identical across row slices.
pub fn cross_tab(
    records: &[AnalysisRecord],
    row_field: Field,
    col_field: Field,
    top_cols: Option<usize>,
) -> CrossTab {
    let keep: Option<HashSet<String>> = top_cols.map(|n| {
        top_values(records.iter().map(|r| r.get(col_field)), n)
            .into_iter()
            .collect()
    });

    let mut rows: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    let mut col_totals: BTreeMap<String, usize> = BTreeMap::new();

    for r in records {
        let row_value = r.get(row_field).to_string();
        let col_value = match &keep {
            Some(keep) if !keep.contains(r.get(col_field)) => OTHER_BUCKET.to_string(),
            _ => r.get(col_field).to_string(),
        };

        *rows.entry(row_value).or_default().entry(col_value.clone()).or_default() += 1;
        *col_totals.entry(col_value).or_default() += 1;
    }

    let row_totals: BTreeMap<String, usize> = rows
        .iter()
        .map(|(value, cells)| (value.clone(), cells.values().sum()))
        .collect();

    // Sorted column order with the catch-all bucket pushed to the end.
    let mut columns: Vec<String> = col_totals.keys().cloned().collect();
    if let Some(pos) = columns.iter().position(|c| c == OTHER_BUCKET) {
        let other = columns.remove(pos);
        columns.push(other);
    }

    CrossTab {
        row_field: row_field.name().to_string(),
        col_field: col_field.name().to_string(),
        columns,
        rows,
        row_totals,
        col_totals,
        total: records.len(),
    }
}

/// Count, mean, median, and sample standard deviation of
/// `numeric_field` within each distinct value of `group_field`.
pub fn grouped_summary(
    records: &[AnalysisRecord],
    group_field: Field,
    numeric_field: NumericField,
) -> GroupedSummaryTable {
    let mut series: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in records {
        series
            .entry(r.get(group_field))
            .or_default()
            .push(r.get_numeric(numeric_field));
    }

    let groups = series
        .into_iter()
        .map(|(group, values)| {
            let avg = mean(&values);
            GroupSummary {
                group: group.to_string(),
                count: values.len(),
                mean: avg,
                median: median(&values),
                std_dev: sample_stddev(&values, avg),
            }
        })
        .collect();

    GroupedSummaryTable {
        group_field: group_field.name().to_string(),
        numeric_field: numeric_field.name().to_string(),
        groups,
    }
}
