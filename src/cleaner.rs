//! Severity cleaning: drops rows without a usable severity label and
//! normalizes the surviving labels to title case.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::analyzers::utility::{pct, round2};
use crate::error::StatsError;
use crate::record::Record;

/// The severity labels the source dataset is known to carry.
pub const CANONICAL_SEVERITIES: [&str; 5] = ["Blocker", "Critical", "Major", "Minor", "Trivial"];

/// What cleaning did to the table, embedded in the final report.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CleanSummary {
    pub input_rows: usize,
    pub removed: usize,
    pub removed_pct: f64,
    /// Normalized labels outside the canonical set, with how many rows
    /// carried each. Non-empty here means the source has label spellings
    /// worth investigating, not that rows were dropped.
    pub unexpected_labels: BTreeMap<String, usize>,
}

/// Removes records with an absent or whitespace-only `priority`, then
/// title-cases the survivors' labels in place.
///
/// Rows whose normalized label falls outside [`CANONICAL_SEVERITIES`] are
/// counted and warned about but retained; `strict` turns them into a
/// fatal [`StatsError::UnexpectedLabels`]. The surviving order matches
/// the input order, and re-running on the output is a no-op.
pub fn clean(records: Vec<Record>, strict: bool) -> Result<(Vec<Record>, CleanSummary), StatsError> {
    let input_rows = records.len();

    let mut cleaned: Vec<Record> = records
        .into_iter()
        .filter(|r| {
            r.priority
                .as_deref()
                .is_some_and(|p| !p.trim().is_empty())
        })
        .collect();

    let removed = input_rows - cleaned.len();
    let removed_pct = round2(pct(removed, input_rows));
    info!(input_rows, removed, removed_pct, "Removed rows with missing severity");

    let mut unexpected_labels: BTreeMap<String, usize> = BTreeMap::new();
    for record in &mut cleaned {
        let normalized = title_case(record.priority.as_deref().unwrap_or_default());
        if !CANONICAL_SEVERITIES.contains(&normalized.as_str()) {
            *unexpected_labels.entry(normalized.clone()).or_default() += 1;
        }
        record.priority = Some(normalized);
    }

    for (label, rows) in &unexpected_labels {
        warn!(label = %label, rows, "Severity label outside the canonical set");
    }

    if strict && !unexpected_labels.is_empty() {
        let labels = unexpected_labels
            .keys()
            .map(|l| format!("'{l}'"))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(StatsError::UnexpectedLabels { labels });
    }

    Ok((
        cleaned,
        CleanSummary {
            input_rows,
            removed,
            removed_pct,
            unexpected_labels,
        },
    ))
}

/// Trims `s` and uppercases the first letter of each whitespace-separated
/// token, lowercasing the rest. Inner whitespace is preserved.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for ch in s.trim().chars() {
        if ch.is_whitespace() {
            word_start = true;
            out.push(ch);
        } else if word_start {
            out.extend(ch.to_uppercase());
            word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}
