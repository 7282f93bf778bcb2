//! Raw-dataset survey: row count, column inventory, and per-column
//! missing-value counts, before any cleaning touches the table.

use std::fs::File;
use std::io;

use tracing::info;

use crate::analyzers::types::{ColumnMissing, InspectReport};
use crate::analyzers::utility::{pct, round2};
use crate::error::StatsError;

/// Surveys the CSV file at `path`.
pub fn inspect_path(path: &str) -> Result<InspectReport, StatsError> {
    let file = File::open(path)?;
    inspect(file, path)
}

/// Surveys any CSV source: total rows, header columns, and how many
/// cells are blank per column (most-missing first, complete columns
/// omitted).
///
/// # Errors
///
/// Returns [`StatsError::Format`] under the same conditions as the
/// loader: missing header row or a ragged data row.
pub fn inspect<R: io::Read>(reader: R, source: &str) -> Result<InspectReport, StatsError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| StatsError::Format(e.to_string()))?
        .clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(StatsError::Format("missing header row".to_string()));
    }

    let columns: Vec<String> = headers.iter().map(str::to_string).collect();
    let mut missing_counts = vec![0usize; columns.len()];
    let mut rows = 0usize;

    for result in rdr.records() {
        let record = result.map_err(|e| StatsError::Format(e.to_string()))?;
        rows += 1;
        for (i, cell) in record.iter().enumerate() {
            if cell.is_empty() {
                missing_counts[i] += 1;
            }
        }
    }

    let mut missing: Vec<ColumnMissing> = columns
        .iter()
        .zip(&missing_counts)
        .filter(|&(_, &count)| count > 0)
        .map(|(column, &count)| ColumnMissing {
            column: column.clone(),
            missing: count,
            missing_pct: round2(pct(count, rows)),
        })
        .collect();
    missing.sort_by(|a, b| b.missing.cmp(&a.missing).then_with(|| a.column.cmp(&b.column)));

    info!(rows, columns = columns.len(), incomplete_columns = missing.len(), "Survey complete");

    Ok(InspectReport {
        source: source.to_string(),
        rows,
        columns,
        missing,
    })
}
