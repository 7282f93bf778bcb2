//! CSV parsing into typed records.
//!
//! The loader binds source columns to internal fields through the
//! configured [`ColumnMapping`], turns blank cells into `None`, and
//! optionally samples the source down to a configured row count.

use std::fs::File;
use std::io;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::config::{AnalysisConfig, ColumnMapping, SampleStrategy};
use crate::error::StatsError;
use crate::record::Record;

/// Resolved column indexes for one source file's header row.
struct ColumnIndexes {
    priority: usize,
    status: Option<usize>,
    project: Option<usize>,
    issuetype: Option<usize>,
    summary: Option<usize>,
    description: Option<usize>,
}

impl ColumnIndexes {
    /// Resolves the mapping against a header row. The priority column is
    /// required since every downstream stage hangs off it; the rest
    /// degrade to absent fields.
    fn resolve(headers: &csv::StringRecord, mapping: &ColumnMapping) -> Result<Self, StatsError> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let priority = find(&mapping.priority).ok_or_else(|| {
            StatsError::Format(format!(
                "required column '{}' not found in header",
                mapping.priority
            ))
        })?;

        let optional = |name: &str| {
            let idx = find(name);
            if idx.is_none() {
                warn!(column = name, "Mapped column not found, field will be absent");
            }
            idx
        };

        Ok(Self {
            priority,
            status: optional(&mapping.status),
            project: optional(&mapping.project),
            issuetype: optional(&mapping.issuetype),
            summary: optional(&mapping.summary),
            description: optional(&mapping.description),
        })
    }
}

/// Reads all records from the CSV file at `path`, applying the configured
/// column mapping and sampling.
pub fn load_path(path: &str, config: &AnalysisConfig) -> Result<Vec<Record>, StatsError> {
    let file = File::open(path)?;
    load_records(file, config)
}

/// Reads records from any CSV source with a header row.
///
/// # Errors
///
/// Returns [`StatsError::Format`] if the header row is missing, the
/// mapped priority column is absent, or a data row's field count differs
/// from the header's.
pub fn load_records<R: io::Read>(
    reader: R,
    config: &AnalysisConfig,
) -> Result<Vec<Record>, StatsError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| StatsError::Format(e.to_string()))?
        .clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(StatsError::Format("missing header row".to_string()));
    }
    debug!(columns = headers.len(), "Header parsed");

    let columns = ColumnIndexes::resolve(&headers, &config.column_mapping)?;

    // With first-n sampling we can stop reading early, matching how the
    // source dataset was originally reduced to a workable size.
    let read_cap = match (&config.sample_strategy, config.sample_size) {
        (SampleStrategy::FirstN, Some(n)) => Some(n),
        _ => None,
    };

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        if let Some(cap) = read_cap {
            if records.len() >= cap {
                break;
            }
        }

        let raw = result.map_err(|e| StatsError::Format(e.to_string()))?;
        let row = (i + 1) as u64;

        let cell = |idx: Option<usize>| -> Option<String> {
            idx.and_then(|idx| raw.get(idx))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        records.push(Record {
            row,
            priority: cell(Some(columns.priority)),
            status: cell(columns.status),
            project: cell(columns.project),
            issuetype: cell(columns.issuetype),
            summary: cell(columns.summary),
            description: cell(columns.description),
        });
    }

    if let (SampleStrategy::Random { seed }, Some(n)) =
        (&config.sample_strategy, config.sample_size)
    {
        records = sample_random(records, n, *seed);
    }

    info!(rows = records.len(), "Records loaded");
    Ok(records)
}

/// Uniform sample without replacement, reproducible from `seed`. The
/// selected rows keep their original input order.
fn sample_random(records: Vec<Record>, n: usize, seed: u64) -> Vec<Record> {
    if records.len() <= n {
        return records;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = rand::seq::index::sample(&mut rng, records.len(), n).into_vec();
    picked.sort_unstable();

    info!(from = records.len(), to = n, seed, "Random sample drawn");

    let mut keep = picked.into_iter().peekable();
    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, r)| {
            if keep.peek() == Some(&i) {
                keep.next();
                Some(r)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
priority.name,status.name,project.name,issuetype.name,summary,description
Major,Closed,CORE,Bug,login fails,NPE on submit
,Open,WEB,Bug,slow page,
Critical,Resolved,CORE,Bug,crash,segfault in parser
";

    #[test]
    fn test_load_basic() {
        let config = AnalysisConfig::default();
        let records = load_records(SAMPLE.as_bytes(), &config).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].row, 1);
        assert_eq!(records[0].priority.as_deref(), Some("Major"));
        assert_eq!(records[0].description.as_deref(), Some("NPE on submit"));
    }

    #[test]
    fn test_blank_cells_are_absent() {
        let config = AnalysisConfig::default();
        let records = load_records(SAMPLE.as_bytes(), &config).unwrap();

        assert_eq!(records[1].priority, None);
        assert_eq!(records[1].description, None);
        // blank is distinct from a present value
        assert_eq!(records[1].status.as_deref(), Some("Open"));
    }

    #[test]
    fn test_ragged_row_is_format_error() {
        let input = "priority.name,status.name\nMajor\n";
        let config = AnalysisConfig {
            column_mapping: ColumnMapping {
                priority: "priority.name".to_string(),
                ..ColumnMapping::default()
            },
            ..AnalysisConfig::default()
        };

        let err = load_records(input.as_bytes(), &config).unwrap_err();
        assert!(matches!(err, StatsError::Format(_)));
    }

    #[test]
    fn test_empty_input_is_format_error() {
        let config = AnalysisConfig::default();
        let err = load_records("".as_bytes(), &config).unwrap_err();
        assert!(matches!(err, StatsError::Format(_)));
    }

    #[test]
    fn test_missing_priority_column_is_format_error() {
        let input = "status.name,summary\nOpen,hello\n";
        let config = AnalysisConfig::default();

        let err = load_records(input.as_bytes(), &config).unwrap_err();
        match err {
            StatsError::Format(msg) => assert!(msg.contains("priority.name")),
            other => panic!("expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_optional_column_degrades_to_absent() {
        let input = "priority.name,summary\nMajor,hello\n";
        let config = AnalysisConfig::default();

        let records = load_records(input.as_bytes(), &config).unwrap();
        assert_eq!(records[0].status, None);
        assert_eq!(records[0].summary.as_deref(), Some("hello"));
    }

    #[test]
    fn test_first_n_sampling_stops_early() {
        let config = AnalysisConfig {
            sample_size: Some(2),
            ..AnalysisConfig::default()
        };

        let records = load_records(SAMPLE.as_bytes(), &config).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row, 1);
        assert_eq!(records[1].row, 2);
    }

    #[test]
    fn test_random_sampling_is_deterministic_and_ordered() {
        let config = AnalysisConfig {
            sample_size: Some(2),
            sample_strategy: SampleStrategy::Random { seed: 42 },
            ..AnalysisConfig::default()
        };

        let a = load_records(SAMPLE.as_bytes(), &config).unwrap();
        let b = load_records(SAMPLE.as_bytes(), &config).unwrap();

        assert_eq!(a.len(), 2);
        assert_eq!(a, b);
        // input order preserved
        assert!(a[0].row < a[1].row);
    }
}
