//! Descriptive-statistics queries over the finalized table.
//!
//! This module holds the read-only aggregate queries (frequency,
//! cross-tabulation, grouped summary), the raw-file survey, and the
//! orchestration that wires the pipeline stages into a report.

pub mod aggregate;
pub mod analyzer;
pub mod inspect;
pub mod types;
pub mod utility;
