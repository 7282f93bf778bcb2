//! Output formatting and persistence for analysis reports.
//!
//! Supports pretty-printing, JSON serialization to stdout, and JSON
//! file output.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &impl std::fmt::Debug) {
    debug!("{:#?}", report);
}

/// Writes a report as pretty-printed JSON to stdout.
pub fn print_json(report: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes a report as pretty-printed JSON to a file, replacing any
/// previous contents.
pub fn write_json(path: &str, report: &impl Serialize) -> Result<()> {
    debug!(path, "Writing JSON report");
    let body = serde_json::to_string_pretty(report)?;
    std::fs::write(path, body)?;
    Ok(())
}
