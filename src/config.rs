//! Analysis configuration.
//!
//! All options have defaults matching the bug-report dataset this tool was
//! built around, so `AnalysisConfig::default()` works out of the box.
//! Stored as a plain JSON object on disk:
//! ```json
//! {
//!   "top_project_count": 10,
//!   "sample_size": 100000,
//!   "sample_strategy": { "kind": "first-n" },
//!   "column_mapping": { "priority": "priority.name" }
//! }
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Binds internal field names to source column headers.
///
/// Header naming in tracker exports varies (`priority.name` vs
/// `priority`), so the binding is configuration rather than hard-coded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnMapping {
    pub priority: String,
    pub status: String,
    pub project: String,
    pub issuetype: String,
    pub summary: String,
    pub description: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            priority: "priority.name".to_string(),
            status: "status.name".to_string(),
            project: "project.name".to_string(),
            issuetype: "issuetype.name".to_string(),
            summary: "summary".to_string(),
            description: "description".to_string(),
        }
    }
}

/// How to reduce an oversized source to `sample_size` rows.
///
/// Both strategies are reproducible from the config alone: `FirstN`
/// keeps the first N data rows in file order; `Random` draws a uniform
/// sample without replacement from a seeded generator and preserves the
/// original row order of the selected rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SampleStrategy {
    FirstN,
    Random { seed: u64 },
}

impl Default for SampleStrategy {
    fn default() -> Self {
        SampleStrategy::FirstN
    }
}

/// Top-level knobs for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of projects kept before collapsing the tail into "Other".
    pub top_project_count: usize,
    pub column_mapping: ColumnMapping,
    /// Cap on rows read from the source; `None` reads everything.
    pub sample_size: Option<usize>,
    pub sample_strategy: SampleStrategy,
    /// Make non-canonical severity labels fatal instead of warned.
    pub strict_labels: bool,
    /// Produce empty aggregate results instead of failing when cleaning
    /// removes every row.
    pub allow_empty: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_project_count: 10,
            column_mapping: ColumnMapping::default(),
            sample_size: None,
            sample_strategy: SampleStrategy::default(),
            strict_labels: false,
            allow_empty: false,
        }
    }
}

impl AnalysisConfig {
    /// Loads the config from a JSON file at `path`. Missing keys take
    /// their defaults.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
