//! Row types for the two stages of the table: as parsed, and as finalized
//! for aggregation.

use serde::Serialize;

/// One bug report as parsed from the source file.
///
/// Absent or empty cells are `None`, never `Some("")`, so later stages can
/// tell a blank cell from a zero-length value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// 1-based data row number in the source (header excluded).
    pub row: u64,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub project: Option<String>,
    pub issuetype: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
}

/// A finalized row after cleaning and feature derivation. Immutable input
/// to every aggregate query.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisRecord {
    pub row: u64,
    /// Normalized severity label, e.g. "Major".
    pub severity: String,
    /// Workflow status, "Unknown" when the source cell was blank.
    pub status: String,
    /// Issue type, "Unknown" when the source cell was blank.
    pub issuetype: String,
    pub project: Option<String>,
    /// Character count of the description, falling back to the summary.
    pub desc_length: usize,
    /// Project name if among the top-K most frequent, else "Other".
    pub project_grouped: String,
}

/// Categorical fields an aggregate query can group or count by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Severity,
    Status,
    IssueType,
    ProjectGrouped,
}

impl Field {
    /// Column name used for this field in report output.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Severity => "severity",
            Field::Status => "status",
            Field::IssueType => "issuetype",
            Field::ProjectGrouped => "project_grouped",
        }
    }
}

/// Numeric fields a grouped summary can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    DescLength,
}

impl NumericField {
    pub fn name(&self) -> &'static str {
        match self {
            NumericField::DescLength => "desc_length",
        }
    }
}

impl AnalysisRecord {
    /// Value of a categorical field on this record.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Severity => &self.severity,
            Field::Status => &self.status,
            Field::IssueType => &self.issuetype,
            Field::ProjectGrouped => &self.project_grouped,
        }
    }

    /// Value of a numeric field on this record.
    pub fn get_numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::DescLength => self.desc_length as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisRecord {
        AnalysisRecord {
            row: 1,
            severity: "Major".to_string(),
            status: "Closed".to_string(),
            issuetype: "Bug".to_string(),
            project: Some("CORE".to_string()),
            desc_length: 42,
            project_grouped: "CORE".to_string(),
        }
    }

    #[test]
    fn test_get_categorical_fields() {
        let r = sample();
        assert_eq!(r.get(Field::Severity), "Major");
        assert_eq!(r.get(Field::Status), "Closed");
        assert_eq!(r.get(Field::IssueType), "Bug");
        assert_eq!(r.get(Field::ProjectGrouped), "CORE");
    }

    #[test]
    fn test_get_numeric_field() {
        let r = sample();
        assert_eq!(r.get_numeric(NumericField::DescLength), 42.0);
    }
}
