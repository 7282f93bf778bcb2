use std::io;

use thiserror::Error;

/// Error type for loading, cleaning, and aggregation failures.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The input is not a well-formed delimited table (missing header,
    /// ragged row, unmapped column, unreadable encoding). Fatal: the
    /// downstream statistics require a complete, consistent table.
    #[error("input format error: {0}")]
    Format(String),

    /// Strict mode rejected severity labels outside the canonical set.
    #[error("unexpected severity label(s) after normalization: {labels}")]
    UnexpectedLabels { labels: String },

    /// Every row was removed by cleaning, so no aggregate is meaningful.
    #[error("no rows remain after cleaning")]
    EmptyDataset,

    #[error(transparent)]
    Io(#[from] io::Error),
}
