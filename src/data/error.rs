use thiserror::Error;

/// Errors raised by the loader and the aggregator.
///
/// An empty dataset is not an error; see [`SummaryResult::Empty`](super::model::SummaryResult).
#[derive(Debug, Error)]
pub enum DataError {
    /// The source could not be opened or read.
    #[error("cannot read data source '{name}'")]
    SourceUnavailable {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A required column is missing or its value is not a number.
    #[error("line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("bucket count must be a positive integer, got {0}")]
    InvalidBucketCount(usize),
}

impl DataError {
    pub(crate) fn malformed(line: u64, reason: impl Into<String>) -> Self {
        DataError::MalformedRow {
            line,
            reason: reason.into(),
        }
    }
}
