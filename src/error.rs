//! Error types for parsing and querying tables

use thiserror::Error;

/// Failure to turn input text into a table
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input had no non-blank rows, so there is not even a header
    #[error("input contains no rows")]
    EmptyInput,

    /// A row's width differs from the header under the strict ragged-row policy
    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("failed to read delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON input must be an array of objects or a single object")]
    JsonShape,

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Failure while applying a query operation
#[derive(Debug, Error)]
pub enum QueryError {
    /// A column list or rename mapping was malformed (duplicate or empty names)
    #[error("invalid column list: {0}")]
    InvalidColumnList(String),

    /// Only raised when projecting under `MissingColumns::Reject`
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("invalid condition: {0}")]
    InvalidCondition(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
