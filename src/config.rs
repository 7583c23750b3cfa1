//! Configuration handling for tabql

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Output format for query results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Csv,
}

/// What the text parser does with rows whose width differs from the header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaggedRows {
    /// Drop extra trailing fields; leave missing trailing columns absent
    #[default]
    Lenient,
    /// Fail the parse at the first ragged row
    Reject,
}

/// What projection does with requested columns the table does not declare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingColumns {
    /// Silently leave the column out of each record that lacks it
    #[default]
    Omit,
    /// Fail with `QueryError::UnknownColumn`
    Reject,
}

/// Configuration for parsing, querying and rendering
#[derive(Debug, Clone)]
pub struct Config {
    /// Input file; `None` reads standard input
    pub input: Option<PathBuf>,
    /// Field delimiter for delimited text
    pub delimiter: u8,
    /// Ragged-row policy for the text parser
    pub ragged_rows: RaggedRows,
    /// Missing-column policy for projection
    pub missing_columns: MissingColumns,
    /// Output format
    pub output_format: OutputFormat,
    /// Emit ANSI colors in terminal output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            delimiter: b',',
            ragged_rows: RaggedRows::default(),
            missing_columns: MissingColumns::default(),
            output_format: OutputFormat::default(),
            color: false,
        }
    }
}

impl Config {
    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the ragged-row policy
    pub fn with_ragged_rows(mut self, policy: RaggedRows) -> Self {
        self.ragged_rows = policy;
        self
    }

    /// Set the missing-column policy
    pub fn with_missing_columns(mut self, policy: MissingColumns) -> Self {
        self.missing_columns = policy;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Enable colored terminal output
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}
