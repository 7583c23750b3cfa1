//! Parser layer for reading text into tables

mod json;
mod text;

use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::ParseError;
use crate::model::Table;

pub use self::json::JsonParser;
pub use self::text::TextParser;

/// Trait for turning input text into a Table
pub trait Parser: Send + Sync {
    /// Parse text and return a Table
    fn parse(&self, text: &str, config: &Config) -> Result<Table, ParseError>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Parse comma-delimited text whose first row is the header
pub fn parse(text: &str) -> Result<Table, ParseError> {
    TextParser.parse(text, &Config::default())
}

/// Parse delimited text with the delimiter and ragged-row policy from `config`
pub fn parse_with(text: &str, config: &Config) -> Result<Table, ParseError> {
    TextParser.parse(text, config)
}

/// Factory for choosing a parser based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(TextParser), Box::new(JsonParser)],
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser, ParseError> {
        let ext = extension(path);

        self.parsers
            .iter()
            .find(|parser| parser.supports_extension(&ext))
            .map(|parser| parser.as_ref())
            .ok_or_else(|| {
                ParseError::UnsupportedFormat(if ext.is_empty() {
                    "unknown".to_string()
                } else {
                    ext
                })
            })
    }

    /// Read and parse a file using the appropriate parser.
    ///
    /// `.tsv` files are read tab-delimited unless the config already names a
    /// delimiter other than the default comma.
    pub fn parse_file(&self, path: &Path, config: &Config) -> Result<Table, ParseError> {
        let parser = self.get_parser(path)?;
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = text.len(), "read input file");

        if extension(path) == "tsv" && config.delimiter == b',' {
            let config = config.clone().with_delimiter(b'\t');
            return parser.parse(&text, &config);
        }
        parser.parse(&text, config)
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
