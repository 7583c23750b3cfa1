//! Output formatting for query results

mod csv;
mod json;
mod terminal;

use std::io::Write;

use anyhow::Result;

use crate::config::{Config, OutputFormat};
use crate::model::Table;

pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a table to a writer
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on the configured format
    pub fn create(config: &Config) -> Box<dyn OutputFormatter> {
        match config.output_format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new().with_color(config.color)),
            OutputFormat::Json => Box::new(JsonOutput::new()),
            OutputFormat::Csv => Box::new(CsvOutput::new(config.delimiter)),
        }
    }
}

/// Render a table to stdout
pub fn render_to_stdout(table: &Table, config: &Config) -> Result<()> {
    let formatter = OutputFactory::create(config);
    let mut stdout = std::io::stdout().lock();
    formatter.render(table, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}
