//! Delimited text output

use std::io::Write;

use anyhow::Result;

use crate::model::{Table, Value};

use super::OutputFormatter;

/// Writes the header and one line per record; absent and null cells are empty.
/// Fields are never quoted, matching the text parser, which keeps quotes literal.
pub struct CsvOutput {
    delimiter: u8,
}

impl CsvOutput {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl OutputFormatter for CsvOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(&mut *writer);

        csv_writer.write_record(table.columns())?;
        for record in table {
            csv_writer.write_record(table.columns().iter().map(|column| {
                match record.get(column) {
                    None | Some(Value::Null) => String::new(),
                    Some(value) => value.display().into_owned(),
                }
            }))?;
        }
        csv_writer.flush()?;

        Ok(())
    }
}
