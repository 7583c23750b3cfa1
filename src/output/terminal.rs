//! Box-drawn terminal table

use std::io::Write;

use anyhow::Result;
use termcolor::{Ansi, Color, ColorSpec, WriteColor};

use crate::model::Table;

use super::OutputFormatter;

/// Terminal output, optionally with a colored header
pub struct TerminalOutput {
    color: bool,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self { color: false }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn write_header(&self, line: &str, writer: &mut dyn Write) -> Result<()> {
        if !self.color {
            writeln!(writer, "{}", line)?;
            return Ok(());
        }

        let mut ansi = Ansi::new(writer);
        ansi.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(ansi, "{}", line)?;
        ansi.reset()?;
        writeln!(ansi)?;
        Ok(())
    }

    fn write_footer(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        match table.row_count() {
            1 => writeln!(writer, "(1 row)")?,
            n => writeln!(writer, "({} rows)", n)?,
        }
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        if table.column_count() == 0 {
            writeln!(writer, "(no columns)")?;
            return self.write_footer(table, writer);
        }

        // Cells a record lacks render empty, null cells render NULL
        let rows: Vec<Vec<String>> = table
            .iter()
            .map(|record| {
                table
                    .columns()
                    .iter()
                    .map(|column| {
                        record
                            .get(column)
                            .map(|value| value.display().into_owned())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        let lines = build_table(table.columns(), &rows);
        for (i, line) in lines.iter().enumerate() {
            if i == 1 {
                self.write_header(line, writer)?;
            } else {
                writeln!(writer, "{}", line)?;
            }
        }

        self.write_footer(table, writer)
    }
}

/// Lay out a header and rows as box-drawn lines: top border, header, separator,
/// one line per row, bottom border.
fn build_table(header: &[String], rows: &[Vec<String>]) -> Vec<String> {
    let mut col_widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < col_widths.len() {
                col_widths[i] = col_widths[i].max(cell.chars().count());
            }
        }
    }

    let border = |left: char, mid: char, right: char| {
        let segments: Vec<String> = col_widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    };
    let line = |cells: &[String]| {
        let mut out = String::from("│");
        for (i, cell) in cells.iter().enumerate() {
            let width = col_widths.get(i).copied().unwrap_or(0);
            out.push_str(&format!(" {:width$} │", cell, width = width));
        }
        out
    };

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(border('┌', '┬', '┐'));
    lines.push(line(header));
    lines.push(border('├', '┼', '┤'));
    for row in rows {
        lines.push(line(row));
    }
    lines.push(border('└', '┴', '┘'));
    lines
}
