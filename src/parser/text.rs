//! Delimited text parser
//!
//! Rows are split on line terminators and fields on a single delimiter byte; every
//! field is trimmed. There is no quoting or escaping: a `"` is an ordinary character
//! and a delimiter inside a field always splits it, so text containing embedded
//! delimiters does not round-trip.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, trace};

use crate::config::{Config, RaggedRows};
use crate::error::ParseError;
use crate::model::{Record, Table, Value};

use super::Parser;

/// Parser for header-first delimited text
pub struct TextParser;

impl Parser for TextParser {
    fn parse(&self, text: &str, config: &Config) -> Result<Table, ParseError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .delimiter(config.delimiter)
            .from_reader(text.as_bytes());

        let mut rows = reader
            .records()
            .filter(|row| !matches!(row, Ok(row) if is_blank(row)));

        let header = rows.next().ok_or(ParseError::EmptyInput)??;
        let columns: Vec<String> = header.iter().map(str::to_string).collect();
        let width = columns.len();

        let mut records = Vec::new();
        let mut ragged = 0usize;
        for result in rows {
            let row = result?;
            if row.len() != width {
                let line = row.position().map_or(0, |p| p.line());
                if config.ragged_rows == RaggedRows::Reject {
                    return Err(ParseError::RaggedRow {
                        line,
                        expected: width,
                        found: row.len(),
                    });
                }
                trace!(line, expected = width, found = row.len(), "ragged row");
                ragged += 1;
            }

            // zip stops at the shorter side: extra fields drop, missing ones stay absent
            let record: Record = columns
                .iter()
                .zip(row.iter())
                .map(|(name, field)| (name.as_str(), Value::text(field)))
                .collect();
            records.push(record);
        }

        debug!(rows = records.len(), columns = width, ragged, "parsed delimited text");
        Ok(Table::new(columns, records))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "txt")
    }
}

/// A line with nothing but whitespace
fn is_blank(row: &StringRecord) -> bool {
    row.len() <= 1 && row.iter().all(str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sequence;

    fn parse(text: &str) -> Result<Table, ParseError> {
        TextParser.parse(text, &Config::default())
    }

    #[test]
    fn test_parse_people() {
        let table = parse("name,age,hair\nMerble,35,red\nBob,64,blonde").unwrap();
        assert_eq!(table.columns(), ["name", "age", "hair"]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.records()[0],
            Record::from_iter([("name", "Merble"), ("age", "35"), ("hair", "red")])
        );
        assert_eq!(
            table.records()[1],
            Record::from_iter([("name", "Bob"), ("age", "64"), ("hair", "blonde")])
        );
    }

    #[test]
    fn test_fields_are_trimmed() {
        let table = parse("name, age , hair\r\n Merble , 35,red \r\n").unwrap();
        assert_eq!(table.columns(), ["name", "age", "hair"]);
        assert_eq!(table.records()[0].get("age"), Some(&Value::from("35")));
        assert_eq!(table.records()[0].get("hair"), Some(&Value::from("red")));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse(""), Err(ParseError::EmptyInput)));
        assert!(matches!(parse("\n  \n\n"), Err(ParseError::EmptyInput)));
    }

    #[test]
    fn test_header_only() {
        let table = parse("title,isbn,ed\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns(), ["title", "isbn", "ed"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table = parse("a,b\n\n1,2\n   \n3,4\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.last().and_then(|r| r.get("a")), Some(&Value::from("3")));
    }

    #[test]
    fn test_ragged_rows_lenient() {
        let table = parse("a,b,c\n1,2\n1,2,3,4").unwrap();
        let short = &table.records()[0];
        assert_eq!(short.names().collect::<Vec<_>>(), ["a", "b"]);
        assert!(!short.contains("c"));
        let long = &table.records()[1];
        assert_eq!(long.names().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(long.get("c"), Some(&Value::from("3")));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let config = Config::default().with_ragged_rows(RaggedRows::Reject);
        let err = TextParser.parse("a,b,c\n1,2,3\n1,2", &config).unwrap_err();
        match err {
            ParseError::RaggedRow {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_quotes_are_literal() {
        let table = parse("title,note\n\"SICP\",\"a, b\"").unwrap();
        let record = &table.records()[0];
        assert_eq!(record.get("title"), Some(&Value::from("\"SICP\"")));
        // the embedded comma splits the field and the remainder is dropped
        assert_eq!(record.get("note"), Some(&Value::from("\"a")));
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let table = parse("a,b,a\n1,2,3").unwrap();
        assert_eq!(table.columns(), ["a", "b"]);
        assert_eq!(
            table.records()[0],
            Record::from_iter([("a", "3"), ("b", "2")])
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let config = Config::default().with_delimiter(b'\t');
        let table = TextParser.parse("a\tb\n1,5\t2", &config).unwrap();
        assert_eq!(table.records()[0].get("a"), Some(&Value::from("1,5")));
    }
}
