//! The immutable table value

use indexmap::IndexSet;

use super::record::Record;

/// An ordered sequence of records plus the table's declared column order.
///
/// `columns` always covers every field name that appears in any record; records may
/// still lack some of the declared columns (ragged input, lenient projection).
/// Tables are never modified after construction: every query operation builds a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    /// Create a table from a declared column order and its records.
    ///
    /// Duplicate column names are collapsed to their first position, and names that
    /// only appear in records are appended in first-seen order.
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut declared: IndexSet<String> = columns.into_iter().collect();
        for record in &records {
            for name in record.names() {
                if !declared.contains(name) {
                    declared.insert(name.to_string());
                }
            }
        }
        Self {
            columns: declared.into_iter().collect(),
            records,
        }
    }

    /// Create a table whose columns are the union of the records' fields
    pub fn from_records(records: Vec<Record>) -> Self {
        Self::new(Vec::new(), records)
    }

    /// Declared column order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All records, in table order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records in table order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Check whether the table declares a column
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
