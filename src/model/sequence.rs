//! Positional access over ordered collections

use super::record::Record;
use super::table::Table;
use super::value::Value;

/// An ordered collection that can be indexed by position.
///
/// Implemented for [`Table`] (rows) and [`Record`] (field values), the two types in
/// the model that have a meaningful positional order.
pub trait Sequence {
    type Item;

    /// Number of items
    fn len(&self) -> usize;

    /// Item at `index`, if in bounds
    fn nth(&self, index: usize) -> Option<&Self::Item>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn first(&self) -> Option<&Self::Item> {
        self.nth(0)
    }

    fn second(&self) -> Option<&Self::Item> {
        self.nth(1)
    }

    fn last(&self) -> Option<&Self::Item> {
        self.len().checked_sub(1).and_then(|i| self.nth(i))
    }
}

impl Sequence for Table {
    type Item = Record;

    fn len(&self) -> usize {
        self.row_count()
    }

    fn nth(&self, index: usize) -> Option<&Record> {
        self.records().get(index)
    }
}

impl Sequence for Record {
    type Item = Value;

    fn len(&self) -> usize {
        self.field_count()
    }

    fn nth(&self, index: usize) -> Option<&Value> {
        self.value_at(index)
    }
}
