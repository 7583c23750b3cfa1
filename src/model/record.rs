//! A single row: ordered named fields

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::value::Value;

/// An ordered mapping from column name to value.
///
/// Field order is the record's own; two records with the same fields in a different
/// order are not equal.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len() && self.fields.iter().eq(other.fields.iter())
    }
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this record with `name` set to `value`.
    ///
    /// An existing field keeps its position and gets the new value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Get a value by column name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Check whether the record has a field called `name`
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in record order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in record order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Field at a position, with its name
    pub fn field(&self, index: usize) -> Option<(&str, &Value)> {
        self.fields
            .get_index(index)
            .map(|(name, value)| (name.as_str(), value))
    }

    pub(crate) fn value_at(&self, index: usize) -> Option<&Value> {
        self.fields.get_index(index).map(|(_, value)| value)
    }

    pub(crate) fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
