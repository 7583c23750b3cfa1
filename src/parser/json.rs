//! JSON array parser

use indexmap::IndexSet;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::config::Config;
use crate::error::ParseError;
use crate::model::{Record, Table, Value};

use super::Parser;

/// Parser for JSON arrays of objects
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, text: &str, _config: &Config) -> Result<Table, ParseError> {
        let value: JsonValue = serde_json::from_str(text)?;

        // Handle both arrays and single objects
        let items = match value {
            JsonValue::Array(arr) => arr,
            obj @ JsonValue::Object(_) => vec![obj],
            _ => return Err(ParseError::JsonShape),
        };

        if items.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // Columns are the union of keys across all objects, in first-seen order
        let mut column_names: IndexSet<String> = IndexSet::new();
        let mut records = Vec::with_capacity(items.len());
        for item in items {
            let JsonValue::Object(obj) = item else {
                return Err(ParseError::JsonShape);
            };
            let record: Record = obj
                .into_iter()
                .map(|(key, value)| {
                    column_names.insert(key.clone());
                    (key, json_value_to_cell(value))
                })
                .collect();
            records.push(record);
        }

        debug!(rows = records.len(), columns = column_names.len(), "parsed JSON");
        Ok(Table::new(column_names.into_iter().collect(), records))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "json")
    }
}

fn json_value_to_cell(value: JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::text(b.to_string()),
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) => Value::Number(f),
            None => Value::text(n.to_string()),
        },
        JsonValue::String(s) => Value::text(s),
        // Nested values are kept as their JSON encoding
        nested => Value::text(nested.to_string()),
    }
}
