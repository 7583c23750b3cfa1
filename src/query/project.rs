//! Projection: keep and reorder columns

use tracing::debug;

use crate::config::{Config, MissingColumns};
use crate::error::QueryError;
use crate::model::{Record, Table};

use super::validate_columns;

/// Keep only `columns`, in the requested order.
///
/// A requested column that a record lacks is left out of that record. Use
/// [`project_with`] and `MissingColumns::Reject` to fail on unknown columns instead.
pub fn project<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<Table, QueryError> {
    project_with(table, columns, &Config::default())
}

/// Projection honoring the missing-column policy in `config`
pub fn project_with<S: AsRef<str>>(
    table: &Table,
    columns: &[S],
    config: &Config,
) -> Result<Table, QueryError> {
    let requested = validate_columns(columns)?;

    if config.missing_columns == MissingColumns::Reject {
        if let Some(missing) = requested.iter().find(|name| !table.has_column(name)) {
            return Err(QueryError::UnknownColumn(missing.to_string()));
        }
    }

    let records: Vec<Record> = table
        .iter()
        .map(|record| project_record(record, &requested))
        .collect();
    let declared: Vec<String> = requested
        .iter()
        .filter(|name| table.has_column(name))
        .map(|name| name.to_string())
        .collect();

    debug!(columns = declared.len(), rows = records.len(), "project");
    Ok(Table::new(declared, records))
}

fn project_record(record: &Record, columns: &[&str]) -> Record {
    columns
        .iter()
        .filter_map(|&name| record.get(name).map(|value| (name, value.clone())))
        .collect()
}
