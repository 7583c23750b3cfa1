//! Restriction: stable row filtering

use tracing::debug;

use crate::model::{Record, Table};

/// Keep the records for which `predicate` holds, in their original relative order.
///
/// The result is accumulated fresh from a read-only pass over `table`; the predicate
/// may be called in any order and should depend only on the record it is given.
pub fn restrict<P>(table: &Table, predicate: P) -> Table
where
    P: Fn(&Record) -> bool,
{
    let records: Vec<Record> = table
        .iter()
        .filter(|record| predicate(record))
        .cloned()
        .collect();

    debug!(kept = records.len(), of = table.row_count(), "restrict");
    Table::new(table.columns().to_vec(), records)
}
