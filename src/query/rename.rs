//! Renaming: column aliasing with last-write-wins conflict resolution

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::QueryError;
use crate::model::{Record, Table};

/// Rename columns according to `mapping`, a list of `(old, new)` pairs.
///
/// All renames apply at once, so `[("a", "b"), ("b", "a")]` swaps two columns.
/// A renamed field keeps the position of the field it came from; other fields pass
/// through unchanged. When an old name is listed twice the later pair wins, and when
/// two fields would end up with the same name the one produced by the later pair wins
/// (a renamed field always beats a field that kept its name). Old names a record does
/// not have are ignored.
pub fn rename<O, N>(table: &Table, mapping: &[(O, N)]) -> Result<Table, QueryError>
where
    O: AsRef<str>,
    N: AsRef<str>,
{
    let plan = RenamePlan::new(mapping)?;

    let records: Vec<Record> = table
        .iter()
        .map(|record| {
            plan.apply(record.iter())
                .into_iter()
                .map(|(name, value)| (name, value.clone()))
                .collect()
        })
        .collect();
    let declared: Vec<String> = plan
        .apply(table.columns().iter().map(|name| (name.as_str(), ())))
        .into_iter()
        .map(|(name, ())| name)
        .collect();

    debug!(pairs = mapping.len(), rows = records.len(), "rename");
    Ok(Table::new(declared, records))
}

/// Resolved mapping: old name to (new name, index of the pair that produced it)
struct RenamePlan<'m> {
    targets: FxHashMap<&'m str, (&'m str, usize)>,
}

impl<'m> RenamePlan<'m> {
    fn new<O, N>(mapping: &'m [(O, N)]) -> Result<Self, QueryError>
    where
        O: AsRef<str>,
        N: AsRef<str>,
    {
        let mut targets = FxHashMap::default();
        for (rank, (old, new)) in mapping.iter().enumerate() {
            let (old, new) = (old.as_ref(), new.as_ref());
            if old.is_empty() || new.is_empty() {
                return Err(QueryError::InvalidColumnList(
                    "rename mapping contains an empty name".to_string(),
                ));
            }
            targets.insert(old, (new, rank));
        }
        Ok(Self { targets })
    }

    /// Rename a sequence of named items, resolving collisions.
    fn apply<'f, T>(&self, fields: impl Iterator<Item = (&'f str, T)>) -> Vec<(String, T)> {
        let fields: Vec<(&str, T)> = fields.collect();

        // Output name and rank per field; `None` (kept its name) ranks below any rename
        let resolved: Vec<(&str, Option<usize>)> = fields
            .iter()
            .map(|(name, _)| match self.targets.get(*name) {
                Some(&(new, rank)) => (new, Some(rank)),
                None => (*name, None),
            })
            .collect();

        let mut winners: FxHashMap<&str, (Option<usize>, usize)> = FxHashMap::default();
        for (pos, &(name, rank)) in resolved.iter().enumerate() {
            match winners.entry(name) {
                Entry::Vacant(slot) => {
                    slot.insert((rank, pos));
                }
                Entry::Occupied(mut slot) => {
                    if rank > slot.get().0 {
                        slot.insert((rank, pos));
                    }
                }
            }
        }

        let mut out = Vec::with_capacity(winners.len());
        for (pos, ((name, _), (_, item))) in resolved.iter().zip(fields).enumerate() {
            if winners.get(*name).map(|&(_, winner)| winner) == Some(pos) {
                out.push((name.to_string(), item));
            }
        }
        out
    }
}
