//! Query operations over tables
//!
//! Every operation takes a table by reference and returns a new one. Projection and
//! renaming keep row order; restriction keeps the relative order of retained rows.

mod condition;
mod pipeline;
mod project;
mod rename;
mod restrict;

use rustc_hash::FxHashSet;

use crate::error::QueryError;
use crate::model::{Record, Table};

pub use condition::{CompareOp, Condition};
pub use pipeline::{pipeline, pipeline_with, Pipeline, Predicate, Step};
pub use project::{project, project_with};
pub use rename::rename;
pub use restrict::restrict;

impl Table {
    /// See [`project`]
    pub fn project<S: AsRef<str>>(&self, columns: &[S]) -> Result<Table, QueryError> {
        project(self, columns)
    }

    /// See [`rename`]
    pub fn rename<O, N>(&self, mapping: &[(O, N)]) -> Result<Table, QueryError>
    where
        O: AsRef<str>,
        N: AsRef<str>,
    {
        rename(self, mapping)
    }

    /// See [`restrict`]
    pub fn restrict<P>(&self, predicate: P) -> Table
    where
        P: Fn(&Record) -> bool,
    {
        restrict(self, predicate)
    }
}

/// Check a column list for empty and repeated names
fn validate_columns<S: AsRef<str>>(columns: &[S]) -> Result<Vec<&str>, QueryError> {
    let mut seen = FxHashSet::default();
    columns
        .iter()
        .map(|column| {
            let name = column.as_ref();
            if name.is_empty() {
                Err(QueryError::InvalidColumnList("empty column name".to_string()))
            } else if !seen.insert(name) {
                Err(QueryError::InvalidColumnList(format!(
                    "column '{}' listed more than once",
                    name
                )))
            } else {
                Ok(name)
            }
        })
        .collect()
}
