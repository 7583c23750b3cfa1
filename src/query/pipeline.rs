//! Left-to-right composition of query steps

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::error::QueryError;
use crate::model::{Record, Table};

use super::{project_with, rename, restrict};

/// A shareable row predicate
pub type Predicate = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// One query operation with its arguments bound
#[derive(Clone)]
pub enum Step {
    Project(Vec<String>),
    Rename(Vec<(String, String)>),
    Restrict(Predicate),
}

impl Step {
    pub fn project<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Step::Project(columns.into_iter().map(Into::into).collect())
    }

    pub fn rename<I, O, N>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (O, N)>,
        O: Into<String>,
        N: Into<String>,
    {
        Step::Rename(
            mapping
                .into_iter()
                .map(|(old, new)| (old.into(), new.into()))
                .collect(),
        )
    }

    pub fn restrict<P>(predicate: P) -> Self
    where
        P: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        Step::Restrict(Arc::new(predicate))
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Project(_) => "project",
            Step::Rename(_) => "rename",
            Step::Restrict(_) => "restrict",
        }
    }

    /// Apply this step to a table
    pub fn apply(&self, table: &Table, config: &Config) -> Result<Table, QueryError> {
        match self {
            Step::Project(columns) => project_with(table, columns, config),
            Step::Rename(mapping) => rename(table, mapping),
            Step::Restrict(predicate) => Ok(restrict(table, |record| predicate(record))),
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Project(columns) => f.debug_tuple("Project").field(columns).finish(),
            Step::Rename(mapping) => f.debug_tuple("Rename").field(mapping).finish(),
            Step::Restrict(_) => f.write_str("Restrict(<predicate>)"),
        }
    }
}

/// Apply `steps` left to right; the output of each step feeds the next.
///
/// Order matters: a projection after a rename names the new columns, one before it
/// names the old ones.
pub fn pipeline(table: &Table, steps: &[Step]) -> Result<Table, QueryError> {
    pipeline_with(table, steps, &Config::default())
}

/// [`pipeline`] with the policies from `config`
pub fn pipeline_with(table: &Table, steps: &[Step], config: &Config) -> Result<Table, QueryError> {
    steps
        .iter()
        .enumerate()
        .try_fold(table.clone(), |current, (index, step)| {
            let next = step.apply(&current, config)?;
            debug!(
                step = index,
                kind = step.kind(),
                rows_in = current.row_count(),
                rows_out = next.row_count(),
                "pipeline step"
            );
            Ok(next)
        })
}

/// Builder for a reusable sequence of steps
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a projection
    pub fn project<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.push(Step::project(columns));
        self
    }

    /// Append a rename
    pub fn rename<I, O, N>(mut self, mapping: I) -> Self
    where
        I: IntoIterator<Item = (O, N)>,
        O: Into<String>,
        N: Into<String>,
    {
        self.steps.push(Step::rename(mapping));
        self
    }

    /// Append a restriction
    pub fn restrict<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.steps.push(Step::restrict(predicate));
        self
    }

    /// Append a prepared step
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run against a table with default policies
    pub fn run(&self, table: &Table) -> Result<Table, QueryError> {
        pipeline(table, &self.steps)
    }

    /// Run against a table with the policies from `config`
    pub fn run_with(&self, table: &Table, config: &Config) -> Result<Table, QueryError> {
        pipeline_with(table, &self.steps, config)
    }
}
