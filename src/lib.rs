//! tabql - Functional queries over in-memory tables
//!
//! Parses header-first delimited text (or JSON arrays of objects) into immutable
//! tables and composes projection, renaming and restriction over them. Every
//! operation returns a new table.

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod query;

pub use config::Config;
pub use error::{ParseError, QueryError};
pub use model::{Record, Sequence, Table, Value};
pub use parser::{parse, parse_with};
pub use query::{pipeline, project, rename, restrict, Condition, Pipeline, Step};
