//! Data model for in-memory tables

mod record;
mod sequence;
mod table;
mod value;

pub use record::Record;
pub use sequence::Sequence;
pub use table::Table;
pub use value::Value;
