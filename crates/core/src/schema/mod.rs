mod index;

pub use index::{SchemaEntry, SchemaIndex};
