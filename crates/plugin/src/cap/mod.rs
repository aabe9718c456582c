pub mod matcher;
pub mod parse;
pub mod project;

pub use matcher::*;
pub use parse::*;
pub use project::*;
