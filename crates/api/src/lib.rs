pub mod error;
pub mod models;

// Re-export commonly used types
pub use error::{ParseError, UnresolvedMessageError, Warning};
pub use models::*;
