pub mod inventory;
pub mod module;

pub use inventory::*;
pub use module::*;
