pub mod assembler;
pub mod config;
pub mod error;
pub mod logging;
pub mod project;
pub mod resolver;
pub mod schema;
pub mod walker;

pub use assembler::{Discoverer, DiscovererBuilder, discover, discover_with};
pub use config::{DiscoveryOptions, DiscoveryOptionsBuilder};
pub use error::{DiscoveryError, Result};
pub use modscope_api::{Inventory, Module, Msg, ParseError, UnresolvedMessageError, Warning};
pub use resolver::{Resolution, UriResolver};
pub use schema::{SchemaEntry, SchemaIndex};
pub use walker::{DiscoveredModule, SourceWalker};
