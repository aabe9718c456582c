pub mod cap;
pub mod error;
pub mod parser;

pub use cap::proto_caps;
pub use error::ProtoError;
pub use parser::parse_schema;

use modscope_plugin::ExtensionMatcher;

pub const PROTO_EXTENSION: &str = "proto";

/// Schema plugin for protobuf interface definitions.
pub struct ProtoPlugin {
    extension: String,
    matcher: ExtensionMatcher,
}

impl ProtoPlugin {
    pub fn new() -> Self {
        Self::with_extension(PROTO_EXTENSION)
    }

    pub fn with_extension(extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        let extension = extension.trim_start_matches('.').to_string();
        Self {
            matcher: ExtensionMatcher::new(extension.clone()),
            extension,
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl Default for ProtoPlugin {
    fn default() -> Self {
        Self::new()
    }
}
