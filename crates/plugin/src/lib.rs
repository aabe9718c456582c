use std::fmt::Debug;
use std::sync::Arc;

pub mod cap;
pub mod model;
pub mod naming;
pub mod utils;

pub use cap::*;
pub use model::*;
pub use naming::{LastSegmentAsService, PackageAsService, ServiceNamingConvention};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Invalid query: {0}")]
    Query(String),
    #[error("Capture name '{0}' not found in SCM")]
    MissingCapture(String),
    #[error("Language error: {0}")]
    Language(String),
}

/// Capabilities for the schema side of a project (interface definition files).
#[derive(Clone)]
pub struct SchemaCaps {
    pub matcher: Arc<dyn FileMatcherCap>,
    pub parser: Arc<dyn SchemaParseCap>,
}

/// Capabilities for the implementation side of a project (module sources).
#[derive(Clone)]
pub struct SourceCaps {
    pub matcher: Arc<dyn FileMatcherCap>,
    pub parser: Arc<dyn RegistrationParseCap>,
    pub project: Arc<dyn ProjectLayoutCap>,
}

impl Debug for SchemaCaps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaCaps").finish_non_exhaustive()
    }
}

impl Debug for SourceCaps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceCaps").finish_non_exhaustive()
    }
}
