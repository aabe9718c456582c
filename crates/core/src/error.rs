use modscope_api::UnresolvedMessageError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a whole discovery run. Per-file and per-message
/// problems are collected as warnings on the inventory instead.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no schema file could be parsed under {}", root.display())]
    NoSchemaFound { root: PathBuf },
    #[error("{0}")]
    Unresolved(#[from] UnresolvedMessageError),
    #[error("discovery cancelled")]
    Cancelled,
    #[error("Plugin error: {0}")]
    Plugin(String),
}

impl DiscoveryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DiscoveryError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<modscope_plugin::PluginError> for DiscoveryError {
    fn from(err: modscope_plugin::PluginError) -> Self {
        DiscoveryError::Plugin(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
