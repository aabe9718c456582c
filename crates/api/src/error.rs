use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A schema or source file that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, thiserror::Error)]
#[error("{}:{line}:{column}: {message}", path.display())]
pub struct ParseError {
    pub path: PathBuf,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(path: impl Into<PathBuf>, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line,
            column,
            message: message.into(),
        }
    }
}

/// A handler registration whose message has no matching schema declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, thiserror::Error)]
#[error("message '{message}' registered by module '{module}' is not declared in any schema package owned by the module")]
pub struct UnresolvedMessageError {
    pub module: String,
    pub message: String,
}

/// Non-fatal diagnostics attached to an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    #[error("schema parse error: {0}")]
    SchemaParse(ParseError),
    #[error("source parse error: {0}")]
    SourceParse(ParseError),
    #[error("message '{package}.{message}' declared in {} shadows the one in {}", current.display(), previous.display())]
    DuplicateMessage {
        package: String,
        message: String,
        previous: PathBuf,
        current: PathBuf,
    },
    #[error("{0}")]
    Unresolved(UnresolvedMessageError),
    #[error("no module path declared under {}; import paths are root-relative", root.display())]
    MissingImportPath { root: PathBuf },
    #[error("cannot read {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },
}
