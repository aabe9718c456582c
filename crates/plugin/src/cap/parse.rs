use crate::BoxError;
use crate::model::{RegistrationScan, SchemaFile};
use modscope_api::ParseError;
use std::path::Path;

pub trait SchemaParseCap: Send + Sync {
    fn parse_schema_file(&self, source: &str, path: &Path) -> Result<SchemaFile, ParseError>;
}

pub trait RegistrationParseCap: Send + Sync {
    /// Extracts handler registrations in declaration order. Syntax errors that
    /// the parser recovered from are reported on the scan, not as `Err`.
    fn parse_registrations(&self, source: &str, path: &Path) -> Result<RegistrationScan, BoxError>;
}
