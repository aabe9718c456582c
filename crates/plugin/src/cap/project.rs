use crate::BoxError;
use std::path::Path;

pub trait ProjectLayoutCap: Send + Sync {
    /// The import path the project declares for its root directory, if any.
    fn root_import_path(&self, root: &Path) -> Result<Option<String>, BoxError>;
}
