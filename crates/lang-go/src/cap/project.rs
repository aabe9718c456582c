use crate::GoPlugin;
use modscope_plugin::{BoxError, ProjectLayoutCap};
use std::path::Path;

impl ProjectLayoutCap for GoPlugin {
    fn root_import_path(&self, root: &Path) -> Result<Option<String>, BoxError> {
        Ok(crate::gomod::read_module_path(root)?)
    }
}
