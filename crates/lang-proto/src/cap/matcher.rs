use crate::ProtoPlugin;
use modscope_plugin::FileMatcherCap;
use std::path::Path;

impl FileMatcherCap for ProtoPlugin {
    fn supports_path(&self, path: &Path) -> bool {
        self.matcher.supports_path(path)
    }
}
