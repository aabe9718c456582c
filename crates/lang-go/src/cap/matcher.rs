use crate::GoPlugin;
use modscope_plugin::FileMatcherCap;
use std::path::Path;

/// Generated and test files never carry registrations we care about.
const EXCLUDED_SUFFIXES: &[&str] = &["_test.go", ".pb.go", ".pb.gw.go"];

impl FileMatcherCap for GoPlugin {
    fn supports_path(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        name.ends_with(".go") && !EXCLUDED_SUFFIXES.iter().any(|s| name.ends_with(s))
    }
}
