//! Reads the `module` directive of a `go.mod` file.

use std::path::Path;

pub const GO_MOD: &str = "go.mod";

/// Extracts the module path from `go.mod` content. Accepts bare and quoted
/// paths and ignores `//` comments.
pub fn parse_module_path(content: &str) -> Option<String> {
    for line in content.lines() {
        let line = match line.find("//") {
            Some(idx) => &line[..idx],
            None => line,
        }
        .trim();

        let Some(rest) = line.strip_prefix("module") else {
            continue;
        };
        if !(rest.is_empty() || rest.starts_with([' ', '\t', '"', '`'])) {
            continue;
        }
        let path = rest.trim().trim_matches(|c| c == '"' || c == '`').trim();
        if !path.is_empty() {
            return Some(path.to_string());
        }
    }
    None
}

/// Reads `<root>/go.mod`; a missing file is `Ok(None)`.
pub fn read_module_path(root: &Path) -> std::io::Result<Option<String>> {
    match std::fs::read_to_string(root.join(GO_MOD)) {
        Ok(content) => Ok(parse_module_path(&content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
