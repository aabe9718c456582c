use std::path::Path;

pub trait FileMatcherCap: Send + Sync {
    fn supports_path(&self, path: &Path) -> bool;
}

/// Matches files by a single extension, case-insensitively.
#[derive(Debug, Clone)]
pub struct ExtensionMatcher {
    extension: String,
}

impl ExtensionMatcher {
    pub fn new(extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }
}

impl FileMatcherCap for ExtensionMatcher {
    fn supports_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_matcher_ignores_dot_and_case() {
        let m = ExtensionMatcher::new(".proto");
        assert!(m.supports_path(Path::new("proto/moon/tx.proto")));
        assert!(m.supports_path(Path::new("A.PROTO")));
        assert!(!m.supports_path(Path::new("tx.proto.bak")));
        assert!(!m.supports_path(Path::new("proto")));
    }
}
