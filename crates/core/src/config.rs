use modscope_plugin::{PackageAsService, ServiceNamingConvention};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_SCHEMA_EXTENSION: &str = "proto";
pub const DEFAULT_MODULES_DIR: &str = "x";
pub const DEFAULT_TYPES_DIR: &str = "types";
pub const DEFAULT_SKIP_DIRS: &[&str] = &["node_modules", "vendor", "target"];

/// Plain-value parameters for one discovery run. Nothing here is read from
/// the environment.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub schema_extension: String,
    /// Modules root, relative to the project root.
    pub modules_dir: PathBuf,
    /// Subdirectory a module directory must contain to count as a module.
    pub types_dir: String,
    /// Overrides the import path declared by the project.
    pub import_path: Option<String>,
    /// Fail on the first unresolved message instead of collecting it.
    pub strict: bool,
    pub naming: Arc<dyn ServiceNamingConvention>,
    pub cancel: CancellationToken,
    /// Directory names never descended into while looking for schema files.
    /// Hidden directories are always skipped.
    pub skip_dirs: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            schema_extension: DEFAULT_SCHEMA_EXTENSION.to_string(),
            modules_dir: PathBuf::from(DEFAULT_MODULES_DIR),
            types_dir: DEFAULT_TYPES_DIR.to_string(),
            import_path: None,
            strict: false,
            naming: Arc::new(PackageAsService),
            cancel: CancellationToken::new(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DiscoveryOptions {
    pub fn builder() -> DiscoveryOptionsBuilder {
        DiscoveryOptionsBuilder::default()
    }

    pub fn is_skipped_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.skip_dirs.iter().any(|d| d == name)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug, Default)]
pub struct DiscoveryOptionsBuilder {
    options: DiscoveryOptions,
}

impl DiscoveryOptionsBuilder {
    pub fn with_schema_extension(mut self, extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        self.options.schema_extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_modules_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.modules_dir = dir.into();
        self
    }

    pub fn with_types_dir(mut self, dir: impl Into<String>) -> Self {
        self.options.types_dir = dir.into();
        self
    }

    pub fn with_import_path(mut self, import_path: impl Into<String>) -> Self {
        self.options.import_path = Some(import_path.into());
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    pub fn with_naming(mut self, naming: Arc<dyn ServiceNamingConvention>) -> Self {
        self.options.naming = naming;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.options.cancel = token;
        self
    }

    pub fn skip_dir(mut self, name: impl Into<String>) -> Self {
        self.options.skip_dirs.push(name.into());
        self
    }

    pub fn build(self) -> DiscoveryOptions {
        self.options
    }
}
