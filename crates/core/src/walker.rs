use crate::config::DiscoveryOptions;
use crate::error::{DiscoveryError, Result};
use crate::project::scanner::Scanner;
use crate::project::slash_relative;
use indexmap::IndexSet;
use modscope_api::{ParseError, Warning};
use modscope_plugin::SourceCaps;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A module directory and the message names its handlers register, before
/// any schema resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredModule {
    pub name: String,
    pub types_import_path: String,
    pub types_dir: PathBuf,
    /// Names registered against the message interface, de-duplicated, in
    /// file-then-declaration order of their first registration.
    pub messages: Vec<String>,
}

pub struct SourceWalker<'a> {
    root: &'a Path,
    caps: &'a SourceCaps,
    options: &'a DiscoveryOptions,
}

impl<'a> SourceWalker<'a> {
    pub fn new(root: &'a Path, caps: &'a SourceCaps, options: &'a DiscoveryOptions) -> Self {
        Self {
            root,
            caps,
            options,
        }
    }

    /// The project's root import path, falling back to `None` with a warning.
    pub fn root_import_path(&self, warnings: &mut Vec<Warning>) -> Option<String> {
        if let Some(path) = &self.options.import_path {
            return Some(path.trim_end_matches('/').to_string());
        }
        match self.caps.project.root_import_path(self.root) {
            Ok(Some(path)) => Some(path.trim_end_matches('/').to_string()),
            Ok(None) => {
                warnings.push(Warning::MissingImportPath {
                    root: self.root.to_path_buf(),
                });
                None
            }
            Err(e) => {
                warnings.push(Warning::Unreadable {
                    path: self.root.to_path_buf(),
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    /// Module directories are the immediate subdirectories of the modules
    /// root that contain the types subdirectory. Anything else is skipped.
    pub fn candidate_dirs(&self, warnings: &mut Vec<Warning>) -> Vec<PathBuf> {
        let modules_root = self.root.join(&self.options.modules_dir);
        if !modules_root.is_dir() {
            debug!(path = %modules_root.display(), "no modules directory");
            return Vec::new();
        }
        match Scanner::list_dirs(&modules_root, warnings) {
            Ok(dirs) => dirs
                .into_iter()
                .filter(|d| d.join(&self.options.types_dir).is_dir())
                .collect(),
            Err(e) => {
                warnings.push(Warning::Unreadable {
                    path: modules_root,
                    reason: e.to_string(),
                });
                Vec::new()
            }
        }
    }

    pub fn discover_modules(&self, warnings: &mut Vec<Warning>) -> Result<Vec<DiscoveredModule>> {
        let import_path = self.root_import_path(warnings);
        let dirs = self.candidate_dirs(warnings);

        let scanned: Vec<Result<(DiscoveredModule, Vec<Warning>)>> = dirs
            .par_iter()
            .map(|dir| self.scan_module(dir, import_path.as_deref()))
            .collect();

        let mut modules = Vec::with_capacity(scanned.len());
        for result in scanned {
            let (module, module_warnings) = result?;
            debug!(
                module = %module.name,
                messages = module.messages.len(),
                "discovered module"
            );
            warnings.extend(module_warnings);
            modules.push(module);
        }
        Ok(modules)
    }

    fn scan_module(
        &self,
        dir: &Path,
        import_path: Option<&str>,
    ) -> Result<(DiscoveredModule, Vec<Warning>)> {
        if self.options.is_cancelled() {
            return Err(DiscoveryError::Cancelled);
        }
        let mut warnings = Vec::new();
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let types_dir = dir.join(&self.options.types_dir);
        let relative = slash_relative(self.root, &types_dir)
            .unwrap_or_else(|| types_dir.to_string_lossy().into_owned());
        let types_import_path = match import_path {
            Some(base) => format!("{base}/{relative}"),
            None => relative,
        };

        // Codec registrations give the order; only types registered against
        // the message interface count as messages.
        let mut registered: IndexSet<String> = IndexSet::new();
        let mut implemented: IndexSet<String> = IndexSet::new();
        let listed = Scanner::list_files(&types_dir, self.caps.matcher.as_ref(), &mut warnings);
        let files = match listed {
            Ok(files) => files,
            Err(e) => {
                warnings.push(Warning::Unreadable {
                    path: types_dir.clone(),
                    reason: e.to_string(),
                });
                Vec::new()
            }
        };

        for file in files {
            if self.options.is_cancelled() {
                return Err(DiscoveryError::Cancelled);
            }
            let source = match fs::read_to_string(&file) {
                Ok(source) => source,
                Err(e) => {
                    warnings.push(Warning::Unreadable {
                        path: file,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            match self.caps.parser.parse_registrations(&source, &file) {
                Ok(scan) => {
                    if let Some((line, column)) = scan.syntax_error {
                        warnings.push(Warning::SourceParse(ParseError::new(
                            &file,
                            line,
                            column,
                            "syntax error",
                        )));
                    }
                    registered.extend(scan.message_names().map(str::to_string));
                    implemented.extend(scan.msg_implementations().map(str::to_string));
                }
                Err(e) => warnings.push(Warning::SourceParse(ParseError::new(
                    &file,
                    0,
                    0,
                    e.to_string(),
                ))),
            }
        }

        Ok((
            DiscoveredModule {
                name,
                types_import_path,
                types_dir,
                messages: registered
                    .into_iter()
                    .filter(|m| implemented.contains(m))
                    .collect(),
            },
            warnings,
        ))
    }
}
