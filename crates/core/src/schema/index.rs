use crate::config::DiscoveryOptions;
use crate::error::{DiscoveryError, Result};
use crate::project::scanner::Scanner;
use indexmap::IndexMap;
use modscope_api::Warning;
use modscope_plugin::{SchemaCaps, SchemaFile, ServiceDecl};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One message declaration, keyed by (package, message) in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub package: String,
    pub message: String,
    pub file_path: PathBuf,
}

/// Read-only table of every message declared by the schema files of a
/// project, grouped by package. Packages enumerate in first-seen order and
/// messages in declaration order within their package.
#[derive(Debug, Default)]
pub struct SchemaIndex {
    entries: IndexMap<String, IndexMap<String, SchemaEntry>>,
    files: Vec<SchemaFile>,
}

enum FileOutcome {
    Parsed(SchemaFile),
    Failed(Warning),
    Cancelled,
}

impl SchemaIndex {
    /// Parses every schema file under `root`. Malformed files become
    /// warnings; the run fails only when no file parses at all.
    pub fn build(
        root: &Path,
        caps: &SchemaCaps,
        options: &DiscoveryOptions,
        warnings: &mut Vec<Warning>,
    ) -> Result<Self> {
        let paths = Scanner::collect_paths(root, caps.matcher.as_ref(), options, warnings)?;
        debug!(count = paths.len(), "found schema files");

        let outcomes: Vec<FileOutcome> = paths
            .par_iter()
            .map(|path| {
                if options.is_cancelled() {
                    return FileOutcome::Cancelled;
                }
                let source = match fs::read_to_string(path) {
                    Ok(source) => source,
                    Err(e) => {
                        return FileOutcome::Failed(Warning::Unreadable {
                            path: path.clone(),
                            reason: e.to_string(),
                        });
                    }
                };
                match caps.parser.parse_schema_file(&source, path) {
                    Ok(file) => FileOutcome::Parsed(file),
                    Err(e) => FileOutcome::Failed(Warning::SchemaParse(e)),
                }
            })
            .collect();

        let mut files = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                FileOutcome::Parsed(file) => files.push(file),
                FileOutcome::Failed(w) => warnings.push(w),
                FileOutcome::Cancelled => return Err(DiscoveryError::Cancelled),
            }
        }

        if files.is_empty() {
            return Err(DiscoveryError::NoSchemaFound {
                root: root.to_path_buf(),
            });
        }

        Ok(Self::from_files(files, warnings))
    }

    /// Indexes already-parsed files in the given order. A (package, message)
    /// pair declared twice keeps the later declaration and records a warning.
    pub fn from_files(files: Vec<SchemaFile>, warnings: &mut Vec<Warning>) -> Self {
        let mut entries: IndexMap<String, IndexMap<String, SchemaEntry>> = IndexMap::new();
        for file in &files {
            let package = file.package.clone().unwrap_or_default();
            let declared = entries.entry(package.clone()).or_default();
            for msg in &file.messages {
                let entry = SchemaEntry {
                    package: package.clone(),
                    message: msg.name.clone(),
                    file_path: file.path.clone(),
                };
                if let Some(previous) = declared.insert(msg.name.clone(), entry) {
                    warnings.push(Warning::DuplicateMessage {
                        package: package.clone(),
                        message: msg.name.clone(),
                        previous: previous.file_path,
                        current: file.path.clone(),
                    });
                }
            }
        }
        Self { entries, files }
    }

    pub fn get(&self, package: &str, message: &str) -> Option<&SchemaEntry> {
        self.entries.get(package)?.get(message)
    }

    pub fn entries(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.values().flat_map(IndexMap::values)
    }

    /// Distinct packages in first-seen order.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn files(&self) -> &[SchemaFile] {
        &self.files
    }

    pub fn services_of<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a ServiceDecl> + 'a {
        self.files
            .iter()
            .filter(move |f| f.package.as_deref().unwrap_or("") == package)
            .flat_map(|f| f.services.iter())
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modscope_plugin::MessageDecl;

    fn file(path: &str, package: &str, messages: &[&str]) -> SchemaFile {
        SchemaFile {
            path: PathBuf::from(path),
            package: Some(package.to_string()),
            messages: messages
                .iter()
                .map(|m| MessageDecl {
                    name: m.to_string(),
                    fields: Vec::new(),
                    line: 1,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_files_preserves_order() {
        let mut warnings = Vec::new();
        let index = SchemaIndex::from_files(
            vec![
                file("/p/a.proto", "moon", &["MsgB", "MsgA"]),
                file("/p/b.proto", "mars", &["MsgC"]),
            ],
            &mut warnings,
        );
        let names: Vec<_> = index.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(names, vec!["MsgB", "MsgA", "MsgC"]);
        assert_eq!(index.packages().collect::<Vec<_>>(), vec!["moon", "mars"]);
        assert_eq!(index.len(), 3);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_duplicate_declaration_last_wins_with_warning() {
        let mut warnings = Vec::new();
        let index = SchemaIndex::from_files(
            vec![
                file("/p/a.proto", "moon", &["MsgA"]),
                file("/p/b.proto", "moon", &["MsgA"]),
            ],
            &mut warnings,
        );
        assert_eq!(
            index.get("moon", "MsgA").unwrap().file_path,
            PathBuf::from("/p/b.proto")
        );
        assert_eq!(
            warnings,
            vec![Warning::DuplicateMessage {
                package: "moon".to_string(),
                message: "MsgA".to_string(),
                previous: PathBuf::from("/p/a.proto"),
                current: PathBuf::from("/p/b.proto"),
            }]
        );
    }

    #[test]
    fn test_entries_group_by_package_in_first_seen_order() {
        let mut warnings = Vec::new();
        let index = SchemaIndex::from_files(
            vec![
                file("/p/a.proto", "moon", &["MsgA"]),
                file("/p/b.proto", "mars", &["MsgC"]),
                file("/p/c.proto", "moon", &["MsgB"]),
            ],
            &mut warnings,
        );
        let keys: Vec<_> = index
            .entries()
            .map(|e| (e.package.as_str(), e.message.as_str()))
            .collect();
        assert_eq!(keys, vec![("moon", "MsgA"), ("moon", "MsgB"), ("mars", "MsgC")]);
        assert_eq!(index.packages().collect::<Vec<_>>(), vec!["moon", "mars"]);
        assert!(index.get("mars", "MsgA").is_none());
        assert!(index.get("venus", "MsgA").is_none());
    }

    #[test]
    fn test_same_message_in_other_package_is_not_duplicate() {
        let mut warnings = Vec::new();
        let index = SchemaIndex::from_files(
            vec![
                file("/p/a.proto", "moon", &["MsgA"]),
                file("/p/b.proto", "mars", &["MsgA"]),
            ],
            &mut warnings,
        );
        assert_eq!(index.len(), 2);
        assert!(warnings.is_empty());
    }
}
