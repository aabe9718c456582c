use crate::schema::SchemaIndex;
use modscope_api::UnresolvedMessageError;
use modscope_plugin::ServiceNamingConvention;
use std::path::PathBuf;
use tracing::debug;

/// Where a registered message was declared and its canonical URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub uri: String,
    pub file_path: PathBuf,
    pub package: String,
    /// Other candidate packages that also declare the message.
    pub shadowed: Vec<String>,
}

pub struct UriResolver<'a> {
    index: &'a SchemaIndex,
    naming: &'a dyn ServiceNamingConvention,
}

impl<'a> UriResolver<'a> {
    pub fn new(index: &'a SchemaIndex, naming: &'a dyn ServiceNamingConvention) -> Self {
        Self { index, naming }
    }

    /// Packages plausibly owned by `module`: an exact name match first, then
    /// every package whose name contains the module name, in index order.
    pub fn candidate_packages(&self, module: &str) -> Vec<&'a str> {
        let exact = self.index.packages().filter(|p| *p == module);
        let containing = self
            .index
            .packages()
            .filter(|p| *p != module && !module.is_empty() && p.contains(module));
        exact.chain(containing).collect()
    }

    pub fn resolve(&self, module: &str, message: &str) -> Result<Resolution, UnresolvedMessageError> {
        let mut found = self
            .candidate_packages(module)
            .into_iter()
            .filter_map(|pkg| self.index.get(pkg, message));

        let Some(entry) = found.next() else {
            return Err(UnresolvedMessageError {
                module: module.to_string(),
                message: message.to_string(),
            });
        };
        let shadowed: Vec<String> = found.map(|e| e.package.clone()).collect();
        if !shadowed.is_empty() {
            debug!(
                module,
                message,
                package = %entry.package,
                ?shadowed,
                "message declared in several candidate packages"
            );
        }

        Ok(Resolution {
            uri: self.naming.message_uri(&entry.package, message),
            file_path: entry.file_path.clone(),
            package: entry.package.clone(),
            shadowed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modscope_plugin::{LastSegmentAsService, MessageDecl, PackageAsService, SchemaFile};

    fn index(files: &[(&str, &str, &[&str])]) -> SchemaIndex {
        let files = files
            .iter()
            .map(|(path, package, messages)| SchemaFile {
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
            })
            .collect();
        SchemaIndex::from_files(files, &mut Vec::new())
    }

    #[test]
    fn test_resolves_exact_package() {
        let idx = index(&[("/p/proto/moon/tx.proto", "moon", &["MsgCreateUser"])]);
        let resolver = UriResolver::new(&idx, &PackageAsService);
        let res = resolver.resolve("moon", "MsgCreateUser").unwrap();
        assert_eq!(res.uri, "moon.moon.MsgCreateUser");
        assert_eq!(res.file_path, PathBuf::from("/p/proto/moon/tx.proto"));
        assert!(res.shadowed.is_empty());
    }

    #[test]
    fn test_exact_package_preferred_over_containing() {
        let idx = index(&[
            ("/p/a.proto", "test.moon", &["MsgA"]),
            ("/p/b.proto", "moon", &["MsgA"]),
        ]);
        let resolver = UriResolver::new(&idx, &PackageAsService);
        assert_eq!(resolver.candidate_packages("moon"), vec!["moon", "test.moon"]);
        let res = resolver.resolve("moon", "MsgA").unwrap();
        assert_eq!(res.package, "moon");
        assert_eq!(res.shadowed, vec!["test.moon".to_string()]);
    }

    #[test]
    fn test_containing_package_with_last_segment_naming() {
        let idx = index(&[("/p/tx.proto", "test.moon", &["MsgCreateUser"])]);
        let resolver = UriResolver::new(&idx, &LastSegmentAsService);
        let res = resolver.resolve("moon", "MsgCreateUser").unwrap();
        assert_eq!(res.uri, "test.moon.moon.MsgCreateUser");
    }

    #[test]
    fn test_unrelated_package_does_not_resolve() {
        let idx = index(&[("/p/tx.proto", "mars", &["MsgCreateUser"])]);
        let resolver = UriResolver::new(&idx, &PackageAsService);
        let err = resolver.resolve("moon", "MsgCreateUser").unwrap_err();
        assert_eq!(err.module, "moon");
        assert_eq!(err.message, "MsgCreateUser");
    }
}
