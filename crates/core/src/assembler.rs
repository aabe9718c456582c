//! Discovery entry point: joins the schema index with the handler names the
//! source walker found and produces the module inventory.

use crate::config::DiscoveryOptions;
use crate::error::{DiscoveryError, Result};
use crate::resolver::UriResolver;
use crate::schema::SchemaIndex;
use crate::walker::{DiscoveredModule, SourceWalker};
use modscope_api::{Inventory, Module, Msg, Warning};
use modscope_plugin::{SchemaCaps, SourceCaps};
use std::path::{Path, PathBuf};
use tracing::{info, info_span, warn};

/// Discovers the modules of the project at `root` with default options.
pub fn discover(root: impl AsRef<Path>) -> Result<Inventory> {
    discover_with(root, DiscoveryOptions::default())
}

pub fn discover_with(root: impl AsRef<Path>, options: DiscoveryOptions) -> Result<Inventory> {
    Discoverer::builder(root.as_ref().to_path_buf())
        .with_options(options)
        .build()?
        .run()
}

pub struct Discoverer {
    root: PathBuf,
    options: DiscoveryOptions,
    schema_caps: SchemaCaps,
    source_caps: SourceCaps,
}

pub struct DiscovererBuilder {
    root: PathBuf,
    options: DiscoveryOptions,
    schema_caps: Option<SchemaCaps>,
    source_caps: Option<SourceCaps>,
}

impl DiscovererBuilder {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            options: DiscoveryOptions::default(),
            schema_caps: None,
            source_caps: None,
        }
    }

    pub fn with_options(mut self, options: DiscoveryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_schema_caps(mut self, caps: SchemaCaps) -> Self {
        self.schema_caps = Some(caps);
        self
    }

    pub fn with_source_caps(mut self, caps: SourceCaps) -> Self {
        self.source_caps = Some(caps);
        self
    }

    pub fn build(self) -> Result<Discoverer> {
        let schema_caps = match self.schema_caps {
            Some(caps) => caps,
            None => modscope_proto::proto_caps(&self.options.schema_extension),
        };
        let source_caps = match self.source_caps {
            Some(caps) => caps,
            None => modscope_go::go_caps()?,
        };
        Ok(Discoverer {
            root: self.root,
            options: self.options,
            schema_caps,
            source_caps,
        })
    }
}

impl Discoverer {
    pub fn builder(root: PathBuf) -> DiscovererBuilder {
        DiscovererBuilder::new(root)
    }

    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    /// Runs one discovery pass. Reads only; the same tree always yields the
    /// same inventory.
    pub fn run(&self) -> Result<Inventory> {
        let span = info_span!("discover", root = %self.root.display());
        let _enter = span.enter();

        let root = self.canonical_root()?;
        if self.options.is_cancelled() {
            return Err(DiscoveryError::Cancelled);
        }

        let mut warnings = Vec::new();
        let index = SchemaIndex::build(&root, &self.schema_caps, &self.options, &mut warnings)?;
        let discovered = SourceWalker::new(&root, &self.source_caps, &self.options)
            .discover_modules(&mut warnings)?;

        let resolver = UriResolver::new(&index, self.options.naming.as_ref());
        let mut modules = Vec::with_capacity(discovered.len());
        for found in discovered {
            modules.push(self.assemble(found, &resolver, &mut warnings)?);
        }

        for w in &warnings {
            warn!("{w}");
        }
        let inventory = Inventory::new(modules, warnings);
        info!(
            modules = inventory.modules.len(),
            msgs = inventory.msg_count(),
            warnings = inventory.warnings.len(),
            "discovery finished"
        );
        Ok(inventory)
    }

    fn canonical_root(&self) -> Result<PathBuf> {
        let root = self
            .root
            .canonicalize()
            .map_err(|e| DiscoveryError::io(&self.root, e))?;
        if !root.is_dir() {
            return Err(DiscoveryError::io(
                root,
                std::io::Error::new(
                    std::io::ErrorKind::NotADirectory,
                    "project root is not a directory",
                ),
            ));
        }
        Ok(root)
    }

    /// Unresolved messages are dropped from the module and collected, or
    /// abort the run in strict mode.
    fn assemble(
        &self,
        found: DiscoveredModule,
        resolver: &UriResolver,
        warnings: &mut Vec<Warning>,
    ) -> Result<Module> {
        let mut module = Module::new(found.name, found.types_import_path);
        for message in found.messages {
            match resolver.resolve(&module.name, &message) {
                Ok(resolution) => module.msgs.push(Msg {
                    name: message,
                    uri: resolution.uri,
                    file_path: resolution.file_path,
                }),
                Err(e) if self.options.strict => return Err(DiscoveryError::Unresolved(e)),
                Err(e) => warnings.push(Warning::Unresolved(e)),
            }
        }
        Ok(module)
    }
}
