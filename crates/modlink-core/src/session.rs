//! A resolution session: the frozen alias table and plugin pipeline for one
//! build or dev-server run.
//!
//! The session is the interface a dev server or bundler drives. It is
//! `Send + Sync` and holds no mutable state, so independent module requests
//! can be served from many threads at once.

use crate::config::SessionConfig;
use crate::error::{ConfigError, Error};
use crate::plugin::{PluginContext, PluginPipeline};
use crate::plugins::{PluginRegistry, ReplacePlugin};
use crate::resolve::{ModuleId, ResolvedLocation, Resolver};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info_span};

/// A fully processed module, ready to serve.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleOutput {
    pub location: ResolvedLocation,
    /// Source after every transform hook ran.
    pub code: String,
    /// Content fingerprint of `code`.
    pub hash: String,
}

/// One `(specifier, importer)` pair.
#[derive(Debug, Clone)]
pub struct ModuleRequest {
    pub specifier: String,
    pub importer: PathBuf,
}

impl ModuleRequest {
    pub fn new(specifier: impl Into<String>, importer: impl Into<PathBuf>) -> Self {
        Self {
            specifier: specifier.into(),
            importer: importer.into(),
        }
    }
}

/// Immutable resolution/transform state for one session.
#[derive(Debug)]
pub struct Session {
    root: PathBuf,
    resolver: Resolver,
    pipeline: Arc<PluginPipeline>,
}

impl Session {
    /// Build a session from configuration.
    ///
    /// Plugins are instantiated through `registry` in config order. A non-empty
    /// `define` map is applied by a `replace` plugin appended after them.
    pub fn new(config: &SessionConfig, registry: &PluginRegistry) -> Result<Self, ConfigError> {
        let ctx = PluginContext::new(config.root.clone()).with_dev(config.dev);
        let mut pipeline = PluginPipeline::new(ctx);

        for spec in &config.plugins {
            pipeline.register(registry.create(spec)?)?;
        }

        if !config.define.is_empty() {
            let define = config
                .define
                .iter()
                .fold(ReplacePlugin::new(), |plugin, (from, to)| plugin.replace(from, to));
            pipeline.register(Box::new(define))?;
        }

        let aliases = config.alias_table()?;
        debug!(
            root = %config.root.display(),
            aliases = aliases.len(),
            plugins = ?pipeline.names(),
            "Session initialized"
        );

        let pipeline = Arc::new(pipeline);
        let resolver =
            Resolver::new(aliases, Arc::clone(&pipeline)).with_extensions(config.extensions());

        Ok(Self {
            root: config.root.clone(),
            resolver,
            pipeline,
        })
    }

    /// Build a session from an already assembled resolver and pipeline.
    pub fn from_parts(root: PathBuf, resolver: Resolver, pipeline: Arc<PluginPipeline>) -> Self {
        Self {
            root,
            resolver,
            pipeline,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn pipeline(&self) -> &PluginPipeline {
        &self.pipeline
    }

    /// Resolve `specifier` as imported from `importer`.
    pub fn resolve(&self, specifier: &str, importer: &Path) -> Result<ResolvedLocation, Error> {
        self.resolver.resolve(specifier, importer)
    }

    /// Load the source of a resolved module.
    ///
    /// Plugin `load` hooks come first; file modules fall back to the disk.
    pub fn load(&self, location: &ResolvedLocation) -> Result<String, Error> {
        let hook_id = location.id.hook_id();
        if let Some(loaded) = self.pipeline.load(&hook_id)? {
            return Ok(loaded.code);
        }

        match &location.id {
            ModuleId::File(path) => Ok(modlink_util::fs::read_to_string_lossy(path)?),
            ModuleId::Virtual(name) => Err(Error::VirtualNotLoaded { id: name.clone() }),
        }
    }

    /// Run the transform pipeline over loaded source.
    pub fn transform(&self, source: &str, location: &ResolvedLocation) -> Result<String, Error> {
        Ok(self
            .pipeline
            .run_transforms(source, &location.id.hook_id())?)
    }

    /// Resolve, load and transform one module.
    pub fn process(&self, specifier: &str, importer: &Path) -> Result<ModuleOutput, Error> {
        let span = info_span!("process", specifier, importer = %importer.display());
        let _guard = span.enter();

        let location = self.resolve(specifier, importer)?;
        let source = self.load(&location)?;
        let code = self.transform(&source, &location)?;
        let hash = modlink_util::hash::content_fingerprint(&code);
        debug!(id = %location.id, bytes = code.len(), "Processed module");

        Ok(ModuleOutput {
            location,
            code,
            hash,
        })
    }

    /// Process independent requests in parallel.
    ///
    /// Results are returned in request order; one failing module does not
    /// affect the others.
    pub fn process_all(&self, requests: &[ModuleRequest]) -> Vec<Result<ModuleOutput, Error>> {
        requests
            .par_iter()
            .map(|req| self.process(&req.specifier, &req.importer))
            .collect()
    }
}
