//! Plugin interface and the ordered plugin pipeline.
//!
//! Plugins follow the Rollup hook model, narrowed to the three hooks module
//! resolution needs: `resolve_id`, `load` and `transform`. Each plugin
//! declares which of them it implements through [`Plugin::hooks`]; the
//! pipeline refuses plugins that declare none.
//!
//! ## Example
//!
//! ```ignore
//! use modlink_core::plugin::{HookResult, Hooks, Plugin, PluginContext, TransformResult};
//!
//! struct Uppercase;
//!
//! impl Plugin for Uppercase {
//!     fn name(&self) -> &str { "uppercase" }
//!
//!     fn hooks(&self) -> Hooks { Hooks::TRANSFORM }
//!
//!     fn transform(&self, code: &str, _id: &str, _ctx: &PluginContext) -> HookResult<Option<TransformResult>> {
//!         Ok(Some(TransformResult::code(code.to_uppercase())))
//!     }
//! }
//! ```

use crate::error::{ConfigError, HookError, PluginError, TransformError};
use std::path::PathBuf;
use tracing::{debug, trace};

/// Result type for plugin hooks.
pub type HookResult<T> = Result<T, HookError>;

/// Read-only context passed to plugin hooks.
#[derive(Debug, Clone, Default)]
pub struct PluginContext {
    /// Project root (the directory holding the config file).
    pub root: PathBuf,
    /// Whether the session serves a dev server rather than a production build.
    pub dev: bool,
}

impl PluginContext {
    /// Create a new plugin context.
    pub fn new(root: PathBuf) -> Self {
        Self { root, dev: false }
    }

    /// Set dev mode.
    #[must_use]
    pub fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }
}

/// The set of hooks a plugin implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hooks {
    pub resolve_id: bool,
    pub load: bool,
    pub transform: bool,
}

impl Hooks {
    pub const NONE: Self = Self {
        resolve_id: false,
        load: false,
        transform: false,
    };
    pub const RESOLVE_ID: Self = Self {
        resolve_id: true,
        ..Self::NONE
    };
    pub const LOAD: Self = Self {
        load: true,
        ..Self::NONE
    };
    pub const TRANSFORM: Self = Self {
        transform: true,
        ..Self::NONE
    };

    /// Union of two hook sets.
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self {
            resolve_id: self.resolve_id || other.resolve_id,
            load: self.load || other.load,
            transform: self.transform || other.transform,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.resolve_id || self.load || self.transform)
    }
}

/// Result of resolve hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveIdResult {
    /// Resolved module ID: an absolute file path, or a `\0`-prefixed virtual ID.
    pub id: String,
}

impl ResolveIdResult {
    /// Create a resolved module result.
    pub fn resolved(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Create a result for a virtual module served by a `load` hook.
    pub fn virtual_module(name: impl AsRef<str>) -> Self {
        Self {
            id: format!("{VIRTUAL_PREFIX}{}", name.as_ref()),
        }
    }
}

/// Prefix marking module IDs that do not exist on disk.
pub const VIRTUAL_PREFIX: char = '\0';

/// Result of load hook.
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// Module source code.
    pub code: String,
}

impl LoadResult {
    /// Create a load result with code only.
    pub fn code(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Result of transform hook.
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// Transformed code.
    pub code: String,
}

impl TransformResult {
    /// Create a transform result with code only.
    pub fn code(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// The plugin trait.
///
/// Hooks default to declining (`Ok(None)`), so a plugin only implements the
/// hooks it lists in [`Plugin::hooks`]. Hooks that are not declared are never
/// called by the pipeline.
pub trait Plugin: Send + Sync {
    /// Plugin name for debugging and error messages.
    fn name(&self) -> &str;

    /// Hooks this plugin implements.
    fn hooks(&self) -> Hooks;

    /// Resolve a module specifier to an ID.
    ///
    /// Return `Some(result)` to claim this resolution, or `None` to let
    /// the next plugin or the default resolver handle it.
    fn resolve_id(
        &self,
        _specifier: &str,
        _importer: &str,
        _ctx: &PluginContext,
    ) -> HookResult<Option<ResolveIdResult>> {
        Ok(None)
    }

    /// Load a module by ID.
    ///
    /// Return `Some(result)` to provide the module source, or `None` to let
    /// the next plugin or the filesystem handle it.
    fn load(&self, _id: &str, _ctx: &PluginContext) -> HookResult<Option<LoadResult>> {
        Ok(None)
    }

    /// Transform module source code.
    ///
    /// Return `Some(result)` to transform the code, or `None` to pass it through.
    fn transform(
        &self,
        _code: &str,
        _id: &str,
        _ctx: &PluginContext,
    ) -> HookResult<Option<TransformResult>> {
        Ok(None)
    }
}

/// Ordered sequence of plugins.
///
/// Order is registration order and is load-bearing: the first plugin to claim
/// a resolution or load wins, and transforms run in order with each output
/// feeding the next plugin. Registration takes `&mut self`, so a pipeline
/// moved into a [`crate::Session`] can no longer change.
pub struct PluginPipeline {
    plugins: Vec<Box<dyn Plugin>>,
    ctx: PluginContext,
}

impl PluginPipeline {
    /// Create an empty pipeline.
    pub fn new(ctx: PluginContext) -> Self {
        Self {
            plugins: Vec::new(),
            ctx,
        }
    }

    /// Append a plugin.
    ///
    /// Fails with [`ConfigError::NoHooks`] if the plugin declares no hooks.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> Result<(), ConfigError> {
        if plugin.hooks().is_empty() {
            return Err(ConfigError::NoHooks(plugin.name().to_string()));
        }
        debug!(plugin = plugin.name(), hooks = ?plugin.hooks(), "Registered plugin");
        self.plugins.push(plugin);
        Ok(())
    }

    /// Builder form of [`PluginPipeline::register`].
    pub fn with(mut self, plugin: Box<dyn Plugin>) -> Result<Self, ConfigError> {
        self.register(plugin)?;
        Ok(self)
    }

    /// Get the context.
    pub fn context(&self) -> &PluginContext {
        &self.ctx
    }

    /// Plugin names in pipeline order.
    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Offer a specifier to each resolve-capable plugin in order.
    ///
    /// Returns the claiming plugin's name with its result, or `None` if no
    /// plugin claimed the specifier.
    pub fn resolve_id(
        &self,
        specifier: &str,
        importer: &str,
    ) -> Result<Option<(&str, ResolveIdResult)>, PluginError> {
        for plugin in self.plugins.iter().filter(|p| p.hooks().resolve_id) {
            let result = plugin
                .resolve_id(specifier, importer, &self.ctx)
                .map_err(|cause| PluginError {
                    plugin: plugin.name().to_string(),
                    hook: "resolve_id",
                    cause,
                })?;
            if let Some(result) = result {
                trace!(plugin = plugin.name(), specifier, id = %result.id.escape_debug(), "Plugin claimed specifier");
                return Ok(Some((plugin.name(), result)));
            }
        }
        Ok(None)
    }

    /// Try to load a module through plugins.
    /// Returns None if no plugin handled the load.
    pub fn load(&self, id: &str) -> Result<Option<LoadResult>, PluginError> {
        for plugin in self.plugins.iter().filter(|p| p.hooks().load) {
            let result = plugin.load(id, &self.ctx).map_err(|cause| PluginError {
                plugin: plugin.name().to_string(),
                hook: "load",
                cause,
            })?;
            if result.is_some() {
                trace!(plugin = plugin.name(), id = %id.escape_debug(), "Plugin loaded module");
                return Ok(result);
            }
        }
        Ok(None)
    }

    /// Run every transform hook in registration order.
    ///
    /// Each plugin's output is passed to the next. The first failure aborts
    /// the whole run; no partially transformed code is returned.
    pub fn run_transforms(&self, source: &str, id: &str) -> Result<String, TransformError> {
        let mut current = source.to_string();
        for plugin in self.plugins.iter().filter(|p| p.hooks().transform) {
            let result = plugin
                .transform(&current, id, &self.ctx)
                .map_err(|cause| TransformError {
                    plugin: plugin.name().to_string(),
                    id: id.to_string(),
                    cause,
                })?;
            if let Some(result) = result {
                trace!(plugin = plugin.name(), id = %id.escape_debug(), "Plugin transformed module");
                current = result.code;
            }
        }
        Ok(current)
    }
}

impl Default for PluginPipeline {
    fn default() -> Self {
        Self::new(PluginContext::default())
    }
}

impl std::fmt::Debug for PluginPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginPipeline")
            .field("plugins", &self.names())
            .field("ctx", &self.ctx)
            .finish()
    }
}
