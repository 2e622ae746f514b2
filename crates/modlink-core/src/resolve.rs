//! Import specifier resolution.
//!
//! A specifier is resolved by the first of these that succeeds:
//!
//! 1. the alias table (longest pattern wins)
//! 2. plugin `resolve_id` hooks, in pipeline order
//! 3. the specifier relative to the importer's directory
//!
//! Every file location returned pointed at a readable file when it was
//! resolved. Nothing is cached: the filesystem is re-probed on every call.

use crate::alias::AliasTable;
use crate::error::{Error, ResolutionError, ResolutionReason};
use crate::plugin::{PluginPipeline, VIRTUAL_PREFIX};
use modlink_util::fs::{normalize_path, probe_file};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Extensions probed when a specifier names a file without one.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".json"];

/// Identity of a resolved module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ModuleId {
    /// Absolute path of an existing file.
    File(PathBuf),
    /// Module that only exists inside a plugin, keyed without the `\0` prefix.
    Virtual(String),
}

impl ModuleId {
    /// The ID string handed to plugin hooks.
    #[must_use]
    pub fn hook_id(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Virtual(name) => format!("{VIRTUAL_PREFIX}{name}"),
        }
    }

    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Virtual(_) => None,
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Virtual(name) => write!(f, "virtual:{name}"),
        }
    }
}

/// Which resolution step produced a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum ResolvedVia {
    Alias { pattern: String },
    Plugin { name: String },
    Relative,
}

/// Result of resolving an import specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLocation {
    pub id: ModuleId,
    pub via: ResolvedVia,
}

impl ResolvedLocation {
    /// Path on disk, if this is not a virtual module.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.id.as_path()
    }
}

/// Import resolver.
///
/// Holds the frozen alias table and a shared handle to the plugin pipeline.
#[derive(Debug)]
pub struct Resolver {
    aliases: AliasTable,
    plugins: Arc<PluginPipeline>,
    extensions: Vec<String>,
}

impl Resolver {
    /// Create a resolver with the default extension list.
    #[must_use]
    pub fn new(aliases: AliasTable, plugins: Arc<PluginPipeline>) -> Self {
        Self {
            aliases,
            plugins,
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Replace the extension probe list. Entries include their leading dot.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Resolve an import specifier.
    ///
    /// # Arguments
    /// - `specifier`: The import specifier (e.g., "./utils", "mylib")
    /// - `importer`: Absolute path of the file containing the import
    pub fn resolve(&self, specifier: &str, importer: &Path) -> Result<ResolvedLocation, Error> {
        if let Some(found) = self.aliases.lookup(specifier)? {
            trace!(specifier, pattern = found.pattern, target = %found.target.display(), "Alias matched");
            let path = self
                .probe(&found.target)
                .ok_or_else(|| ResolutionError {
                    specifier: specifier.to_string(),
                    importer: importer.to_path_buf(),
                    reason: ResolutionReason::AliasTargetMissing,
                    target: Some(found.target.clone()),
                })?;
            debug!(specifier, path = %path.display(), "Resolved via alias");
            return Ok(ResolvedLocation {
                id: ModuleId::File(path),
                via: ResolvedVia::Alias {
                    pattern: found.pattern.to_string(),
                },
            });
        }

        let importer_id = importer.display().to_string();
        if let Some((name, result)) = self.plugins.resolve_id(specifier, &importer_id)? {
            let via = ResolvedVia::Plugin {
                name: name.to_string(),
            };
            if let Some(virtual_id) = result.id.strip_prefix(VIRTUAL_PREFIX) {
                debug!(specifier, plugin = name, id = virtual_id, "Resolved to virtual module");
                return Ok(ResolvedLocation {
                    id: ModuleId::Virtual(virtual_id.to_string()),
                    via,
                });
            }

            let target = self.relative_target(&result.id, importer);
            let path = self.probe(&target).ok_or_else(|| ResolutionError {
                specifier: specifier.to_string(),
                importer: importer.to_path_buf(),
                reason: ResolutionReason::NotFound,
                target: Some(target.clone()),
            })?;
            debug!(specifier, plugin = name, path = %path.display(), "Resolved via plugin");
            return Ok(ResolvedLocation {
                id: ModuleId::File(path),
                via,
            });
        }

        let target = self.relative_target(specifier, importer);
        let path = self.probe(&target).ok_or_else(|| ResolutionError {
            specifier: specifier.to_string(),
            importer: importer.to_path_buf(),
            reason: ResolutionReason::NotFound,
            target: Some(target.clone()),
        })?;
        debug!(specifier, path = %path.display(), "Resolved relative to importer");
        Ok(ResolvedLocation {
            id: ModuleId::File(path),
            via: ResolvedVia::Relative,
        })
    }

    /// Interpret `specifier` against the importer's directory.
    ///
    /// Absolute specifiers are taken as-is.
    fn relative_target(&self, specifier: &str, importer: &Path) -> PathBuf {
        let path = Path::new(specifier);
        if path.is_absolute() {
            return normalize_path(path);
        }
        let dir = importer.parent().unwrap_or(Path::new("."));
        normalize_path(&dir.join(path))
    }

    /// Find a readable file for `target`, canonicalized.
    fn probe(&self, target: &Path) -> Option<PathBuf> {
        let found = probe_file(&normalize_path(target), &self.extensions)?;
        // Fall back to the probed path if canonicalization races a delete.
        Some(dunce::canonicalize(&found).unwrap_or(found))
    }
}
