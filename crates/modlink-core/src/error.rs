use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Malformed or ambiguous static configuration.
///
/// Raised while building a session, or during a lookup that exposes an
/// ambiguity in the alias table. Never recovered.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("alias pattern must not be empty")]
    EmptyPattern,

    #[error("alias pattern '{0}' is already registered")]
    DuplicatePattern(String),

    #[error("alias pattern '{0}' may only use '*' as its final character")]
    InvalidWildcard(String),

    #[error("alias replacement for '{pattern}' must be an absolute path, got '{replacement}'")]
    RelativeReplacement {
        pattern: String,
        replacement: PathBuf,
    },

    #[error("ambiguous alias for '{specifier}': '{first}' and '{second}' match with equal specificity")]
    AmbiguousAlias {
        specifier: String,
        first: String,
        second: String,
    },

    #[error("plugin '{0}' does not declare any hooks")]
    NoHooks(String),

    #[error("unknown plugin '{0}'")]
    UnknownPlugin(String),

    #[error("invalid options for plugin '{plugin}': {message}")]
    PluginOptions { plugin: String, message: String },

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Why a specifier could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionReason {
    /// An alias matched but its target does not exist.
    AliasTargetMissing,
    /// No alias, plugin or relative file produced a module.
    NotFound,
}

impl ResolutionReason {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AliasTargetMissing => "alias target missing",
            Self::NotFound => "not found",
        }
    }
}

impl fmt::Display for ResolutionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A specifier could not be turned into a module location.
#[derive(Error, Debug)]
#[error("Cannot resolve '{specifier}' from '{}': {reason}{}", .importer.display(), target_suffix(.target))]
pub struct ResolutionError {
    pub specifier: String,
    pub importer: PathBuf,
    pub reason: ResolutionReason,
    /// The last path probed, when there was one.
    pub target: Option<PathBuf>,
}

fn target_suffix(target: &Option<PathBuf>) -> String {
    target
        .as_ref()
        .map(|t| format!(" ({})", t.display()))
        .unwrap_or_default()
}

/// Error returned by a plugin hook implementation.
///
/// The pipeline attaches the plugin name and hook when it surfaces the failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HookError(pub String);

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A `resolve_id` or `load` hook failed.
#[derive(Error, Debug)]
#[error("[{plugin}] {hook}: {cause}")]
pub struct PluginError {
    pub plugin: String,
    pub hook: &'static str,
    #[source]
    pub cause: HookError,
}

/// A `transform` hook failed; the whole pipeline for that module is aborted.
#[derive(Error, Debug)]
#[error("[{plugin}] transform failed for '{id}': {cause}")]
pub struct TransformError {
    pub plugin: String,
    pub id: String,
    #[source]
    pub cause: HookError,
}

/// Core error type for modlink operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("virtual module '{id}' was not provided by any plugin load hook")]
    VirtualNotLoaded { id: String },
}

impl Error {
    /// Stable SCREAMING_SNAKE_CASE code for machine-readable output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Resolution(e) => match e.reason {
                ResolutionReason::AliasTargetMissing => "ALIAS_TARGET_MISSING",
                ResolutionReason::NotFound => "NOT_FOUND",
            },
            Self::Plugin(_) => "PLUGIN_ERROR",
            Self::Transform(_) => "TRANSFORM_ERROR",
            Self::VirtualNotLoaded { .. } => "VIRTUAL_NOT_LOADED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_display() {
        let err = ResolutionError {
            specifier: "mylib".to_string(),
            importer: PathBuf::from("/app/main.ts"),
            reason: ResolutionReason::AliasTargetMissing,
            target: Some(PathBuf::from("/lib/src/index.ts")),
        };
        assert_eq!(
            err.to_string(),
            "Cannot resolve 'mylib' from '/app/main.ts': alias target missing (/lib/src/index.ts)"
        );
    }

    #[test]
    fn test_transform_error_names_plugin() {
        let err = TransformError {
            plugin: "vue".to_string(),
            id: "/app/App.vue".to_string(),
            cause: HookError::new("unexpected end of template"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("[vue]"));
        assert!(msg.contains("/app/App.vue"));
    }

    #[test]
    fn test_error_codes() {
        let err: Error = ConfigError::EmptyPattern.into();
        assert_eq!(err.code(), "CONFIG_ERROR");

        let err: Error = ResolutionError {
            specifier: "./x".to_string(),
            importer: PathBuf::from("/a.ts"),
            reason: ResolutionReason::NotFound,
            target: None,
        }
        .into();
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
