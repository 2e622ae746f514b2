//! Session configuration.
//!
//! A [`SessionConfig`] is built once (from a config file, or in code) and
//! handed by reference to [`crate::Session::new`]. Nothing reads it after the
//! session exists.

mod file;

pub use file::{find_config_file, load_config, CONFIG_FILES};

use crate::alias::AliasTable;
use crate::error::ConfigError;
use crate::resolve::DEFAULT_EXTENSIONS;
use modlink_util::fs::normalize_path;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Static configuration for a resolution session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Project root. Relative alias replacements are resolved against it.
    pub root: PathBuf,

    /// Plugins in pipeline order.
    #[serde(default)]
    pub plugins: Vec<PluginSpec>,

    /// Resolution options.
    #[serde(default)]
    pub resolve: ResolveOptions,

    /// Global identifier replacements applied to every module.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub define: BTreeMap<String, String>,

    /// Dev server session rather than a production build.
    #[serde(default)]
    pub dev: bool,
}

/// A plugin reference: registry name plus factory options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub options: serde_json::Value,
}

impl PluginSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: serde_json::Value::Null,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: serde_json::Value) -> Self {
        self.options = options;
        self
    }
}

/// `resolve` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Alias rules; each entry becomes one rule.
    #[serde(default)]
    pub alias: Vec<AliasEntry>,

    /// Extensions to probe, with leading dots. `None` uses the defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
}

/// One `find → replacement` alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub find: String,
    pub replacement: PathBuf,
}

impl SessionConfig {
    /// Create an empty config rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            plugins: Vec::new(),
            resolve: ResolveOptions::default(),
            define: BTreeMap::new(),
            dev: false,
        }
    }

    /// Add an alias.
    #[must_use]
    pub fn with_alias(mut self, find: impl Into<String>, replacement: impl Into<PathBuf>) -> Self {
        self.resolve.alias.push(AliasEntry {
            find: find.into(),
            replacement: replacement.into(),
        });
        self
    }

    /// Append a plugin.
    #[must_use]
    pub fn with_plugin(mut self, spec: PluginSpec) -> Self {
        self.plugins.push(spec);
        self
    }

    /// Add a `define` replacement.
    #[must_use]
    pub fn with_define(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.define.insert(from.into(), to.into());
        self
    }

    /// Set dev mode.
    #[must_use]
    pub fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    /// Build the alias table, anchoring relative replacements at `root`.
    pub fn alias_table(&self) -> Result<AliasTable, ConfigError> {
        let mut table = AliasTable::new();
        for entry in &self.resolve.alias {
            let replacement = if entry.replacement.is_absolute() {
                entry.replacement.clone()
            } else {
                normalize_path(&self.root.join(&entry.replacement))
            };
            table.register(entry.find.clone(), replacement)?;
        }
        Ok(table)
    }

    /// Extensions to probe.
    #[must_use]
    pub fn extensions(&self) -> Vec<String> {
        match &self.resolve.extensions {
            Some(exts) => exts.clone(),
            None => DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_alias_table_anchors_relative_replacements() {
        let config = SessionConfig::new(PathBuf::from("/repo/play"))
            .with_alias("mylib", "../src/index.ts")
            .with_alias("@", "/abs/src");

        let table = config.alias_table().unwrap();
        let rules: Vec<_> = table.iter().map(|r| r.replacement().to_path_buf()).collect();
        assert_eq!(
            rules,
            vec![
                PathBuf::from("/repo/src/index.ts"),
                PathBuf::from("/abs/src")
            ]
        );
    }

    #[test]
    fn test_alias_table_reports_duplicates() {
        let config = SessionConfig::new(PathBuf::from("/repo"))
            .with_alias("mylib", "/a")
            .with_alias("mylib", "/b");
        assert!(matches!(
            config.alias_table(),
            Err(ConfigError::DuplicatePattern(_))
        ));
    }

    #[test]
    fn test_extensions_default_and_override() {
        let mut config = SessionConfig::new(PathBuf::from("/repo"));
        assert!(config.extensions().contains(&".ts".to_string()));

        config.resolve.extensions = Some(vec![".vue".to_string()]);
        assert_eq!(config.extensions(), vec![".vue".to_string()]);
    }

    #[test]
    fn test_serde_shape() {
        let json = r#"{
            "root": "/repo/play",
            "plugins": [{ "name": "@vitejs/plugin-vue" }],
            "resolve": { "alias": [{ "find": "mylib", "replacement": "../src/index.ts" }] }
        }"#;
        let config: SessionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.root, Path::new("/repo/play"));
        assert_eq!(config.plugins, vec![PluginSpec::new("@vitejs/plugin-vue")]);
        assert_eq!(config.resolve.alias[0].find, "mylib");
        assert!(!config.dev);
        assert!(config.define.is_empty());
    }
}
