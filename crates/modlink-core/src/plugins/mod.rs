//! Plugin registry and built-in plugins.
//!
//! Config files name plugins (`Vue()` imported from `@vitejs/plugin-vue`
//! becomes the name `@vitejs/plugin-vue`); the registry turns those names
//! into plugin instances. Framework transforms are registered by the embedder.
//!
//! ## Usage
//!
//! ```ignore
//! use modlink_core::plugins::PluginRegistry;
//!
//! let mut registry = PluginRegistry::with_builtins();
//! registry.register("@vitejs/plugin-vue", |_options| Ok(Box::new(MyVuePlugin::new())));
//! ```

mod builtin;

pub use builtin::{BannerPlugin, JsonPlugin, ReplacePlugin, VirtualPlugin};

use crate::config::PluginSpec;
use crate::error::ConfigError;
use crate::plugin::Plugin;
use rustc_hash::FxHashMap as HashMap;
use serde_json::Value;

type Factory = Box<dyn Fn(&Value) -> Result<Box<dyn Plugin>, ConfigError> + Send + Sync>;

/// Maps plugin names to factories.
#[derive(Default)]
pub struct PluginRegistry {
    factories: HashMap<String, Factory>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in plugins:
    /// `replace`, `virtual`, `json` and `banner`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("replace", |options| {
            Ok(Box::new(ReplacePlugin::from_options(options)?))
        });
        registry.register("virtual", |options| {
            Ok(Box::new(VirtualPlugin::from_options(options)?))
        });
        registry.register("json", |_| Ok(Box::new(JsonPlugin)));
        registry.register("banner", |options| {
            Ok(Box::new(BannerPlugin::from_options(options)?))
        });
        registry
    }

    /// Register (or replace) a factory.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Value) -> Result<Box<dyn Plugin>, ConfigError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Instantiate the plugin a spec names.
    pub fn create(&self, spec: &PluginSpec) -> Result<Box<dyn Plugin>, ConfigError> {
        let factory = self
            .factories
            .get(&spec.name)
            .ok_or_else(|| ConfigError::UnknownPlugin(spec.name.clone()))?;
        factory(&spec.options)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Build a `ConfigError::PluginOptions` for `plugin`.
pub(crate) fn options_error(plugin: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::PluginOptions {
        plugin: plugin.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtins_registered() {
        let registry = PluginRegistry::with_builtins();
        assert_eq!(registry.names(), vec!["banner", "json", "replace", "virtual"]);
    }

    #[test]
    fn test_create_passes_options() {
        let registry = PluginRegistry::with_builtins();
        let spec = PluginSpec::new("replace").with_options(json!({ "__DEV__": "false" }));
        let plugin = registry.create(&spec).unwrap();
        assert_eq!(plugin.name(), "replace");
    }

    #[test]
    fn test_unknown_plugin() {
        let registry = PluginRegistry::with_builtins();
        let Err(err) = registry.create(&PluginSpec::new("@vitejs/plugin-vue")) else {
            panic!("expected unknown plugin error");
        };
        assert!(matches!(err, ConfigError::UnknownPlugin(name) if name == "@vitejs/plugin-vue"));
    }

    #[test]
    fn test_register_embedder_factory() {
        let mut registry = PluginRegistry::new();
        registry.register("@vitejs/plugin-vue", |_| Ok(Box::new(JsonPlugin)));
        assert!(registry.contains("@vitejs/plugin-vue"));
        assert!(registry.create(&PluginSpec::new("@vitejs/plugin-vue")).is_ok());
    }

    #[test]
    fn test_bad_options_surface_as_config_error() {
        let registry = PluginRegistry::with_builtins();
        let spec = PluginSpec::new("virtual").with_options(json!(["not", "a", "map"]));
        assert!(matches!(
            registry.create(&spec),
            Err(ConfigError::PluginOptions { .. })
        ));
    }
}
