use super::options_error;
use crate::error::{ConfigError, HookError};
use crate::plugin::{
    HookResult, Hooks, LoadResult, Plugin, PluginContext, ResolveIdResult, TransformResult,
    VIRTUAL_PREFIX,
};
use rustc_hash::FxHashMap as HashMap;
use serde_json::Value;

/// Read a plugin's options as a `string → string` map. Null means empty.
fn string_map(plugin: &str, options: &Value) -> Result<Vec<(String, String)>, ConfigError> {
    match options {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => Ok(map
            .iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), v)
            })
            .collect()),
        other => Err(options_error(
            plugin,
            format!("expected an object, got {other}"),
        )),
    }
}

/// Plugin that replaces global identifiers with values.
///
/// Useful for replacing `process.env.NODE_ENV` with `"production"`. Keys only
/// match whole identifier paths, and the longest key at a position wins, so
/// `process.env.NODE_ENV` beats `process.env`.
pub struct ReplacePlugin {
    replacements: Vec<(String, String)>,
}

impl ReplacePlugin {
    /// Create a new replace plugin.
    pub fn new() -> Self {
        Self {
            replacements: Vec::new(),
        }
    }

    /// Build from `{ "from": "to", ... }` options.
    pub fn from_options(options: &Value) -> Result<Self, ConfigError> {
        let mut plugin = Self::new();
        for (from, to) in string_map("replace", options)? {
            plugin = plugin.replace(from, to);
        }
        Ok(plugin)
    }

    /// Add a replacement. Empty keys are ignored.
    pub fn replace(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into();
        if from.is_empty() {
            return self;
        }
        self.replacements.retain(|(existing, _)| *existing != from);
        self.replacements.push((from, to.into()));
        self.replacements
            .sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        self
    }

    /// Add environment variable replacement.
    /// Replaces `process.env.KEY` with the quoted value.
    pub fn env(self, key: &str, value: impl Into<String>) -> Self {
        self.replace(
            format!("process.env.{key}"),
            format!("\"{}\"", value.into()),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// The longest key that starts at `pos` as a whole identifier path.
    ///
    /// A key never matches after `.` or inside a longer identifier.
    fn match_at(&self, code: &str, pos: usize) -> Option<&(String, String)> {
        let before = code[..pos].chars().next_back();
        if before.is_some_and(|c| is_ident_char(c) || c == '.') {
            return None;
        }
        let rest = &code[pos..];
        self.replacements.iter().find(|(from, _)| {
            rest.starts_with(from.as_str())
                && !rest[from.len()..].chars().next().is_some_and(is_ident_char)
        })
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

impl Default for ReplacePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ReplacePlugin {
    fn name(&self) -> &str {
        "replace"
    }

    fn hooks(&self) -> Hooks {
        Hooks::TRANSFORM
    }

    fn transform(
        &self,
        code: &str,
        _id: &str,
        _ctx: &PluginContext,
    ) -> HookResult<Option<TransformResult>> {
        if self.replacements.is_empty() {
            return Ok(None);
        }

        // One left-to-right pass, so replacement values are never rescanned.
        let mut result = String::with_capacity(code.len());
        let mut changed = false;
        let mut pos = 0;

        while let Some(ch) = code[pos..].chars().next() {
            if let Some((from, to)) = self.match_at(code, pos) {
                result.push_str(to);
                pos += from.len();
                changed = true;
            } else {
                result.push(ch);
                pos += ch.len_utf8();
            }
        }

        Ok(changed.then(|| TransformResult::code(result)))
    }
}

/// Plugin that creates virtual modules.
///
/// Allows you to define modules that don't exist on disk. Both `virtual:name`
/// and `name` resolve to the virtual ID `\0name`.
pub struct VirtualPlugin {
    modules: HashMap<String, String>,
}

impl VirtualPlugin {
    /// Create a new virtual plugin.
    pub fn new() -> Self {
        Self {
            modules: HashMap::default(),
        }
    }

    /// Build from `{ "name": "code", ... }` options.
    pub fn from_options(options: &Value) -> Result<Self, ConfigError> {
        let mut plugin = Self::new();
        for (id, code) in string_map("virtual", options)? {
            plugin = plugin.module(id, code);
        }
        Ok(plugin)
    }

    /// Add a virtual module.
    pub fn module(mut self, id: impl Into<String>, code: impl Into<String>) -> Self {
        self.modules.insert(id.into(), code.into());
        self
    }
}

impl Default for VirtualPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for VirtualPlugin {
    fn name(&self) -> &str {
        "virtual"
    }

    fn hooks(&self) -> Hooks {
        Hooks::RESOLVE_ID.with(Hooks::LOAD)
    }

    fn resolve_id(
        &self,
        specifier: &str,
        _importer: &str,
        _ctx: &PluginContext,
    ) -> HookResult<Option<ResolveIdResult>> {
        let id = specifier.strip_prefix("virtual:").unwrap_or(specifier);
        if self.modules.contains_key(id) {
            return Ok(Some(ResolveIdResult::virtual_module(id)));
        }
        Ok(None)
    }

    fn load(&self, id: &str, _ctx: &PluginContext) -> HookResult<Option<LoadResult>> {
        Ok(id
            .strip_prefix(VIRTUAL_PREFIX)
            .and_then(|name| self.modules.get(name))
            .map(LoadResult::code))
    }
}

/// Plugin that handles JSON imports.
///
/// Turns `.json` modules into an ES module with a default export. Invalid
/// JSON fails the transform.
pub struct JsonPlugin;

impl Plugin for JsonPlugin {
    fn name(&self) -> &str {
        "json"
    }

    fn hooks(&self) -> Hooks {
        Hooks::TRANSFORM
    }

    fn transform(
        &self,
        code: &str,
        id: &str,
        _ctx: &PluginContext,
    ) -> HookResult<Option<TransformResult>> {
        if !id.ends_with(".json") {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(code)
            .map_err(|e| HookError::new(format!("invalid JSON: {e}")))?;
        Ok(Some(TransformResult::code(format!(
            "export default {value};"
        ))))
    }
}

/// Plugin that adds a banner/footer to every script module.
pub struct BannerPlugin {
    banner: Option<String>,
    footer: Option<String>,
}

impl BannerPlugin {
    /// Create a new banner plugin.
    pub fn new() -> Self {
        Self {
            banner: None,
            footer: None,
        }
    }

    /// Build from `{ banner?: string, footer?: string }` options.
    pub fn from_options(options: &Value) -> Result<Self, ConfigError> {
        let mut plugin = Self::new();
        for (key, text) in string_map("banner", options)? {
            plugin = match key.as_str() {
                "banner" => plugin.banner(text),
                "footer" => plugin.footer(text),
                other => return Err(options_error("banner", format!("unknown option '{other}'"))),
            };
        }
        Ok(plugin)
    }

    /// Set the banner (prepended to output).
    pub fn banner(mut self, text: impl Into<String>) -> Self {
        self.banner = Some(text.into());
        self
    }

    /// Set the footer (appended to output).
    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }
}

impl Default for BannerPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for BannerPlugin {
    fn name(&self) -> &str {
        "banner"
    }

    fn hooks(&self) -> Hooks {
        Hooks::TRANSFORM
    }

    fn transform(
        &self,
        code: &str,
        _id: &str,
        _ctx: &PluginContext,
    ) -> HookResult<Option<TransformResult>> {
        if self.banner.is_none() && self.footer.is_none() {
            return Ok(None);
        }

        let mut result = String::new();

        if let Some(banner) = &self.banner {
            result.push_str(banner);
            result.push('\n');
        }

        result.push_str(code);

        if let Some(footer) = &self.footer {
            result.push('\n');
            result.push_str(footer);
        }

        Ok(Some(TransformResult::code(result)))
    }
}
