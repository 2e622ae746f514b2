//! Configuration file discovery and parsing.
//!
//! Loads `modlink.config.{ts,js,mjs}` or `vite.config.{ts,js,mjs}` and
//! extracts the static parts of the default export: plugins, resolve options,
//! define replacements and mode.
//!
//! ## Supported config format
//!
//! ```js
//! import { resolve } from 'path'
//! import { defineConfig } from 'vite'
//! import Vue from '@vitejs/plugin-vue'
//!
//! export default defineConfig({
//!   plugins: [Vue()],
//!   resolve: {
//!     alias: { 'my-lib': resolve(__dirname, '../src/index.ts') },
//!   },
//! })
//! ```
//!
//! `resolve(...)`, `join(...)` (optionally `path.`-qualified) and `__dirname`
//! are evaluated against the config file's directory, unless the name was
//! imported from a package other than `path`. Any other call inside
//! `plugins` names a plugin: the import source of the callee when it was
//! imported (`@vitejs/plugin-vue`), else the callee itself.

use super::{AliasEntry, PluginSpec, SessionConfig};
use crate::error::ConfigError;
use modlink_util::fs::normalize_path;
use regex_lite::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file names in priority order.
pub const CONFIG_FILES: &[&str] = &[
    "modlink.config.ts",
    "modlink.config.js",
    "modlink.config.mjs",
    "vite.config.ts",
    "vite.config.js",
    "vite.config.mjs",
];

/// Marker key for an unevaluated call expression in the parsed object.
const CALL_KEY: &str = "$call";

/// Find a config file in the given root directory.
pub fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Load configuration from a config file in the given root directory.
///
/// If `config_path` is `Some`, use that specific file. Otherwise, auto-discover.
/// The returned config is rooted at the config file's directory.
pub fn load_config(
    root: &Path,
    config_path: Option<&Path>,
) -> Result<Option<(PathBuf, SessionConfig)>, ConfigError> {
    let path = match config_path {
        Some(p) => {
            let abs = if p.is_absolute() {
                p.to_path_buf()
            } else {
                root.join(p)
            };
            if !abs.is_file() {
                return Err(ConfigError::NotFound(abs));
            }
            abs
        }
        None => match find_config_file(root) {
            Some(p) => p,
            None => return Ok(None),
        },
    };

    let source = modlink_util::fs::read_to_string_lossy(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;

    let config = parse_config_source(&source, &path).map_err(|message| ConfigError::Parse {
        path: path.clone(),
        message,
    })?;
    debug!(path = %path.display(), plugins = config.plugins.len(), aliases = config.resolve.alias.len(), "Loaded config");
    Ok(Some((path, config)))
}

/// Parse config source text. `path` locates `__dirname` and the config root.
fn parse_config_source(source: &str, path: &Path) -> Result<SessionConfig, String> {
    let dir = path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let bindings = import_bindings(source);

    let start = default_export_start(source)
        .ok_or_else(|| "No `export default { ... }` found in config file".to_string())?;

    let value = JsObjectParser::new(&source[start..], path, &dir, &bindings).parse_value()?;

    let mut config = SessionConfig::new(dir);
    let Some(obj) = value.as_object() else {
        return Err("default export is not an object".to_string());
    };

    for (key, val) in obj {
        match key.as_str() {
            "plugins" => config.plugins = plugin_specs(val, &bindings)?,
            "resolve" => apply_resolve(&mut config, val)?,
            "define" => {
                let define = val
                    .as_object()
                    .ok_or_else(|| "`define` must be an object".to_string())?;
                for (from, to) in define {
                    let to = match to {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    config.define.insert(from.clone(), to);
                }
            }
            "mode" => config.dev = val.as_str() == Some("development"),
            other => debug!(key = other, "Ignoring config key"),
        }
    }

    Ok(config)
}

/// Collect plugin calls, flattening nested arrays and skipping falsy entries.
fn plugin_specs(value: &Value, bindings: &HashMap<String, String>) -> Result<Vec<PluginSpec>, String> {
    let mut specs = Vec::new();
    let items = value
        .as_array()
        .ok_or_else(|| "`plugins` must be an array".to_string())?;

    for item in items {
        match item {
            Value::Null | Value::Bool(false) => {}
            Value::Array(_) => specs.extend(plugin_specs(item, bindings)?),
            Value::Object(map) if map.contains_key(CALL_KEY) => {
                let callee = map.get(CALL_KEY).and_then(Value::as_str).unwrap_or_default();
                let name = bindings
                    .get(callee)
                    .cloned()
                    .unwrap_or_else(|| callee.to_string());
                let options = map
                    .get("args")
                    .and_then(Value::as_array)
                    .and_then(|args| args.first())
                    .cloned()
                    .unwrap_or(Value::Null);
                specs.push(PluginSpec { name, options });
            }
            other => return Err(format!("`plugins` entries must be plugin calls, got {other}")),
        }
    }

    Ok(specs)
}

fn apply_resolve(config: &mut SessionConfig, value: &Value) -> Result<(), String> {
    let resolve = value
        .as_object()
        .ok_or_else(|| "`resolve` must be an object".to_string())?;

    match resolve.get("alias") {
        None => {}
        Some(Value::Object(map)) => {
            for (find, replacement) in map {
                let replacement = replacement
                    .as_str()
                    .ok_or_else(|| format!("alias '{find}' must map to a string path"))?;
                config.resolve.alias.push(AliasEntry {
                    find: find.clone(),
                    replacement: PathBuf::from(replacement),
                });
            }
        }
        Some(Value::Array(entries)) => {
            for entry in entries {
                let find = entry.get("find").and_then(Value::as_str);
                let replacement = entry.get("replacement").and_then(Value::as_str);
                let (Some(find), Some(replacement)) = (find, replacement) else {
                    return Err(
                        "alias array entries need string `find` and `replacement`".to_string()
                    );
                };
                config.resolve.alias.push(AliasEntry {
                    find: find.to_string(),
                    replacement: PathBuf::from(replacement),
                });
            }
        }
        Some(_) => return Err("`resolve.alias` must be an object or an array".to_string()),
    }

    if let Some(exts) = resolve.get("extensions") {
        let exts = exts
            .as_array()
            .and_then(|items| {
                items
                    .iter()
                    .map(|e| e.as_str().map(ToString::to_string))
                    .collect::<Option<Vec<_>>>()
            })
            .ok_or_else(|| "`resolve.extensions` must be an array of strings".to_string())?;
        config.resolve.extensions = Some(exts);
    }

    Ok(())
}

/// Map local import bindings to their source module.
///
/// `import Vue from '@vitejs/plugin-vue'` yields `Vue → @vitejs/plugin-vue`;
/// named (`{ a as b }`) and namespace (`* as ns`) imports are recorded too.
fn import_bindings(source: &str) -> HashMap<String, String> {
    let Ok(re) = Regex::new(
        r#"import\s+(?:type\s+)?(?:([A-Za-z_$][\w$]*)\s*,?\s*)?(?:\{([^}]*)\}\s*)?(?:\*\s*as\s+([A-Za-z_$][\w$]*)\s*)?from\s*['"]([^'"]+)['"]"#,
    ) else {
        return HashMap::new();
    };

    let mut bindings = HashMap::new();
    for caps in re.captures_iter(source) {
        let Some(module) = caps.get(4).map(|m| m.as_str().to_string()) else {
            continue;
        };
        if let Some(default) = caps.get(1) {
            bindings.insert(default.as_str().to_string(), module.clone());
        }
        if let Some(ns) = caps.get(3) {
            bindings.insert(ns.as_str().to_string(), module.clone());
        }
        if let Some(named) = caps.get(2) {
            for item in named.as_str().split(',') {
                let local = item.rsplit(" as ").next().unwrap_or(item).trim();
                if !local.is_empty() {
                    bindings.insert(local.to_string(), module.clone());
                }
            }
        }
    }
    bindings
}

/// Byte offset just past `export default` at the start of a line.
fn default_export_start(source: &str) -> Option<usize> {
    let re = Regex::new(r"(?m)^\s*export\s+default\b").ok()?;
    re.find(source).map(|m| m.end())
}

/// Parser for the object-literal subset found in config files.
///
/// Handles comments, unquoted keys, single/double/backtick strings, trailing
/// commas, nested objects and arrays, numbers, booleans, null, `__dirname`,
/// and call expressions. Path helpers are evaluated; other calls are kept as
/// `{"$call": callee, "args": [...]}`. Parsing stops after the first value.
struct JsObjectParser<'a> {
    chars: Vec<char>,
    pos: usize,
    file: &'a Path,
    dir: &'a Path,
    /// Local import names mapped to their source module.
    bindings: &'a HashMap<String, String>,
}

impl<'a> JsObjectParser<'a> {
    fn new(
        input: &str,
        file: &'a Path,
        dir: &'a Path,
        bindings: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            file,
            dir,
            bindings,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    /// Skip whitespace, `// line` and `/* block */` comments.
    fn skip_trivia(&mut self) {
        loop {
            match (self.peek(), self.chars.get(self.pos + 1).copied()) {
                (Some(ch), _) if ch.is_whitespace() => self.pos += 1,
                (Some('/'), Some('/')) => {
                    while self.peek().is_some_and(|ch| ch != '\n') {
                        self.pos += 1;
                    }
                }
                (Some('/'), Some('*')) => {
                    self.pos += 2;
                    while self.pos < self.chars.len()
                        && !(self.chars[self.pos] == '*'
                            && self.chars.get(self.pos + 1) == Some(&'/'))
                    {
                        self.pos += 1;
                    }
                    self.pos = (self.pos + 2).min(self.chars.len());
                }
                _ => break,
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, String> {
        self.skip_trivia();
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some('"' | '\'' | '`') => self.parse_string().map(Value::String),
            Some(ch) if ch == '-' || ch.is_ascii_digit() => self.parse_number(),
            Some(ch) if is_ident_start(ch) => self.parse_identifier_expr(),
            Some(ch) => Err(format!("Unexpected character '{}' at position {}", ch, self.pos)),
            None => Err("Unexpected end of input".to_string()),
        }
    }

    fn parse_object(&mut self) -> Result<Value, String> {
        self.advance(); // skip '{'
        let mut map = Map::new();

        loop {
            self.skip_trivia();
            match self.peek() {
                Some('}') => {
                    self.advance();
                    return Ok(Value::Object(map));
                }
                None => return Err("Unterminated object".to_string()),
                _ => {}
            }

            let key = self.parse_key()?;
            self.skip_trivia();

            match self.advance() {
                Some(':') => {}
                other => return Err(format!("Expected ':' after key, got {other:?}")),
            }

            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some('}') => {}
                None => return Err("Unterminated object".to_string()),
                Some(ch) => return Err(format!("Expected ',' or '}}' in object, got '{ch}'")),
            }
        }
    }

    /// Comma-separated values up to `close`, which is consumed.
    fn parse_list(&mut self, close: char) -> Result<Vec<Value>, String> {
        let mut items = Vec::new();

        loop {
            self.skip_trivia();
            match self.peek() {
                Some(ch) if ch == close => {
                    self.advance();
                    return Ok(items);
                }
                None => return Err(format!("Unterminated list, expected '{close}'")),
                _ => {}
            }

            items.push(self.parse_value()?);

            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some(ch) if ch == close => {}
                None => return Err(format!("Unterminated list, expected '{close}'")),
                Some(ch) => return Err(format!("Expected ',' or '{close}', got '{ch}'")),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, String> {
        self.advance(); // skip '['
        self.parse_list(']').map(Value::Array)
    }

    fn parse_key(&mut self) -> Result<String, String> {
        self.skip_trivia();
        match self.peek() {
            Some('"' | '\'') => self.parse_string(),
            Some(ch) if is_ident_start(ch) || ch == '.' => {
                // Bare key (may contain dots for keys like process.env.NODE_ENV)
                let mut key = String::new();
                while let Some(ch) = self.peek() {
                    if is_ident_char(ch) || ch == '.' {
                        key.push(ch);
                        self.advance();
                    } else {
                        break;
                    }
                }
                Ok(key)
            }
            other => Err(format!("Expected object key, got {other:?}")),
        }
    }

    fn parse_string(&mut self) -> Result<String, String> {
        let Some(quote) = self.advance() else {
            return Err("Unexpected end of input".to_string());
        };
        let mut s = String::new();

        loop {
            match self.advance() {
                Some(ch) if ch == quote => return Ok(s),
                Some('$') if quote == '`' && self.peek() == Some('{') => {
                    return Err("template literal interpolation is not supported".to_string());
                }
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    Some('\\') => s.push('\\'),
                    Some(ch) if ch == quote => s.push(ch),
                    Some(ch) => {
                        s.push('\\');
                        s.push(ch);
                    }
                    None => return Err("Unterminated string escape".to_string()),
                },
                Some(ch) => s.push(ch),
                None => return Err("Unterminated string".to_string()),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Value, String> {
        let mut num_str = String::new();
        let mut has_dot = false;

        if self.peek() == Some('-') {
            num_str.push('-');
            self.advance();
        }

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if has_dot {
            let n = num_str
                .parse::<f64>()
                .map_err(|e| format!("Invalid number '{num_str}': {e}"))?;
            serde_json::Number::from_f64(n)
                .map(Value::Number)
                .ok_or_else(|| format!("Invalid number '{num_str}'"))
        } else {
            num_str
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .map_err(|e| format!("Invalid number '{num_str}': {e}"))
        }
    }

    /// Literal keyword, `__dirname`/`__filename`, or a call expression.
    fn parse_identifier_expr(&mut self) -> Result<Value, String> {
        let start = self.pos;
        let mut ident = String::new();
        while let Some(ch) = self.peek() {
            if is_ident_char(ch) || ch == '.' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            "null" | "undefined" => return Ok(Value::Null),
            "__dirname" => return Ok(Value::String(self.dir.display().to_string())),
            "__filename" => return Ok(Value::String(self.file.display().to_string())),
            _ => {}
        }

        self.skip_trivia();
        if self.peek() != Some('(') {
            return Err(format!("Unsupported identifier '{ident}' at position {start}"));
        }
        self.advance();
        let args = self.parse_list(')')?;

        if let Some(method) = self.path_helper(&ident) {
            return self.eval_path_call(method, &args).map(Value::String);
        }
        if ident == "defineConfig" {
            return Ok(args.into_iter().next().unwrap_or(Value::Null));
        }

        let mut call = Map::new();
        call.insert(CALL_KEY.to_string(), Value::String(ident));
        call.insert("args".to_string(), Value::Array(args));
        Ok(Value::Object(call))
    }

    /// `resolve` or `join` when `ident` calls the node `path` helper.
    ///
    /// A bare name counts when it is unbound or imported from `path`; a
    /// qualified one when its namespace is. `import resolve from
    /// '@rollup/plugin-node-resolve'` therefore stays a plugin call.
    fn path_helper<'i>(&self, ident: &'i str) -> Option<&'i str> {
        let (local, method) = ident.rsplit_once('.').unwrap_or((ident, ident));
        if !matches!(method, "resolve" | "join") {
            return None;
        }
        let is_path = match self.bindings.get(local) {
            Some(source) => matches!(source.as_str(), "path" | "node:path"),
            None => local == method || local == "path",
        };
        is_path.then_some(method)
    }

    /// Evaluate `resolve(...)`/`join(...)` with string arguments.
    ///
    /// `resolve` anchors a relative result at the config directory.
    fn eval_path_call(&self, method: &str, args: &[Value]) -> Result<String, String> {
        let mut path = PathBuf::new();
        for arg in args {
            let segment = arg
                .as_str()
                .ok_or_else(|| format!("`{method}` arguments must be strings, got {arg}"))?;
            // `join` concatenates; only `resolve` restarts at an absolute segment.
            if method == "join" && !path.as_os_str().is_empty() {
                path.push(segment.trim_start_matches('/'));
            } else {
                path.push(segment);
            }
        }
        if method == "resolve" && !path.is_absolute() {
            path = self.dir.join(path);
        }
        Ok(normalize_path(&path).display().to_string())
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SessionConfig {
        parse_config_source(source, Path::new("/repo/play/vite.config.ts")).unwrap()
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_config_file(dir.path()).is_none());

        std::fs::write(dir.path().join("vite.config.js"), "export default {}").unwrap();
        assert_eq!(
            find_config_file(dir.path()).unwrap(),
            dir.path().join("vite.config.js")
        );

        // modlink.config.ts takes priority
        std::fs::write(dir.path().join("modlink.config.ts"), "export default {}").unwrap();
        assert_eq!(
            find_config_file(dir.path()).unwrap(),
            dir.path().join("modlink.config.ts")
        );
    }

    #[test]
    fn test_playground_config() {
        let source = r#"
            import { resolve } from 'path'
            import { defineConfig } from 'vite'
            import Vue from '@vitejs/plugin-vue'

            export default defineConfig({
              plugins: [
                Vue(),
              ],
              resolve: {
                alias: {
                  'vue-imitate-input': resolve(__dirname, '../src/index.ts'),
                },
              },
            })
        "#;

        let config = parse(source);
        assert_eq!(config.root, PathBuf::from("/repo/play"));
        assert_eq!(config.plugins, vec![PluginSpec::new("@vitejs/plugin-vue")]);
        assert_eq!(
            config.resolve.alias,
            vec![AliasEntry {
                find: "vue-imitate-input".to_string(),
                replacement: PathBuf::from("/repo/src/index.ts"),
            }]
        );
    }

    #[test]
    fn test_plugin_options_and_unbound_callee() {
        let source = r#"
            export default {
              plugins: [
                replace({ __VERSION__: '"1.0.0"' }),
                [json()],
                false,
              ],
            };
        "#;

        let config = parse(source);
        assert_eq!(config.plugins.len(), 2);
        assert_eq!(config.plugins[0].name, "replace");
        assert_eq!(
            config.plugins[0].options,
            serde_json::json!({ "__VERSION__": "\"1.0.0\"" })
        );
        assert_eq!(config.plugins[1], PluginSpec::new("json"));
    }

    #[test]
    fn test_alias_array_form_and_extensions() {
        let source = r#"
            export default {
              resolve: {
                alias: [
                  { find: '@', replacement: './src' },
                  { find: 'lib', replacement: path.join('/abs', 'lib') },
                ],
                extensions: ['.ts', '.vue'],
              },
            };
        "#;

        let config = parse(source);
        assert_eq!(config.resolve.alias[0].replacement, PathBuf::from("./src"));
        assert_eq!(config.resolve.alias[1].replacement, PathBuf::from("/abs/lib"));
        assert_eq!(
            config.resolve.extensions,
            Some(vec![".ts".to_string(), ".vue".to_string()])
        );
    }

    #[test]
    fn test_define_and_mode() {
        let source = r#"
            // This is a config file
            export default {
                mode: 'development', /* inline */
                define: {
                    'process.env.NODE_ENV': '"development"',
                    __DEV__: true,
                },
            };
        "#;

        let config = parse(source);
        assert!(config.dev);
        assert_eq!(
            config.define.get("process.env.NODE_ENV").map(String::as_str),
            Some("\"development\"")
        );
        assert_eq!(config.define.get("__DEV__").map(String::as_str), Some("true"));
    }

    #[test]
    fn test_import_bindings() {
        let bindings = import_bindings(
            "import Vue from '@vitejs/plugin-vue'\n\
             import { resolve, join as j } from 'node:path'\n\
             import * as legacy from \"@vitejs/plugin-legacy\";",
        );
        assert_eq!(bindings.get("Vue").map(String::as_str), Some("@vitejs/plugin-vue"));
        assert_eq!(bindings.get("j").map(String::as_str), Some("node:path"));
        assert_eq!(bindings.get("resolve").map(String::as_str), Some("node:path"));
        assert_eq!(
            bindings.get("legacy").map(String::as_str),
            Some("@vitejs/plugin-legacy")
        );
    }

    #[test]
    fn test_rejects_bad_shapes() {
        let path = Path::new("/repo/vite.config.js");
        assert!(parse_config_source("const config = {};", path).is_err());
        assert!(parse_config_source("export default { plugins: ['vue'] }", path).is_err());
        assert!(parse_config_source("export default { resolve: { alias: { a: 1 } } }", path).is_err());
        assert!(parse_config_source("export default { base: someVar }", path).is_err());
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("modlink.config.js"),
            "export default { resolve: { alias: { '@': './src' } } };",
        )
        .unwrap();

        let (path, config) = load_config(dir.path(), None).unwrap().unwrap();
        assert_eq!(path, dir.path().join("modlink.config.js"));
        assert_eq!(config.root, dir.path());
        assert_eq!(config.resolve.alias[0].find, "@");
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path(), Some(Path::new("nonexistent.config.js")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_config_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("vite.config.js");
        std::fs::write(&file, "export default { plugins: [ }").unwrap();

        match load_config(dir.path(), None) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = r#"
            // export default { plugins: [bogus()] }
            export default {
              /* block
                 comment */ mode: 'development', // trailing
              define: { __URL__: '"http://example.com // not a comment"' },
            };
        "#;

        let config = parse(source);
        assert!(config.dev);
        assert!(config.plugins.is_empty());
        assert_eq!(
            config.define.get("__URL__").map(String::as_str),
            Some("\"http://example.com // not a comment\"")
        );
    }

    #[test]
    fn test_resolve_imported_from_plugin_package() {
        let source = r#"
            import path from 'node:path'
            import resolve from '@rollup/plugin-node-resolve'

            export default {
              plugins: [resolve({ browser: true })],
              resolve: {
                alias: { '@': path.resolve(__dirname, 'src') },
              },
            };
        "#;

        let config = parse(source);
        assert_eq!(config.plugins.len(), 1);
        assert_eq!(config.plugins[0].name, "@rollup/plugin-node-resolve");
        assert_eq!(
            config.plugins[0].options,
            serde_json::json!({ "browser": true })
        );
        assert_eq!(
            config.resolve.alias[0].replacement,
            PathBuf::from("/repo/play/src")
        );
    }

    #[test]
    fn test_alias_object_keeps_declared_order() {
        let config = parse("export default { resolve: { alias: { zeta: '/z', alpha: '/a' } } }");
        let finds: Vec<&str> = config
            .resolve
            .alias
            .iter()
            .map(|entry| entry.find.as_str())
            .collect();
        assert_eq!(finds, vec!["zeta", "alpha"]);
    }
}
