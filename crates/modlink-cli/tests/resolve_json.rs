//! Integration tests for `modlink resolve/transform/config --json`.
//!
//! These tests verify:
//! - JSON output is always valid JSON with an `ok` boolean
//! - A vite-style playground config aliases a package name to local source
//! - Failures carry SCREAMING_SNAKE_CASE error codes and exit non-zero

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

fn modlink(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_modlink"));
    cmd.arg("--cwd").arg(cwd).env_remove("MODLINK_CONFIG");
    cmd
}

fn run_json(cmd: &mut Command) -> (bool, serde_json::Value) {
    let output = cmd.arg("--json").output().expect("Failed to run modlink");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");
    (output.status.success(), json)
}

/// Library repo: `src/` holds the library, `play/` the playground.
fn playground() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let root = std::fs::canonicalize(dir.path()).unwrap();
    std::fs::create_dir_all(root.join("src")).unwrap();
    std::fs::create_dir_all(root.join("play")).unwrap();
    std::fs::write(
        root.join("src/index.ts"),
        "export const version = __VERSION__;\n",
    )
    .unwrap();
    std::fs::write(root.join("play/main.ts"), "import 'vue-imitate-input';\n").unwrap();
    std::fs::write(root.join("play/util.ts"), "export {};\n").unwrap();
    std::fs::write(
        root.join("play/vite.config.ts"),
        r#"import { resolve } from 'path'
import { defineConfig } from 'vite'
import Vue from '@vitejs/plugin-vue'

export default defineConfig({
  plugins: [
    Vue(),
  ],
  define: {
    __VERSION__: '"0.1.0"',
  },
  resolve: {
    alias: {
      'vue-imitate-input': resolve(__dirname, '../src/index.ts'),
    },
  },
})
"#,
    )
    .unwrap();
    (dir, root)
}

#[test]
fn test_resolve_alias_to_local_source() {
    let (_dir, root) = playground();
    let play = root.join("play");

    let (ok, json) = run_json(
        modlink(&play)
            .arg("--ignore-unknown-plugins")
            .args(["resolve", "vue-imitate-input", "--from", "main.ts"]),
    );

    assert!(ok);
    assert_eq!(json["ok"], true);
    assert_eq!(json["id"]["kind"], "file");
    assert_eq!(
        json["id"]["id"],
        root.join("src/index.ts").display().to_string()
    );
    assert_eq!(json["via"]["step"], "alias");
    assert_eq!(json["via"]["pattern"], "vue-imitate-input");
}

#[test]
fn test_resolve_relative_fallback() {
    let (_dir, root) = playground();
    let play = root.join("play");

    let (ok, json) = run_json(
        modlink(&play)
            .arg("--ignore-unknown-plugins")
            .args(["resolve", "./util", "--from", "main.ts"]),
    );

    assert!(ok);
    assert_eq!(json["via"]["step"], "relative");
    assert_eq!(json["id"]["id"], play.join("util.ts").display().to_string());
}

#[test]
fn test_resolve_not_found_is_error_code() {
    let (_dir, root) = playground();
    let play = root.join("play");

    let (ok, json) = run_json(
        modlink(&play)
            .arg("--ignore-unknown-plugins")
            .args(["resolve", "./missing", "--from", "main.ts"]),
    );

    assert!(!ok, "missing module should exit non-zero");
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("./missing"));
}

#[test]
fn test_unknown_plugin_is_config_error() {
    let (_dir, root) = playground();

    let (ok, json) = run_json(modlink(&root.join("play")).args(["resolve", "./util"]));

    assert!(!ok);
    assert_eq!(json["error"]["code"], "CONFIG_ERROR");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("@vitejs/plugin-vue"));
}

#[test]
fn test_transform_applies_define() {
    let (_dir, root) = playground();

    let (ok, json) = run_json(
        modlink(&root.join("play"))
            .arg("--ignore-unknown-plugins")
            .args(["transform", "../src/index.ts"]),
    );

    assert!(ok);
    assert_eq!(json["code"], "export const version = \"0.1.0\";\n");
    assert_eq!(json["hash"].as_str().unwrap().len(), 16);
}

#[test]
fn test_config_reports_plugins_and_aliases() {
    let (_dir, root) = playground();
    let play = root.join("play");

    let (ok, json) = run_json(modlink(&play).arg("config"));

    assert!(ok);
    assert_eq!(
        json["path"],
        play.join("vite.config.ts").display().to_string()
    );
    assert_eq!(json["config"]["plugins"][0]["name"], "@vitejs/plugin-vue");
    assert_eq!(
        json["config"]["resolve"]["alias"][0]["replacement"],
        root.join("src/index.ts").display().to_string()
    );
}

#[test]
fn test_config_without_file_uses_defaults() {
    let dir = tempdir().unwrap();

    let (ok, json) = run_json(modlink(dir.path()).arg("config"));

    assert!(ok);
    assert!(json["path"].is_null());
    assert!(json["config"]["plugins"].as_array().unwrap().is_empty());
}

#[test]
fn test_version_json() {
    let dir = tempdir().unwrap();
    let (ok, json) = run_json(modlink(dir.path()).arg("version"));
    assert!(ok);
    assert!(json["version"].is_string());
}
