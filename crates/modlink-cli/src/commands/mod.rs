pub mod config;
pub mod resolve;
pub mod transform;
pub mod version;

use miette::{miette, IntoDiagnostic, Result};
use modlink_core::config::load_config;
use modlink_core::{PluginRegistry, Session, SessionConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Global flags shared by session-backed commands.
#[derive(Debug, Clone)]
pub struct SessionArgs {
    pub cwd: PathBuf,
    pub config: Option<PathBuf>,
    pub ignore_unknown_plugins: bool,
    pub json: bool,
}

/// A loaded config plus the file it came from.
pub struct Loaded {
    pub path: Option<PathBuf>,
    pub config: SessionConfig,
}

/// Load the project config, or an empty one rooted at `cwd` when none exists.
pub fn load(args: &SessionArgs) -> Result<Loaded, modlink_core::ConfigError> {
    let loaded = load_config(&args.cwd, args.config.as_deref())?;
    let (path, mut config) = match loaded {
        Some((path, config)) => (Some(path), config),
        None => (None, SessionConfig::new(args.cwd.clone())),
    };

    let registry = PluginRegistry::with_builtins();
    if args.ignore_unknown_plugins {
        config.plugins.retain(|spec| {
            let known = registry.contains(&spec.name);
            if !known {
                warn!(plugin = %spec.name, "Skipping plugin without a factory");
            }
            known
        });
    }

    Ok(Loaded { path, config })
}

/// Load the config and build a session with the built-in plugin registry.
pub fn open_session(args: &SessionArgs) -> Result<Session, modlink_core::Error> {
    let loaded = load(args)?;
    Ok(Session::new(&loaded.config, &PluginRegistry::with_builtins())?)
}

/// Make a user-supplied path absolute against `cwd`.
pub fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
struct FailedResult {
    ok: bool,
    error: ErrorBody,
}

/// Report a failure: a JSON object on stdout with exit code 1 in JSON mode,
/// otherwise a diagnostic.
pub fn fail(json: bool, err: &modlink_core::Error) -> Result<()> {
    if json {
        let result = FailedResult {
            ok: false,
            error: ErrorBody {
                code: err.code(),
                message: err.to_string(),
            },
        };
        println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
        std::process::exit(1);
    }
    Err(miette!("{err}"))
}

/// Print a serializable result as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}
