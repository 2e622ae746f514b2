use super::{fail, load, print_json, SessionArgs};
use miette::Result;
use modlink_core::SessionConfig;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct ConfigResult<'a> {
    ok: bool,
    /// Config file, or null when defaults are in use.
    path: Option<&'a PathBuf>,
    config: &'a SessionConfig,
}

/// Run the config command.
pub fn run(args: &SessionArgs) -> Result<()> {
    let loaded = match load(args) {
        Ok(loaded) => loaded,
        Err(e) => return fail(args.json, &e.into()),
    };

    if args.json {
        return print_json(&ConfigResult {
            ok: true,
            path: loaded.path.as_ref(),
            config: &loaded.config,
        });
    }

    let config = &loaded.config;
    match &loaded.path {
        Some(path) => println!("config:  {}", path.display()),
        None => println!("config:  (none, using defaults)"),
    }
    println!("root:    {}", config.root.display());
    println!("dev:     {}", config.dev);
    println!("plugins:");
    for spec in &config.plugins {
        println!("  - {}", spec.name);
    }
    println!("alias:");
    for entry in &config.resolve.alias {
        println!("  {} -> {}", entry.find, entry.replacement.display());
    }
    println!("extensions: {}", config.extensions().join(" "));
    Ok(())
}
