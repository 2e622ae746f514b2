use super::{absolutize, fail, open_session, print_json, SessionArgs};
use miette::Result;
use modlink_core::{ResolvedLocation, ResolvedVia};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct ResolveOutput<'a> {
    ok: bool,
    specifier: &'a str,
    importer: &'a Path,
    #[serde(flatten)]
    location: &'a ResolvedLocation,
}

/// Run the resolve command.
///
/// Without `--from`, the specifier is resolved as if imported from
/// `<root>/index.html`, the dev server's entry document.
pub fn run(args: &SessionArgs, specifier: &str, from: Option<&Path>) -> Result<()> {
    let session = match open_session(args) {
        Ok(session) => session,
        Err(e) => return fail(args.json, &e),
    };

    let importer: PathBuf = match from {
        Some(path) => absolutize(&args.cwd, path),
        None => session.root().join("index.html"),
    };

    let location = match session.resolve(specifier, &importer) {
        Ok(location) => location,
        Err(e) => return fail(args.json, &e),
    };

    if args.json {
        return print_json(&ResolveOutput {
            ok: true,
            specifier,
            importer: &importer,
            location: &location,
        });
    }

    let via = match &location.via {
        ResolvedVia::Alias { pattern } => format!("alias '{pattern}'"),
        ResolvedVia::Plugin { name } => format!("plugin '{name}'"),
        ResolvedVia::Relative => "relative".to_string(),
    };
    println!("{}  ({via})", location.id);
    Ok(())
}
