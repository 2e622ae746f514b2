use super::{absolutize, fail, open_session, print_json, SessionArgs};
use miette::Result;
use modlink_core::ModuleOutput;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct TransformOutput<'a> {
    ok: bool,
    #[serde(flatten)]
    module: &'a ModuleOutput,
}

/// Run the transform command.
///
/// The file is resolved as an absolute specifier, so plugins still get a
/// chance to claim it, then loaded and run through every transform hook.
/// Human mode prints the transformed code only.
pub fn run(args: &SessionArgs, file: &Path) -> Result<()> {
    let session = match open_session(args) {
        Ok(session) => session,
        Err(e) => return fail(args.json, &e),
    };

    let file = absolutize(&args.cwd, file);
    let module = match session.process(&file.display().to_string(), &file) {
        Ok(module) => module,
        Err(e) => return fail(args.json, &e),
    };

    if args.json {
        return print_json(&TransformOutput {
            ok: true,
            module: &module,
        });
    }

    print!("{}", module.code);
    if !module.code.ends_with('\n') {
        println!();
    }
    Ok(())
}
