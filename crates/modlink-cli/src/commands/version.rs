use miette::Result;
use modlink_core::version::version_string;
use modlink_core::VERSION;
use serde::Serialize;

#[derive(Serialize)]
struct VersionResult {
    ok: bool,
    version: &'static str,
}

pub fn run(json: bool) -> Result<()> {
    if json {
        return super::print_json(&VersionResult {
            ok: true,
            version: VERSION,
        });
    }
    println!("{}", version_string());
    Ok(())
}
