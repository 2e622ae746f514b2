#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod logging;

use clap::Parser;
use commands::SessionArgs;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modlink")]
#[command(author, version, about = "Inspect alias resolution and plugin transforms", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    /// Config file (default: discover modlink.config.* / vite.config.*)
    #[arg(long, global = true, value_name = "PATH", env = "MODLINK_CONFIG")]
    config: Option<PathBuf>,

    /// Drop plugins this binary has no factory for instead of failing
    #[arg(long, global = true)]
    ignore_unknown_plugins: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Print the loaded configuration
    Config,

    /// Resolve an import specifier
    Resolve {
        /// The specifier as written in source (e.g. "my-lib", "./util")
        specifier: String,

        /// File containing the import (default: <root>/index.html)
        #[arg(long, value_name = "FILE")]
        from: Option<PathBuf>,
    },

    /// Load a file and run the transform pipeline over it
    Transform {
        /// File to transform
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    logging::init(cli.verbose, cli.json);
    let _span = tracing::info_span!("modlink", cwd = %cwd.display()).entered();

    let args = SessionArgs {
        cwd,
        config: cli.config,
        ignore_unknown_plugins: cli.ignore_unknown_plugins,
        json: cli.json,
    };

    match cli.command {
        Commands::Version => commands::version::run(args.json),
        Commands::Config => commands::config::run(&args),
        Commands::Resolve { specifier, from } => {
            commands::resolve::run(&args, &specifier, from.as_deref())
        }
        Commands::Transform { file } => commands::transform::run(&args, &file),
    }
}
