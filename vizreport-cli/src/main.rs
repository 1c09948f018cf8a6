//! vizreport — render visualization templates into self-contained HTML.
//!
//! # Usage
//!
//! ```text
//! vizreport render <SOURCES>... --output <DIR> [--context <FILE>]
//!           [--title <TEXT> | --plugin <NAME> --method <NAME>]
//!           [--templates <DIR>] [--config <FILE>]
//! vizreport templates [--templates <DIR>]
//! vizreport assets [--templates <DIR>]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use commands::{package::PackageArgs, render::RenderArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "vizreport",
    version,
    about = "Render visualization templates into self-contained HTML reports",
    long_about = None,
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render source templates into an output directory.
    Render(RenderArgs),

    /// List the templates available to source files.
    Templates(PackageArgs),

    /// List the asset files copied next to every report.
    Assets(PackageArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Render(args) => args.run(),
        Commands::Templates(args) => args.run_templates(),
        Commands::Assets(args) => args.run_assets(),
    }
}
