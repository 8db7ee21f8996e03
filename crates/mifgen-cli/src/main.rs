//! Mifgen CLI - Memory Initialization File Generator
//!
//! The main entry point for the `mifgen` command-line tool.
//!
//! # Commands
//! - `mifgen convert` - Convert an array file into a memory image
//! - `mifgen inspect` - Show shape, type and value range of an array file
//! - `mifgen decode` - Decode a memory image back into integers
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// CLI-specific allowances
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::doc_markdown)]

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;

use cli::{Cli, Commands};
use config::MifgenConfig;
use error::CliResult;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    commands::utils::set_quiet(cli.quiet);

    let config = MifgenConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert(args) => commands::convert::execute(args, &config),
        Commands::Inspect(args) => commands::inspect::execute(args, &config),
        Commands::Decode(args) => commands::decode::execute(args, &config),
    }
}

/// Install the stderr log subscriber; `RUST_LOG` takes precedence.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "mifgen=debug,mifgen_encode=debug,mifgen_npy=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
