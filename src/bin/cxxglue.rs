// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # cxxglue CLI
//!
//! Generate binding glue from C++ headers.
//!
//! ## Usage
//!
//! ```sh
//! # pybind11 sources for every directory in a config file
//! cxxglue pybind --config demos/tiledb.toml
//!
//! # pybind11 sources for one directory, no config file
//! cxxglue pybind --source-dir include --output-dir gen --namespace tiledb
//!
//! # Combined SWIG interface file
//! cxxglue swig --config demos/tiledb.toml
//!
//! # Show how each declaration of a header is classified
//! cxxglue inspect include/tiledb_cxx_array.h
//!
//! # List the headers a run would process
//! cxxglue locate --config demos/tiledb.toml
//!
//! # Turn a macro-driven enum header into plain enums
//! cxxglue convert-enums tiledb_enum.h gen/tiledb_enum.h
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{ConvertEnumsCmd, InspectCmd, LocateCmd, PybindCmd, SwigCmd};
use common::Result;
use tracing_subscriber::EnvFilter;

/// cxxglue - binding glue generator for C++ headers
///
/// Emits pybind11 registration sources and SWIG interface files from
/// directories of C++ headers, driven by naming conventions and keyword lists.
#[derive(Parser, Clone)]
#[command(name = "cxxglue")]
#[command(about = "Generate pybind11 and SWIG glue from C++ headers", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Log every method decision
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Generate pybind11 registration sources
    Pybind(PybindCmd),

    /// Generate a combined SWIG interface file
    Swig(SwigCmd),

    /// Parse one header and show how it is classified
    Inspect(InspectCmd),

    /// List the headers a run would process
    Locate(LocateCmd),

    /// Convert a macro-driven enum header into plain enums
    ConvertEnums(ConvertEnumsCmd),
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "cxxglue=debug"
    } else {
        "cxxglue=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Pybind(cmd) => cmd.run(),
        Commands::Swig(cmd) => cmd.run(),
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Locate(cmd) => cmd.run(),
        Commands::ConvertEnums(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
