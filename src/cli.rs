//! Command-line interface implementation for iconsmith.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Parser, ValueEnum};
use std::path::PathBuf;

/// What a run produces.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Generate components, barrels and type declarations
    Build,
    /// Generate the markdown icon table
    Readme,
}

/// Command-line arguments structure for iconsmith.
#[derive(Parser, Debug)]
#[command(author, version, about = "iconsmith: generate React and Vue icon components from SVG folders", long_about = None)]
pub struct Args {
    /// What to generate
    #[arg(value_enum, value_name = "MODE", default_value_t = Mode::Build)]
    pub mode: Mode,

    /// Configuration file (default: build.config.json, build.config.yml or build.config.yaml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Write generated sources without running the formatter
    #[arg(long)]
    pub no_format: bool,

    /// Skip the type declaration build
    #[arg(long)]
    pub no_declarations: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 2 and an "Unknown mode" message for an invalid mode
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::InvalidValue {
                eprintln!("Unknown mode. Expected one of: build, readme.");
                std::process::exit(2);
            } else {
                e.exit();
            }
        }
    }
}
