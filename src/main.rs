//! iconsmith's main application entry point.
//! Parses the command line, loads the configuration and runs the selected mode.

use iconsmith::{
    cli::{get_args, Args, Mode},
    config::load_config,
    error::{default_error_handler, Result},
    logger::init_logger,
    processor::build_icons,
    readme::generate_readme,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads and validates configuration from the working directory
/// 2. Applies command-line overrides
/// 3. Builds components or writes the readme
fn run(args: Args) -> Result<()> {
    let working_dir = std::env::current_dir()?;
    let mut config = load_config(&working_dir, args.config.as_deref())?;

    if args.no_format {
        config.format = false;
    }
    if args.no_declarations {
        config.declarations = false;
    }

    match args.mode {
        Mode::Build => {
            let summary = build_icons(&config)?;
            log::debug!(
                "Generated {} files in {} folders",
                summary.generated.len(),
                summary.folders.len()
            );
        }
        Mode::Readme => {
            let readme = generate_readme(&config)?;
            log::debug!("Readme written to {}", readme.path.display());
        }
    }
    Ok(())
}
