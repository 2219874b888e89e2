//! Logger setup for the iconsmith binary.

/// Initialises `env_logger` for a one-shot CLI run.
///
/// `--verbose` shows per-file debug traces; otherwise info, warnings and
/// per-file errors are printed. `RUST_LOG` still overrides both.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();
}
