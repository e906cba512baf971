use log::LevelFilter;

/// Picks the default filter from the CLI flags. `--quiet` wins over `--verbose`.
pub fn level_filter(quiet: bool, verbose: bool, configured: &str) -> String {
    if quiet {
        LevelFilter::Error.to_string().to_lowercase()
    } else if verbose {
        LevelFilter::Debug.to_string().to_lowercase()
    } else {
        configured.to_string()
    }
}

/// Installs `env_logger`. `RUST_LOG` still overrides the computed default.
pub fn init(quiet: bool, verbose: bool, configured: &str) {
    let filter = level_filter(quiet, verbose, configured);
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .try_init();
}
