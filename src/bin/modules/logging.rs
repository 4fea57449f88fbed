use log::LevelFilter;

/// Maps the number of `-v` flags to a log level for this crate.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes `env_logger`. `RUST_LOG` wins when it is set; otherwise only this crate logs,
/// at the level selected on the command line.
pub fn init(verbose: u8) {
    let level = level_for_verbosity(verbose);
    let filter = format!("chimes_calc={}", level.as_str().to_lowercase());

    if std::env::var("RUST_LOG").is_err() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
            .format_timestamp(None)
            .init();
    } else {
        env_logger::init();
    }
}
