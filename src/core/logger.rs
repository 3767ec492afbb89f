use std::str::FromStr;

use log::LevelFilter;

/// Initialise `env_logger` with `level` as the base filter. `RUST_LOG` still
/// takes precedence for individual modules.
pub fn setup_logging(level: &str) {
    env_logger::Builder::new()
        .filter_level(parse_level(level))
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}

fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level).unwrap_or(LevelFilter::Info)
}
