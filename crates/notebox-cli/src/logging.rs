//! Tracing subscriber setup.
//!
//! Logs go to stderr so `notebox bridge` can keep stdout for responses.
//! Filter precedence: `NOTEBOX_LOG`, then `--verbose`, then the config file's
//! `logging.level`, then `warn`.

use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV};

/// Pick the filter directive from the available sources.
pub fn filter_directive(
    env_value: Option<String>,
    verbose: bool,
    config_level: Option<&str>,
) -> String {
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        return value;
    }
    if verbose {
        return "debug".to_string();
    }
    config_level
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DEFAULT_LOG_FILTER)
        .to_string()
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: bool, config_level: Option<&str>) -> anyhow::Result<()> {
    let directive = filter_directive(std::env::var(LOG_ENV).ok(), verbose, config_level);
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| anyhow::anyhow!("Invalid log filter {:?}: {}", directive, e))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    Ok(())
}
