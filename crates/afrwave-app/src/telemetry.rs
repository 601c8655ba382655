use std::io;

use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::error::AppError;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs a stderr subscriber. `log` records from the decoder crates are
/// bridged into it.
///
/// Filter precedence: `--log-level`, then `RUST_LOG`, then the settings
/// file, then `warn`.
pub(crate) fn initialise_logging(
    cli_filter: Option<&str>,
    settings_filter: Option<&str>,
) -> Result<(), AppError> {
    let env_filter = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(cli_filter, env_filter.as_deref(), settings_filter)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_filter(filter))
        .try_init()?;

    Ok(())
}

/// A malformed filter from any source is an error rather than a silent
/// fallback to the next one.
fn log_filter(
    cli_filter: Option<&str>,
    env_filter: Option<&str>,
    settings_filter: Option<&str>,
) -> Result<EnvFilter, AppError> {
    let directives = cli_filter
        .or(env_filter.filter(|value| !value.trim().is_empty()))
        .or(settings_filter)
        .unwrap_or(DEFAULT_LOG_FILTER);
    parse_filter(directives)
}

fn parse_filter(directives: &str) -> Result<EnvFilter, AppError> {
    EnvFilter::try_new(directives).map_err(|source| AppError::LogFilter {
        filter: directives.to_string(),
        source,
    })
}
