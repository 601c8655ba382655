use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while setting up a run.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to read settings file `{}`", .path.display())]
    SettingsIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings file `{}`", .path.display())]
    SettingsParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid log filter `{filter}`")]
    LogFilter {
        filter: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("failed to install log subscriber")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
