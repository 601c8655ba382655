use std::path::{Path, PathBuf};

use afrwave_core::FrameNotation;
use serde::Deserialize;

use crate::cli::Args;
use crate::error::AppError;
use crate::output::OutputFormat;

/// Persisted defaults, read from `<config dir>/afrwave/settings.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub notation: Option<String>,
    pub format: Option<OutputFormat>,
    pub log_level: Option<String>,
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("afrwave").join("settings.json"))
    }

    /// Loads `explicit` if given, otherwise the default file when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&text).map_err(|source| AppError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }
}

/// Effective options after applying CLI flags over settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Options {
    pub notation: FrameNotation,
    pub format: OutputFormat,
}

impl Options {
    pub fn resolve(args: &Args, settings: &Settings) -> Self {
        let notation = args
            .notation
            .as_deref()
            .or(settings.notation.as_deref())
            .and_then(|s| s.parse::<FrameNotation>().ok())
            .unwrap_or_default();
        let format = args.format.or(settings.format).unwrap_or_default();
        Self { notation, format }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("afrwave-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"format":"json"}"#).unwrap();
        assert_eq!(
            settings,
            Settings {
                format: Some(OutputFormat::Json),
                ..Settings::default()
            }
        );
    }

    #[test]
    fn loads_explicit_file() {
        let path = scratch_file("settings.json", r#"{"notation":"binary","log_level":"debug"}"#);
        let settings = Settings::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.notation.as_deref(), Some("binary"));
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("afrwave-does-not-exist.json");
        assert_matches!(
            Settings::load(Some(&path)),
            Err(AppError::SettingsIo { .. })
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = scratch_file("broken.json", "{ notation");
        let result = Settings::load_from(&path);
        std::fs::remove_file(&path).unwrap();
        assert_matches!(result, Err(AppError::SettingsParse { .. }));
    }

    #[test]
    fn flags_override_settings() {
        let settings = Settings {
            notation: Some("binary".into()),
            format: Some(OutputFormat::Json),
            log_level: None,
        };

        let args = Args::try_parse_from(["afrwave", "decode", "B2"]).unwrap();
        assert_eq!(
            Options::resolve(&args, &settings),
            Options {
                notation: FrameNotation::Binary,
                format: OutputFormat::Json,
            }
        );

        let args = Args::try_parse_from([
            "afrwave", "--notation", "hex", "--format", "legacy", "decode", "B2",
        ])
        .unwrap();
        assert_eq!(
            Options::resolve(&args, &settings),
            Options {
                notation: FrameNotation::Hex,
                format: OutputFormat::Legacy,
            }
        );
    }
}
