use crate::{env_flag, env_or_default, ConfigError, Environment, FromEnv};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Logging settings.
///
/// Environment variables:
/// - `LOG_LEVEL`: default filter when `RUST_LOG` is unset (default: `info`)
/// - `LOG_TO_FILE`: also write plain-text logs to a file (default: `false`)
/// - `LOG_FILE_PATH`: log file location (default: `logs/app.log`)
#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: String,
    pub to_file: bool,
    pub file_path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            to_file: false,
            file_path: PathBuf::from("logs/app.log"),
        }
    }
}

impl FromEnv for LogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            level: env_or_default("LOG_LEVEL", &defaults.level),
            to_file: env_flag("LOG_TO_FILE", defaults.to_file)?,
            file_path: PathBuf::from(env_or_default(
                "LOG_FILE_PATH",
                &defaults.file_path.to_string_lossy(),
            )),
        })
    }
}

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in main() before any fallible operations. Safe to call
/// multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing with environment-aware formatting and error span capture.
///
/// - **Production** (`APP_ENV=production`): JSON lines, module targets hidden
/// - **Development** (default): pretty-printed, human-readable
///
/// The filter comes from `RUST_LOG` when set, otherwise from [`LogConfig::level`].
/// With [`LogConfig::to_file`] enabled, events are additionally written without
/// ANSI colors to [`LogConfig::file_path`]; parent directories are created on
/// demand. If the file cannot be opened, logging continues on stdout only.
///
/// The returned guard flushes the file writer on drop, so keep it alive for
/// the lifetime of the process.
///
/// Safe to call multiple times: later calls leave the first subscriber in place.
pub fn init_tracing(environment: &Environment, log: &LogConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));

    let (file_writer, guard, file_error) = if log.to_file {
        match file_writer(&log.file_path) {
            Ok((writer, guard)) => (Some(writer), Some(guard), None),
            Err(e) => (None, None, Some(e)),
        }
    } else {
        (None, None, None)
    };

    let file_layer = file_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
    });

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(file_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(file_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => {
            info!(environment = ?environment, level = %log.level, "Tracing initialized");
            if guard.is_some() {
                info!(path = %log.file_path.display(), "File logging enabled");
            }
        }
        Err(_) => {
            debug!("Tracing already initialized, skipping re-initialization");
        }
    }

    if let Some(e) = file_error {
        warn!(
            path = %log.file_path.display(),
            error = %e,
            "Failed to open log file, logging to stdout only"
        );
    }

    guard
}

fn file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard), InitError> {
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app.log".to_string());

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)?;

    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_defaults() {
        temp_env::with_vars_unset(["LOG_LEVEL", "LOG_TO_FILE", "LOG_FILE_PATH"], || {
            let config = LogConfig::from_env().unwrap();
            assert_eq!(config.level, "info");
            assert!(!config.to_file);
            assert_eq!(config.file_path, PathBuf::from("logs/app.log"));
        });
    }

    #[test]
    fn test_log_config_from_env() {
        temp_env::with_vars(
            [
                ("LOG_LEVEL", Some("debug")),
                ("LOG_TO_FILE", Some("true")),
                ("LOG_FILE_PATH", Some("/var/log/space/api.log")),
            ],
            || {
                let config = LogConfig::from_env().unwrap();
                assert_eq!(config.level, "debug");
                assert!(config.to_file);
                assert_eq!(config.file_path, PathBuf::from("/var/log/space/api.log"));
            },
        );
    }

    #[test]
    fn test_log_config_rejects_bad_flag() {
        temp_env::with_var("LOG_TO_FILE", Some("sometimes"), || {
            assert!(LogConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_file_writer_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("app.log");

        let (_writer, _guard) = file_writer(&path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_init_tracing_development() {
        let _guard = init_tracing(&Environment::Development, &LogConfig::default());
    }

    #[test]
    fn test_init_tracing_production_multiple_calls() {
        let log = LogConfig::default();
        let _first = init_tracing(&Environment::Production, &log);
        let _second = init_tracing(&Environment::Production, &log);
    }

    #[test]
    fn test_init_tracing_with_file_returns_guard() {
        let dir = tempfile::tempdir().unwrap();
        let log = LogConfig {
            level: "debug".to_string(),
            to_file: true,
            file_path: dir.path().join("app.log"),
        };

        let guard = init_tracing(&Environment::Development, &log);
        assert!(guard.is_some());
    }
}
