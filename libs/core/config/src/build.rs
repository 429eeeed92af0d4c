use crate::{env_or_default, ConfigError, FromEnv};
use chrono::{SecondsFormat, Utc};

/// Static crate identity, captured at compile time by [`app_info!`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Capture the calling crate's package name and version.
///
/// ```ignore
/// let info = core_config::app_info!();
/// ```
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Build metadata injected by the deployment pipeline.
///
/// Environment variables:
/// - `VERSION`: software version (default: `N/A`)
/// - `BUILD_DATETIME`: ISO 8601 build timestamp (default: process start time)
/// - `API_VERSION`: API version tag (default: `v1`)
#[derive(Clone, Debug)]
pub struct BuildInfo {
    pub version: String,
    pub build_datetime: String,
    pub api_version: String,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: "N/A".to_string(),
            build_datetime: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            api_version: "v1".to_string(),
        }
    }
}

impl FromEnv for BuildInfo {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            version: env_or_default("VERSION", &defaults.version),
            build_datetime: env_or_default("BUILD_DATETIME", &defaults.build_datetime),
            api_version: env_or_default("API_VERSION", &defaults.api_version),
        })
    }
}
