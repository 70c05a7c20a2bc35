//! Runtime configuration sourced from environment variables.
//!
//! # Responsibility
//! - Name every recognised variable in one place (`env_vars`).
//! - Keep fallback values in one place (`defaults`).
//! - Reject malformed values instead of silently falling back.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable names.
pub mod env_vars {
    pub const API_BASE_URL: &str = "NOTESHELL_API_BASE_URL";
    /// Relative values resolve against the working directory.
    pub const STORAGE_PATH: &str = "NOTESHELL_STORAGE_PATH";
    pub const LOG_LEVEL: &str = "NOTESHELL_LOG_LEVEL";
    /// Absolute directory for rolling log files. Unset logs to stderr.
    pub const LOG_DIR: &str = "NOTESHELL_LOG_DIR";
    pub const MOUNT_TARGET: &str = "NOTESHELL_MOUNT_TARGET";
    /// `true` enables one refresh-and-retry on 401 responses.
    pub const AUTO_REFRESH: &str = "NOTESHELL_AUTO_REFRESH";
    pub const NOTIFY_TIMEOUT_MS: &str = "NOTESHELL_NOTIFY_TIMEOUT_MS";
    /// Unset keeps the HTTP client's default (no timeout).
    pub const REQUEST_TIMEOUT_SECS: &str = "NOTESHELL_REQUEST_TIMEOUT_SECS";
}

/// Default values.
pub mod defaults {
    use std::path::PathBuf;

    pub const API_BASE_URL: &str = "http://localhost:8001/api/v1";
    pub const STORAGE_FILE_NAME: &str = "local_storage.sqlite3";
    pub const MOUNT_TARGET: &str = "#app";
    pub const NOTIFY_TIMEOUT_MS: u64 = 3000;

    /// `<user data dir>/noteshell/local_storage.sqlite3`, so every working
    /// directory shares one session. Falls back to `./.noteshell/` on
    /// platforms without a data directory.
    pub fn storage_path() -> PathBuf {
        match dirs::data_local_dir() {
            Some(dir) => dir.join("noteshell").join(STORAGE_FILE_NAME),
            None => PathBuf::from(".noteshell").join(STORAGE_FILE_NAME),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { var, value, reason } => {
                write!(f, "invalid value `{value}` for {var}: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub storage_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub mount_target: String,
    pub auto_refresh: bool,
    pub notify_timeout: Duration,
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: defaults::API_BASE_URL.to_string(),
            storage_path: defaults::storage_path(),
            log_level: default_log_level().to_string(),
            log_dir: None,
            mount_target: defaults::MOUNT_TARGET.to_string(),
            auto_refresh: false,
            notify_timeout: Duration::from_millis(defaults::NOTIFY_TIMEOUT_MS),
            request_timeout: None,
        }
    }
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(url) = get(env_vars::API_BASE_URL) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    var: env_vars::API_BASE_URL,
                    value: url,
                    reason: "expected an http:// or https:// URL",
                });
            }
            config.api_base_url = url;
        }
        if let Some(path) = get(env_vars::STORAGE_PATH) {
            config.storage_path = PathBuf::from(path);
        }
        if let Some(level) = get(env_vars::LOG_LEVEL) {
            config.log_level = level;
        }
        config.log_dir = get(env_vars::LOG_DIR).map(PathBuf::from);
        if let Some(target) = get(env_vars::MOUNT_TARGET) {
            config.mount_target = target;
        }
        if let Some(value) = get(env_vars::AUTO_REFRESH) {
            config.auto_refresh = parse_bool(env_vars::AUTO_REFRESH, value)?;
        }
        if let Some(value) = get(env_vars::NOTIFY_TIMEOUT_MS) {
            config.notify_timeout =
                Duration::from_millis(parse_u64(env_vars::NOTIFY_TIMEOUT_MS, value)?);
        }
        if let Some(value) = get(env_vars::REQUEST_TIMEOUT_SECS) {
            let secs = parse_u64(env_vars::REQUEST_TIMEOUT_SECS, value.clone())?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    var: env_vars::REQUEST_TIMEOUT_SECS,
                    value,
                    reason: "timeout must be positive",
                });
            }
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value,
            reason: "expected true|false",
        }),
    }
}

fn parse_u64(var: &'static str, value: String) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
        var,
        value,
        reason: "expected a non-negative integer",
    })
}

#[cfg(test)]
mod tests {
    use super::{defaults, env_vars, AppConfig, ConfigError};
    use std::collections::HashMap;
    use std::time::Duration;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url, defaults::API_BASE_URL);
        assert_eq!(config.notify_timeout, Duration::from_millis(3000));
        assert!(!config.auto_refresh);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            (env_vars::API_BASE_URL, "https://notes.example.com/api/v1"),
            (env_vars::AUTO_REFRESH, "yes"),
            (env_vars::REQUEST_TIMEOUT_SECS, "15"),
            (env_vars::LOG_DIR, "/var/log/noteshell"),
        ])
        .unwrap();
        assert_eq!(config.api_base_url, "https://notes.example.com/api/v1");
        assert!(config.auto_refresh);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
        assert_eq!(
            config.log_dir.as_deref(),
            Some(std::path::Path::new("/var/log/noteshell"))
        );
    }

    #[test]
    fn default_storage_path_does_not_depend_on_working_directory() {
        let path = defaults::storage_path();
        assert!(path.ends_with("noteshell/local_storage.sqlite3"));
        if dirs::data_local_dir().is_some() {
            assert!(path.is_absolute());
        }
    }

    #[test]
    fn storage_path_override_is_taken_verbatim() {
        let config = config_from(&[(env_vars::STORAGE_PATH, "/tmp/ns/tokens.sqlite3")]).unwrap();
        assert_eq!(
            config.storage_path,
            std::path::PathBuf::from("/tmp/ns/tokens.sqlite3")
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[(env_vars::MOUNT_TARGET, "   ")]).unwrap();
        assert_eq!(config.mount_target, defaults::MOUNT_TARGET);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = config_from(&[(env_vars::AUTO_REFRESH, "maybe")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { var, .. } if var == env_vars::AUTO_REFRESH
        ));

        let err = config_from(&[(env_vars::API_BASE_URL, "localhost:8001")]).unwrap_err();
        assert!(err.to_string().contains(env_vars::API_BASE_URL));

        assert!(config_from(&[(env_vars::REQUEST_TIMEOUT_SECS, "0")]).is_err());
    }
}
