//! Configuration settings for usermgt.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::UserMgtError;

/// Main configuration structure.
///
/// Every section is optional; a missing file or section means built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathsConfig,
    pub defaults: DefaultsConfig,
    pub execution: ExecutionConfig,
    pub logging: LoggingConfig,
}

/// Filesystem locations.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Append-only action log.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Directory receiving home directory backups.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,
    /// Parent directory of user home directories.
    #[serde(default = "default_home_base")]
    pub home_base: PathBuf,
    /// Permissions applied to the backup directory (octal, e.g. "0755").
    #[serde(default = "default_backup_mode")]
    pub backup_mode: String,
}

/// Defaults for optional command-line arguments.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    /// Login shell used when `--shell` is not given.
    #[serde(default = "default_shell")]
    pub shell: String,
}

/// Subprocess execution settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionConfig {
    /// Timeout for each external command, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format ("pretty", "compact" or "json").
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_log_file() -> PathBuf {
    PathBuf::from("usermgt.log")
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from("/backup")
}

fn default_home_base() -> PathBuf {
    PathBuf::from("/home")
}

fn default_backup_mode() -> String {
    "0755".to_string()
}

fn default_shell() -> String {
    "/bin/bash".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            backup_dir: default_backup_dir(),
            home_base: default_home_base(),
            backup_mode: default_backup_mode(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, UserMgtError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| UserMgtError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        let settings = Self::from_toml(&content).map_err(|e| match e {
            UserMgtError::Config { message } => UserMgtError::Config {
                message: format!("{} (in '{}')", message, path.display()),
            },
            other => other,
        })?;

        Ok(settings)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, UserMgtError> {
        let settings: Settings = toml::from_str(content).map_err(|e| UserMgtError::Config {
            message: format!("Failed to parse config: {}", e),
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Timeout applied to every external command.
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.execution.timeout_seconds)
    }

    /// Backup directory permissions as a mode value.
    pub fn backup_mode(&self) -> Result<u32, UserMgtError> {
        parse_mode(&self.paths.backup_mode)
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<(), UserMgtError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(UserMgtError::Config {
                message: format!(
                    "Invalid log level '{}'. Valid levels: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        let valid_formats = ["pretty", "compact", "json"];
        if !valid_formats.contains(&self.logging.format.to_lowercase().as_str()) {
            return Err(UserMgtError::Config {
                message: format!(
                    "Invalid log format '{}'. Valid formats: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        for (name, path) in [
            ("paths.backup_dir", &self.paths.backup_dir),
            ("paths.home_base", &self.paths.home_base),
        ] {
            if !path.is_absolute() {
                return Err(UserMgtError::Config {
                    message: format!("{} must be an absolute path, got '{}'", name, path.display()),
                });
            }
        }

        if self.execution.timeout_seconds == 0 {
            return Err(UserMgtError::Config {
                message: "execution.timeout_seconds must be greater than zero".to_string(),
            });
        }

        self.backup_mode()?;

        Ok(())
    }
}

/// Parse an octal mode string (e.g., "0755") to a u32.
fn parse_mode(mode_str: &str) -> Result<u32, UserMgtError> {
    let digits = mode_str.trim_start_matches('0');
    let mode = if digits.is_empty() {
        Some(0)
    } else if digits.chars().all(|c| ('0'..='7').contains(&c)) {
        u32::from_str_radix(digits, 8).ok()
    } else {
        None
    };

    match mode {
        Some(mode) if mode <= 0o7777 => Ok(mode),
        _ => Err(UserMgtError::Config {
            message: format!(
                "Invalid backup mode '{}'. Must be octal (e.g., '0755')",
                mode_str
            ),
        }),
    }
}
