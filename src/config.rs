//! Configuration System
//!
//! Layered configuration for the shell and logging. Sources, lowest to
//! highest precedence: built-in defaults, the per-user config file, the
//! working directory's `treefs.toml`, then `TREEFS_*` environment variables.

use crate::error::ApiError;
use crate::logging::{self, LoggingConfig};
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TreefsConfig {
    #[serde(default)]
    pub shell: ShellConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Interactive shell settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// User name shown in the prompt
    #[serde(default = "default_user")]
    pub user: String,

    /// Colorize directory names in listings
    #[serde(default = "default_color")]
    pub color: bool,

    /// Start with debug mode on
    #[serde(default)]
    pub debug: bool,

    /// Directories created when a session starts
    #[serde(default = "default_seed_directories")]
    pub seed_directories: Vec<String>,
}

pub(crate) fn default_user() -> String {
    std::env::var("USER")
        .ok()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| "user".to_string())
}

fn default_color() -> bool {
    true
}

pub(crate) fn default_seed_directories() -> Vec<String> {
    ["/home", "/home/user", "/etc", "/var", "/tmp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            color: default_color(),
            debug: false,
            seed_directories: default_seed_directories(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Shell(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Shell(msg) => write!(f, "Shell: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ShellConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.user.trim().is_empty() {
            return Err("User name cannot be empty".to_string());
        }
        if self.user.contains(char::is_whitespace) {
            return Err(format!("User name '{}' contains whitespace", self.user));
        }
        for dir in &self.seed_directories {
            if !dir.starts_with('/') {
                return Err(format!("Seed directory '{}' must be an absolute path", dir));
            }
        }
        Ok(())
    }
}

impl TreefsConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.shell.validate() {
            errors.push(ValidationError::Shell(e));
        }
        if let Err(e) = logging::validate(&self.logging) {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding every problem into one error.
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e)))
    }
}
