//! Configuration management for Suraksha
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.suraksha/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{Result, SurakshaError};
use crate::repl::commands::InterpreterSettings;

/// Complete configuration for Suraksha
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub navigation: NavigationConfig,
    pub display: DisplayConfig,
}

/// Where durable state lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub state_dir: String,
    /// Defaults to `history` inside `state_dir`
    pub history_file: Option<String>,
}

/// Outbound navigation to module pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub delay_ms: u64,
    pub module_base: String,
    /// Command that opens a module page, e.g. "xdg-open"
    pub launcher: Option<String>,
}

/// Terminal rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
    pub boot_reveal_interval_ms: u64,
    pub hint_every: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: "~/.suraksha".to_string(),
            history_file: None,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            delay_ms: 600,
            module_base: "modules".to_string(),
            launcher: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            boot_reveal_interval_ms: 400,
            hint_every: 5,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SurakshaError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| SurakshaError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from ~/.suraksha/config.toml if present, otherwise built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".suraksha").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.display.hint_every == 0 {
            return Err(SurakshaError::ConfigError(
                "hint_every must be greater than 0".to_string(),
            ));
        }

        if self.navigation.delay_ms > 10_000 {
            return Err(SurakshaError::ConfigError(
                "delay_ms must be at most 10000".to_string(),
            ));
        }

        if self.display.boot_reveal_interval_ms > 5_000 {
            return Err(SurakshaError::ConfigError(
                "boot_reveal_interval_ms must be at most 5000".to_string(),
            ));
        }

        if self.navigation.module_base.trim().is_empty() {
            return Err(SurakshaError::ConfigError(
                "module_base must not be empty".to_string(),
            ));
        }

        if let Some(launcher) = &self.navigation.launcher {
            if launcher.trim().is_empty() {
                return Err(SurakshaError::ConfigError(
                    "launcher must not be blank when set".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    pub fn state_dir(&self) -> PathBuf {
        Self::expand_path(&self.storage.state_dir)
    }

    pub fn history_path(&self) -> PathBuf {
        match &self.storage.history_file {
            Some(file) => Self::expand_path(file),
            None => self.state_dir().join("history"),
        }
    }

    pub fn boot_reveal_interval(&self) -> Duration {
        Duration::from_millis(self.display.boot_reveal_interval_ms)
    }

    /// Settings the command interpreter runs with
    pub fn interpreter_settings(&self) -> InterpreterSettings {
        InterpreterSettings {
            navigation_delay: Duration::from_millis(self.navigation.delay_ms),
            module_base: self.navigation.module_base.clone(),
            hint_every: self.display.hint_every,
        }
    }
}
