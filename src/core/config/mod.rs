//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! revlane has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Per-directory overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$REVLANE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/revlane/config.toml`
//! 3. `~/.revlane/config.toml` (canonical write location)
//!
//! # Project Config Location
//!
//! `.revlane.toml` in the project directory.
//!
//! # Example
//!
//! ```no_run
//! use revlane::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! let config = result.config;
//!
//! println!("Order: {}", config.order());
//! if let Some(current) = config.current() {
//!     println!("Current revision: {}", current);
//! }
//! ```

pub mod schema;

pub use schema::{GlobalConfig, LayoutDefaults, LogDefaults, ProjectConfig};

use crate::core::types::SortOrder;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the project config.
pub const PROJECT_CONFIG_FILE: &str = ".revlane.toml";

/// Spaces per lane in the log listing when not configured.
pub const DEFAULT_LOG_INDENT: usize = 2;

/// Keys understood by [`Config::get`] and [`Config::set_project_value`].
pub const KNOWN_KEYS: &[&str] = &["current", "layout.order", "log.short", "log.indent"];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown config key '{0}'")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules automatically. Project config
/// overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if present)
    pub project: Option<ProjectConfig>,
    global_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `project_dir` is provided, also loads `.revlane.toml` from it.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(project_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let global_path = Self::find_global(&mut warnings);
        let mut result = Self::load_from(global_path.as_deref(), project_dir)?;
        result.warnings.splice(0..0, warnings);
        Ok(result)
    }

    /// Load configuration from an explicit global file and project directory.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_from(
        global_file: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let (global, global_path) = match global_file {
            Some(path) if path.exists() => (Self::read_toml(path)?, Some(path.to_path_buf())),
            _ => (GlobalConfig::default(), None),
        };

        let (project, project_path) = match project_dir {
            Some(dir) => {
                let path = Self::project_config_path(dir);
                if path.exists() {
                    (Some(Self::read_toml::<ProjectConfig>(&path)?), Some(path))
                } else {
                    (None, None)
                }
            }
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        tracing::debug!(
            global = ?global_path,
            project = ?project_path,
            "loaded configuration"
        );

        Ok(ConfigLoadResult {
            config: Config {
                global,
                project,
                global_path,
                project_path,
            },
            warnings: Vec::new(),
        })
    }

    /// Locate the global config file in standard locations.
    fn find_global(warnings: &mut Vec<ConfigWarning>) -> Option<PathBuf> {
        // 1. Check $REVLANE_CONFIG
        if let Ok(path) = std::env::var("REVLANE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
            warnings.push(ConfigWarning {
                message: "REVLANE_CONFIG points at a file that does not exist".to_string(),
                path,
            });
        }

        // 2. Check $XDG_CONFIG_HOME/revlane/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("revlane/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.revlane/config.toml
        if let Ok(path) = Self::global_config_path() {
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for global config.
    ///
    /// Returns `~/.revlane/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".revlane/config.toml"))
    }

    /// Get the path for project config in `dir`.
    pub fn project_config_path(dir: &Path) -> PathBuf {
        dir.join(PROJECT_CONFIG_FILE)
    }

    /// Write project config atomically.
    pub fn write_project(dir: &Path, config: &ProjectConfig) -> Result<PathBuf, ConfigError> {
        config.validate()?;
        let path = Self::project_config_path(dir);
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Set a single key in the project config of `dir`, creating the file
    /// if needed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys outside [`KNOWN_KEYS`] and
    /// `ConfigError::InvalidValue` if the value does not validate.
    pub fn set_project_value(dir: &Path, key: &str, value: &str) -> Result<PathBuf, ConfigError> {
        let path = Self::project_config_path(dir);
        let mut project: ProjectConfig = if path.exists() {
            Self::read_toml(&path)?
        } else {
            ProjectConfig::default()
        };

        match key {
            "current" => project.current = Some(value.to_string()),
            "layout.order" => {
                project.layout.get_or_insert_with(Default::default).order = Some(value.to_string())
            }
            "log.short" => {
                let short = value.parse::<bool>().map_err(|_| {
                    ConfigError::InvalidValue(format!("log.short expects true or false, got '{}'", value))
                })?;
                project.log.get_or_insert_with(Default::default).short = Some(short);
            }
            "log.indent" => {
                let indent = value.parse::<usize>().map_err(|_| {
                    ConfigError::InvalidValue(format!("log.indent expects a number, got '{}'", value))
                })?;
                project.log.get_or_insert_with(Default::default).indent = Some(indent);
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }

        Self::write_project(dir, &project)
    }

    /// Write a config file atomically.
    fn write_config_atomic<T: serde::Serialize>(
        path: &Path,
        config: &T,
    ) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        // Write to temp file in same directory (for atomic rename)
        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn layout_order(&self) -> Option<&str> {
        self.project
            .as_ref()
            .and_then(|p| p.layout.as_ref())
            .and_then(|l| l.order.as_deref())
            .or_else(|| {
                self.global
                    .layout
                    .as_ref()
                    .and_then(|l| l.order.as_deref())
            })
    }

    fn log_defaults(&self) -> impl Iterator<Item = &LogDefaults> {
        self.project
            .as_ref()
            .and_then(|p| p.log.as_ref())
            .into_iter()
            .chain(self.global.log.as_ref())
    }

    /// Get the display order.
    ///
    /// Defaults to `desc` (newest first) if not configured.
    pub fn order(&self) -> SortOrder {
        self.layout_order()
            .and_then(|o| o.parse().ok())
            .unwrap_or_default()
    }

    /// Get the configured current revision id.
    pub fn current(&self) -> Option<&str> {
        self.project.as_ref().and_then(|p| p.current.as_deref())
    }

    /// Check if the log listing should print ids only.
    ///
    /// Defaults to `false` if not configured.
    pub fn log_short(&self) -> bool {
        self.log_defaults().find_map(|l| l.short).unwrap_or(false)
    }

    /// Get the number of spaces per lane in the log listing.
    pub fn log_indent(&self) -> usize {
        self.log_defaults()
            .find_map(|l| l.indent)
            .unwrap_or(DEFAULT_LOG_INDENT)
    }

    /// Get the effective value of a config key as a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys outside [`KNOWN_KEYS`].
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match key {
            "current" => Ok(self.current().map(str::to_string)),
            "layout.order" => Ok(Some(self.order().to_string())),
            "log.short" => Ok(Some(self.log_short().to_string())),
            "log.indent" => Ok(Some(self.log_indent().to_string())),
            other => Err(ConfigError::UnknownKey(other.to_string())),
        }
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}
