//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$REVLANE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/revlane/config.toml`
//! 3. `~/.revlane/config.toml` (canonical write location)
//!
//! # Project Config
//!
//! Located at `.revlane.toml` in the working directory.
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected formats (e.g., the sort order must be `asc` or `desc`).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::{RevisionId, SortOrder};

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// [layout]
/// order = "desc"
///
/// [log]
/// short = false
/// indent = 2
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Layout defaults
    pub layout: Option<LayoutDefaults>,

    /// Log listing defaults
    pub log: Option<LogDefaults>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(layout) = &self.layout {
            layout.validate()?;
        }
        if let Some(log) = &self.log {
            log.validate()?;
        }
        Ok(())
    }
}

/// Project configuration.
///
/// # Example
///
/// ```toml
/// current = "rev-104"
///
/// [layout]
/// order = "asc"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Revision to treat as current when `--current` is not given
    pub current: Option<String>,

    /// Layout defaults
    pub layout: Option<LayoutDefaults>,

    /// Log listing defaults
    pub log: Option<LogDefaults>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(current) = &self.current {
            RevisionId::new(current).map_err(|e| {
                ConfigError::InvalidValue(format!("invalid current revision: {}", e))
            })?;
        }
        if let Some(layout) = &self.layout {
            layout.validate()?;
        }
        if let Some(log) = &self.log {
            log.validate()?;
        }
        Ok(())
    }
}

/// Layout defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutDefaults {
    /// Display order ("asc" or "desc")
    pub order: Option<String>,
}

impl LayoutDefaults {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(order) = &self.order {
            order.parse::<SortOrder>().map_err(|_| {
                ConfigError::InvalidValue(format!(
                    "invalid layout order '{}', must be one of: {}",
                    order,
                    SortOrder::VALID_NAMES.join(", ")
                ))
            })?;
        }
        Ok(())
    }
}

/// Log listing defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogDefaults {
    /// Print ids only
    pub short: Option<bool>,

    /// Spaces per lane
    pub indent: Option<usize>,
}

impl LogDefaults {
    /// Accepted indent range.
    pub const INDENT_RANGE: std::ops::RangeInclusive<usize> = 1..=8;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(indent) = self.indent {
            if !Self::INDENT_RANGE.contains(&indent) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid log indent {}, must be between {} and {}",
                    indent,
                    Self::INDENT_RANGE.start(),
                    Self::INDENT_RANGE.end()
                )));
            }
        }
        Ok(())
    }
}
