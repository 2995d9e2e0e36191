//! # Configuration
//!
//! Validation behavior is configured through plain values passed into the
//! validators. There is no process-wide toggle.
//!
//! [`CheckConfig`] is the file-level configuration used by the CLI. It is
//! read from YAML and may be overridden by environment variables:
//!
//! - `APICHECK_STRICT_REQUIRED` (default: `true`)
//! - `APICHECK_FAIL_ON_WARNINGS` (default: `false`)

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Environment variable overriding [`CheckConfig::strict_required`].
pub const ENV_STRICT_REQUIRED: &str = "APICHECK_STRICT_REQUIRED";
/// Environment variable overriding [`CheckConfig::fail_on_warnings`].
pub const ENV_FAIL_ON_WARNINGS: &str = "APICHECK_FAIL_ON_WARNINGS";

/// Per-call options for contract validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOptions {
    /// Route missing required fields to `errors` (`true`) or `warnings`.
    pub strict_required: bool,
}

impl ValidateOptions {
    /// Missing required fields become warnings.
    pub fn lenient() -> Self {
        Self {
            strict_required: false,
        }
    }
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            strict_required: true,
        }
    }
}

/// Configuration file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// See [`ValidateOptions::strict_required`].
    pub strict_required: bool,
    /// Treat a result with warnings as a failed check.
    pub fail_on_warnings: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            strict_required: true,
            fail_on_warnings: false,
        }
    }
}

impl CheckConfig {
    /// Parse a YAML config document.
    pub fn from_yaml_str(content: &str, origin: &str) -> Result<Self, CoreError> {
        serde_yaml::from_str(content).map_err(|e| CoreError::InvalidConfig {
            path: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// Load a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if the file cannot be read and
    /// [`CoreError::InvalidConfig`] if it is not a valid config document.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content, &path.display().to_string())
    }

    /// Apply `APICHECK_*` environment overrides.
    pub fn with_env_overrides(self) -> Result<Self, CoreError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CoreError> {
        if let Some(raw) = lookup(ENV_STRICT_REQUIRED) {
            self.strict_required = parse_flag(ENV_STRICT_REQUIRED, &raw)?;
        }
        if let Some(raw) = lookup(ENV_FAIL_ON_WARNINGS) {
            self.fail_on_warnings = parse_flag(ENV_FAIL_ON_WARNINGS, &raw)?;
        }
        Ok(self)
    }

    /// The per-call options this config implies.
    pub fn validate_options(&self) -> ValidateOptions {
        ValidateOptions {
            strict_required: self.strict_required,
        }
    }
}

fn parse_flag(var: &str, raw: &str) -> Result<bool, CoreError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CoreError::InvalidEnvFlag {
            var: var.to_string(),
            value: raw.to_string(),
        }),
    }
}
