//! Configuration system for MCLP Forge.
//!
//! Load solver configuration from TOML or YAML files to control the time
//! limit, the integrality tolerance and the formulation variant without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use mclp_config::SolverConfig;
//! use mclp_core::{BudgetMode, ObjectiveWeighting};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     integrality_tolerance = 1e-5
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!
//!     [formulation]
//!     objective = "population2030"
//!     budget = "enforce"
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.formulation.objective, ObjectiveWeighting::Population2030);
//! assert_eq!(config.formulation.budget, BudgetMode::Enforce);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use mclp_config::SolverConfig;
//!
//! let config = SolverConfig::load("mclp.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use mclp_core::{FormulationOptions, DEFAULT_INTEGRALITY_TOLERANCE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Wall-clock limit for the MILP backend.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Largest distance from 0 or 1 accepted for a binary value.
    #[serde(default)]
    pub integrality_tolerance: Option<f64>,

    /// Formulation variant.
    #[serde(default)]
    pub formulation: FormulationOptions,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, TOML unless the extension says YAML.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, fails to parse, or is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if let Some(tolerance) = self.integrality_tolerance {
            if !(tolerance > 0.0 && tolerance < 0.5) {
                return Err(ConfigError::Invalid(format!(
                    "integrality_tolerance must lie in (0, 0.5), got {tolerance}"
                )));
            }
        }
        Ok(self)
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the integrality tolerance.
    pub fn with_integrality_tolerance(mut self, tolerance: f64) -> Self {
        self.integrality_tolerance = Some(tolerance);
        self
    }

    /// Sets the formulation variant.
    pub fn with_formulation(mut self, formulation: FormulationOptions) -> Self {
        self.formulation = formulation;
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the configured tolerance or [`DEFAULT_INTEGRALITY_TOLERANCE`].
    pub fn tolerance(&self) -> f64 {
        self.integrality_tolerance
            .unwrap_or(DEFAULT_INTEGRALITY_TOLERANCE)
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the seconds limit.
    pub millis_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self.seconds_spent_limit.unwrap_or(0) * 1000
            + self.millis_spent_limit.unwrap_or(0);
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}
