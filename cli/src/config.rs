//! Configuration management for the box-office command line.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Command-line flags are applied on top with [`Config::apply_overrides`].

use cinema_tickets_core::rules::{MAX_TICKETS_PER_PURCHASE, PurchaseRules};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Rejected value
        value: String,
    },

    /// A purchase cap of zero would refuse every purchase
    #[error("MAX_TICKETS_PER_PURCHASE must be at least 1")]
    ZeroTicketCap,
}

/// How results are printed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON document
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "OUTPUT_FORMAT",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log filter directive (trace, debug, info, warn, error)
    pub log_level: String,
    /// Most tickets allowed in one purchase
    pub max_tickets_per_purchase: u32,
    /// Print Prometheus metrics after the purchase
    pub metrics_enabled: bool,
    /// Result format
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            max_tickets_per_purchase: MAX_TICKETS_PER_PURCHASE,
            metrics_enabled: false,
            output_format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// Numeric and boolean variables that fail to parse fall back to their
    /// defaults; the output format must be recognised.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the result does not pass [`validate`](Self::validate).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            max_tickets_per_purchase: lookup("MAX_TICKETS_PER_PURCHASE")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.max_tickets_per_purchase),
            metrics_enabled: lookup("METRICS_ENABLED")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.metrics_enabled),
            output_format: lookup("OUTPUT_FORMAT")
                .map(|s| s.parse())
                .transpose()?
                .unwrap_or(defaults.output_format),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTicketCap`] for a zero ticket cap.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tickets_per_purchase == 0 {
            return Err(ConfigError::ZeroTicketCap);
        }
        Ok(())
    }

    /// Applies command-line flags over the loaded values, then validates
    /// the result.
    ///
    /// `None` and `false` leave the loaded value in place.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the merged configuration is invalid.
    pub fn apply_overrides(
        &mut self,
        output_format: Option<OutputFormat>,
        max_tickets_per_purchase: Option<u32>,
        metrics_enabled: bool,
    ) -> Result<(), ConfigError> {
        if let Some(output_format) = output_format {
            self.output_format = output_format;
        }
        if let Some(max_tickets_per_purchase) = max_tickets_per_purchase {
            self.max_tickets_per_purchase = max_tickets_per_purchase;
        }
        self.metrics_enabled |= metrics_enabled;
        self.validate()
    }

    /// Purchase rules derived from this configuration
    #[must_use]
    pub const fn purchase_rules(&self) -> PurchaseRules {
        PurchaseRules::with_max_tickets(self.max_tickets_per_purchase)
    }
}
