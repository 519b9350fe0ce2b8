//! Serializable backtest configuration.
//!
//! Loaded from TOML. Every field has a default matching the strategy's
//! published parameters, so an empty config file is a valid run.

use chrono::NaiveDate;
use pairlab_core::StrategyVariant;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("capital must be positive, got {0}")]
    InvalidCapital(f64),

    #[error("p-value threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("risk-free rate must be in [0, 1], got {0}")]
    InvalidRiskFree(f64),

    #[error("window '{name}' must start before it ends ({start} >= {end})")]
    InvalidWindow {
        name: &'static str,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Configuration for a full screen-and-backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// Total capital, split evenly between the legs.
    pub capital: f64,

    /// Cointegration significance threshold for candidate pairs.
    pub pvalue_threshold: f64,

    /// Risk-free rate used by the Sharpe computation, as a fraction.
    pub risk_free_rate: f64,

    /// In-sample window: screening and pair selection.
    pub historical: Window,

    /// Out-of-sample window: the chosen pair re-run on unseen data.
    pub forward: Window,

    /// Reference series and band policy for signal generation.
    pub strategy: StrategyVariant,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            capital: 10_000.0,
            pvalue_threshold: 0.05,
            risk_free_rate: 0.02,
            historical: Window {
                start: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2019, 12, 31).unwrap(),
            },
            forward: Window {
                start: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2021, 8, 13).unwrap(),
            },
            strategy: StrategyVariant::default(),
        }
    }
}

impl BacktestConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the numeric and date-range invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.capital.is_finite() || self.capital <= 0.0 {
            return Err(ConfigError::InvalidCapital(self.capital));
        }
        if !self.pvalue_threshold.is_finite()
            || self.pvalue_threshold <= 0.0
            || self.pvalue_threshold > 1.0
        {
            return Err(ConfigError::InvalidThreshold(self.pvalue_threshold));
        }
        if !self.risk_free_rate.is_finite()
            || !(0.0..=1.0).contains(&self.risk_free_rate)
        {
            return Err(ConfigError::InvalidRiskFree(self.risk_free_rate));
        }
        for (name, window) in [("historical", self.historical), ("forward", self.forward)] {
            if window.start >= window.end {
                return Err(ConfigError::InvalidWindow {
                    name,
                    start: window.start,
                    end: window.end,
                });
            }
        }
        Ok(())
    }
}
