//! PairLab Runner — backtest orchestration and performance metrics.
//!
//! This crate builds on `pairlab-core` to provide:
//! - TOML-backed run configuration with validated defaults
//! - Screen-and-select orchestration over a price table
//! - Single-pair evaluation for the out-of-sample phase
//! - Cumulative-return Sharpe, annualized return, and drawdown metrics

pub mod config;
pub mod metrics;
pub mod runner;

pub use config::{BacktestConfig, ConfigError, Window};
pub use metrics::{cumulative_sharpe, evaluate, MetricsError, PerformanceReport};
pub use runner::{run_backtest, run_pair, select_best, BacktestOutcome, PairEvaluation, RunError};
