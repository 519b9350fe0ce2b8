//! PairLab Core — pairs-trading research engine.
//!
//! This crate contains the statistical heart of the system:
//! - Domain types (price table, date-indexed series, signal table, pair portfolio)
//! - Data layer (provider trait, Yahoo Finance client, alignment, ticker universe)
//! - Statistics (least squares, ADF unit-root test, Engle-Granger cointegration)
//! - Pairwise cointegration screening over an asset universe
//! - Spread estimation via a fitted hedge ratio
//! - Z-score signal generation with two strategy variants
//! - Dollar-neutral two-leg portfolio simulation
//! - Fire-and-forget rendering boundary

pub mod data;
pub mod domain;
pub mod render;
pub mod screen;
pub mod signals;
pub mod sim;
pub mod spread;
pub mod stats;

pub use screen::{screen, ScreenResult, DEFAULT_PVALUE_THRESHOLD, MIN_PAIR_OVERLAP};
pub use signals::{generate_signals, ReferenceSeries, StrategyVariant, ThresholdBands};
pub use sim::simulate;
pub use spread::{estimate_spread, PairError, Spread};
