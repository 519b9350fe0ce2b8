//! Statistical primitives shared by the screening and signal layers.

use thiserror::Error;

pub mod adf;
pub mod coint;
pub mod ols;

pub use adf::adf_t_statistic;
pub use coint::{engle_granger, CointOutcome};
pub use ols::{fit_with_intercept, OlsFit};

/// Errors from statistical routines.
#[derive(Debug, Error)]
pub enum StatError {
    #[error("insufficient data: {have} observations, need at least {need}")]
    InsufficientData { have: usize, need: usize },

    #[error("regressor matrix is singular")]
    Singular,

    #[error("regressor series has zero variance")]
    ZeroVariance,
}

/// Arithmetic mean. Zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1), matching a tabular library's default.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

/// Population standard deviation (ddof = 0).
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Sample variance (ddof = 1).
pub fn sample_variance(values: &[f64]) -> f64 {
    let s = sample_std(values);
    s * s
}
