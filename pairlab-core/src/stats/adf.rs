//! Augmented Dickey-Fuller unit-root test.
//!
//! The variant here carries no deterministic terms because it is applied to
//! cointegrating-regression residuals, which are already mean-zero by
//! construction. H0: unit root (non-stationary); a more negative t-statistic
//! is stronger evidence of stationarity.

use super::StatError;
use nalgebra::{DMatrix, DVector};

/// Minimum observations for a meaningful ADF regression.
pub const MIN_ADF_OBSERVATIONS: usize = 20;

/// Outcome of the ADF regression on a series.
#[derive(Debug, Clone, Copy)]
pub struct AdfStat {
    /// t-statistic of the lagged-level coefficient.
    pub t_stat: f64,
    /// Number of augmenting difference lags used.
    pub lags: usize,
    /// Effective observations entering the regression.
    pub n_obs: usize,
}

/// t-statistic of the ADF regression
/// `Δe[t] = φ·e[t-1] + Σ γ_i·Δe[t-i] + ε[t]` (no constant, no trend).
pub fn adf_t_statistic(series: &[f64]) -> Result<AdfStat, StatError> {
    let n = series.len();
    if n < MIN_ADF_OBSERVATIONS {
        return Err(StatError::InsufficientData {
            have: n,
            need: MIN_ADF_OBSERVATIONS,
        });
    }

    // diff[k] = e[k+1] - e[k]
    let diff: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();

    // Cube-root lag rule, kept small enough to preserve degrees of freedom.
    let lags = ((n as f64).cbrt().floor() as usize).clamp(1, n / 8);

    let n_obs = diff.len() - lags;
    let n_regressors = 1 + lags;
    if n_obs < n_regressors + 3 {
        return Err(StatError::InsufficientData {
            have: n_obs,
            need: n_regressors + 3,
        });
    }

    // Regressors per row k (k = lags..diff.len()):
    // [e[k], Δe[k-1], ..., Δe[k-lags]]
    let mut x_data = Vec::with_capacity(n_obs * n_regressors);
    let mut y_data = Vec::with_capacity(n_obs);
    for k in lags..diff.len() {
        y_data.push(diff[k]);
        x_data.push(series[k]);
        for i in 1..=lags {
            x_data.push(diff[k - i]);
        }
    }

    let x = DMatrix::from_row_slice(n_obs, n_regressors, &x_data);
    let y = DVector::from_vec(y_data);

    let xtx = x.transpose() * &x;
    let xty = x.transpose() * &y;
    let xtx_inv = xtx.try_inverse().ok_or(StatError::Singular)?;
    let beta = &xtx_inv * xty;

    let fitted = &x * &beta;
    let sse: f64 = y
        .iter()
        .zip(fitted.iter())
        .map(|(obs, fit)| (obs - fit).powi(2))
        .sum();
    let mse = sse / (n_obs - n_regressors) as f64;
    let se = (mse * xtx_inv[(0, 0)]).sqrt();
    if se < 1e-300 {
        return Err(StatError::Singular);
    }

    Ok(AdfStat {
        t_stat: beta[0] / se,
        lags,
        n_obs,
    })
}
