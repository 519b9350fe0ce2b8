//! Ordinary least squares with an intercept column.
//!
//! Solved via SVD rather than the raw normal equations so a badly scaled
//! regressor does not blow up the slope estimate.

use super::{sample_variance, StatError};
use nalgebra::{DMatrix, DVector};

/// Result of regressing `y` on `[1, x]`.
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub intercept: f64,
    pub slope: f64,
    pub residuals: Vec<f64>,
}

/// Fit `y = intercept + slope * x + e` by least squares.
///
/// Fails with `ZeroVariance` when `x` is constant (the slope would be
/// unidentified) and with `InsufficientData` below three observations.
pub fn fit_with_intercept(y: &[f64], x: &[f64]) -> Result<OlsFit, StatError> {
    let n = y.len();
    if n != x.len() || n < 3 {
        return Err(StatError::InsufficientData {
            have: n.min(x.len()),
            need: 3,
        });
    }
    if sample_variance(x) < 1e-12 {
        return Err(StatError::ZeroVariance);
    }

    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { x[i] });
    let target = DVector::from_column_slice(y);

    let svd = design.clone().svd(true, true);
    let beta = svd
        .solve(&target, 1e-12)
        .map_err(|_| StatError::Singular)?;

    let fitted = design * &beta;
    let residuals: Vec<f64> = target
        .iter()
        .zip(fitted.iter())
        .map(|(obs, fit)| obs - fit)
        .collect();

    Ok(OlsFit {
        intercept: beta[0],
        slope: beta[1],
        residuals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_known_line() {
        let x: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 3.0 + 2.0 * v).collect();
        let fit = fit_with_intercept(&y, &x).unwrap();
        assert!((fit.intercept - 3.0).abs() < 1e-8);
        assert!((fit.slope - 2.0).abs() < 1e-8);
        assert!(fit.residuals.iter().all(|r| r.abs() < 1e-8));
    }

    #[test]
    fn recovers_slope_with_noise() {
        // Deterministic small noise around y = 1 + 0.5x
        let x: Vec<f64> = (0..500).map(|i| 100.0 + i as f64 * 0.1).collect();
        let y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, v)| 1.0 + 0.5 * v + ((i * 7919) % 100) as f64 / 10_000.0 - 0.005)
            .collect();
        let fit = fit_with_intercept(&y, &x).unwrap();
        assert!((fit.slope - 0.5).abs() < 1e-2);
    }

    #[test]
    fn residuals_sum_to_zero_with_intercept() {
        let x: Vec<f64> = (0..50).map(|i| (i as f64).sin() + i as f64 * 0.2).collect();
        let y: Vec<f64> = x.iter().map(|v| 4.0 - 1.5 * v + (v * 3.0).cos()).collect();
        let fit = fit_with_intercept(&y, &x).unwrap();
        let sum: f64 = fit.residuals.iter().sum();
        assert!(sum.abs() < 1e-6, "residual sum should vanish, got {sum}");
    }

    #[test]
    fn constant_regressor_fails() {
        let x = vec![2.0; 30];
        let y: Vec<f64> = (0..30).map(|i| i as f64).collect();
        assert!(matches!(
            fit_with_intercept(&y, &x),
            Err(StatError::ZeroVariance)
        ));
    }

    #[test]
    fn too_few_observations_fails() {
        assert!(matches!(
            fit_with_intercept(&[1.0, 2.0], &[1.0, 2.0]),
            Err(StatError::InsufficientData { .. })
        ));
    }
}
