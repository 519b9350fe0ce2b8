//! Engle-Granger two-step cointegration test.
//!
//! Step 1: cointegrating regression `y = α + β·x + e` by least squares.
//! Step 2: ADF test on the residuals. The residual t-statistic is mapped to
//! an approximate p-value against Engle-Granger critical values for the
//! two-variable case (these are harsher than plain ADF critical values
//! because β is itself estimated).

use super::adf::adf_t_statistic;
use super::ols::fit_with_intercept;
use super::StatError;

/// Outcome of an Engle-Granger test of `y` against `x`.
#[derive(Debug, Clone, Copy)]
pub struct CointOutcome {
    /// Approximate p-value of the null "no cointegration".
    pub p_value: f64,
    /// ADF t-statistic of the cointegrating residuals.
    pub t_stat: f64,
    /// Slope of the cointegrating regression.
    pub hedge_ratio: f64,
}

/// Run the Engle-Granger test. Both series must have equal length; the
/// caller is responsible for dropping missing observations beforehand.
pub fn engle_granger(y: &[f64], x: &[f64]) -> Result<CointOutcome, StatError> {
    if y.len() != x.len() {
        return Err(StatError::InsufficientData {
            have: y.len().min(x.len()),
            need: y.len().max(x.len()),
        });
    }

    let fit = fit_with_intercept(y, x)?;
    let adf = adf_t_statistic(&fit.residuals)?;
    let p_value = engle_granger_p_value(adf.t_stat, y.len());

    Ok(CointOutcome {
        p_value,
        t_stat: adf.t_stat,
        hedge_ratio: fit.slope,
    })
}

/// Approximate p-value by interpolation between finite-sample critical
/// values for the two-variable Engle-Granger test with a constant in the
/// cointegrating regression.
fn engle_granger_p_value(t_stat: f64, n: usize) -> f64 {
    let nf = n as f64;
    let cv_1 = -3.90 - 10.2 / nf;
    let cv_5 = -3.34 - 5.8 / nf;
    let cv_10 = -3.04 - 4.5 / nf;

    let p = if t_stat < cv_1 {
        0.01 * (t_stat - cv_1).exp()
    } else if t_stat < cv_5 {
        0.01 + (0.05 - 0.01) * (t_stat - cv_1) / (cv_5 - cv_1)
    } else if t_stat < cv_10 {
        0.05 + (0.10 - 0.05) * (t_stat - cv_5) / (cv_10 - cv_5)
    } else {
        0.10 + 0.90 * (1.0 - (-0.5 * (t_stat - cv_10)).exp())
    };
    p.clamp(0.0, 1.0)
}
