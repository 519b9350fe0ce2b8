//! Spread estimation — fit a hedge ratio and derive the stationary spread.

use crate::domain::PriceSeries;
use crate::stats::{self, StatError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors fatal to a single pair's evaluation. The orchestrator catches
/// these, records a warning, and moves on to the next candidate.
#[derive(Debug, Error)]
pub enum PairError {
    #[error("series date indexes are misaligned")]
    MisalignedSeries,

    #[error("regressor leg has zero variance, hedge ratio is unidentified")]
    DegenerateRegression,

    #[error(transparent)]
    Stat(#[from] StatError),
}

/// The stationary linear combination of two legs.
///
/// Invariant: `series[t] = a[t] - hedge_ratio * b[t]` for every shared date.
/// The regression carries an intercept but, as in the classic construction,
/// the intercept is not subtracted from the spread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spread {
    pub series: PriceSeries,
    pub hedge_ratio: f64,
}

/// Fit `a = α + h·b + e` and return the spread `a - h·b`.
pub fn estimate_spread(a: &PriceSeries, b: &PriceSeries) -> Result<Spread, PairError> {
    if !a.same_index(b) {
        return Err(PairError::MisalignedSeries);
    }
    if stats::sample_variance(b.values()) < 1e-12 {
        return Err(PairError::DegenerateRegression);
    }

    let fit = stats::fit_with_intercept(a.values(), b.values())?;
    let hedge_ratio = fit.slope;

    let series = a
        .zip_with(b, |pa, pb| pa - hedge_ratio * pb)
        .ok_or(PairError::MisalignedSeries)?;

    Ok(Spread {
        series,
        hedge_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(values: Vec<f64>) -> PriceSeries {
        let dates: Vec<NaiveDate> = (0..values.len() as i64)
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i))
            .collect();
        PriceSeries::new(dates, values).unwrap()
    }

    fn noise(i: usize, salt: usize) -> f64 {
        ((i.wrapping_mul(salt)) % 1000) as f64 / 10_000.0 - 0.05
    }

    #[test]
    fn recovers_constructed_hedge_ratio() {
        let b_values: Vec<f64> = (0..300).map(|i| 50.0 + (i as f64 * 0.05).sin() * 5.0 + i as f64 * 0.01).collect();
        let a_values: Vec<f64> = b_values
            .iter()
            .enumerate()
            .map(|(i, v)| 1.7 * v + noise(i, 7919))
            .collect();

        let spread = estimate_spread(&series(a_values), &series(b_values)).unwrap();
        assert!(
            (spread.hedge_ratio - 1.7).abs() < 1e-2,
            "hedge ratio {} should be near 1.7",
            spread.hedge_ratio
        );
    }

    #[test]
    fn spread_identity_holds_per_date() {
        let a = series((0..100).map(|i| 100.0 + (i as f64 * 0.3).cos() * 4.0).collect());
        let b = series((0..100).map(|i| 50.0 + (i as f64 * 0.2).sin() * 3.0).collect());
        let spread = estimate_spread(&a, &b).unwrap();

        for ((sv, &av), &bv) in spread
            .series
            .values()
            .iter()
            .zip(a.values())
            .zip(b.values())
        {
            assert!((sv - (av - spread.hedge_ratio * bv)).abs() < 1e-10);
        }
    }

    #[test]
    fn misaligned_series_fail() {
        let a = series(vec![1.0, 2.0, 3.0, 4.0]);
        let mut b_dates: Vec<NaiveDate> = a.dates().to_vec();
        b_dates[2] = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        // Rebuild b with a shifted index.
        let b = PriceSeries::new(
            vec![b_dates[0], b_dates[1], b_dates[2], b_dates[2] + chrono::Duration::days(1)],
            vec![1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();
        assert!(matches!(
            estimate_spread(&a, &b),
            Err(PairError::MisalignedSeries)
        ));
    }

    #[test]
    fn constant_regressor_is_degenerate() {
        let a = series((0..50).map(|i| i as f64).collect());
        let b = series(vec![42.0; 50]);
        assert!(matches!(
            estimate_spread(&a, &b),
            Err(PairError::DegenerateRegression)
        ));
    }
}
