//! Performance metrics — pure functions that compute strategy statistics.
//!
//! Every metric is a pure function over the simulated portfolio. The Sharpe
//! here is the cumulative-return flavor: the whole window's compounded
//! return over the volatility scaled by the calendar day span, not the
//! usual annualized daily-mean construction.

use pairlab_core::domain::PairPortfolio;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from metric evaluation.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("portfolio has no fully-defined rows to evaluate")]
    EmptyWindow,
}

/// Aggregate performance of one simulated pair over one window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Annualized growth of the aggregate portfolio, in percent.
    pub annualized_return_pct: f64,
    /// Cumulative-return Sharpe of leg A. `None` when undefined.
    pub sharpe_a: Option<f64>,
    /// Cumulative-return Sharpe of leg B. `None` when undefined.
    pub sharpe_b: Option<f64>,
    /// Peak-to-trough ratio of the aggregate total: max / min.
    pub drawdown_ratio: f64,
    /// Mark-to-market value on the last row, warm-up included.
    pub final_value: f64,
    /// Calendar days between the first and last defined rows.
    pub day_span: i64,
}

impl PerformanceReport {
    /// Sum of the two leg Sharpes, used to rank pairs against each other.
    /// `None` when either leg's Sharpe is undefined.
    pub fn combined_sharpe(&self) -> Option<f64> {
        match (self.sharpe_a, self.sharpe_b) {
            (Some(a), Some(b)) => Some(a + b),
            _ => None,
        }
    }
}

/// Cumulative-return Sharpe ratio of one leg.
///
/// `(cumprod(1 + r) - 1 - risk_free) / (sqrt(day_span) * std(1 + r))`
/// with a population standard deviation in the denominator. Returns `None`
/// when the risk-free rate is outside `[0, 1]` or the ratio is not finite
/// (zero volatility, empty returns).
pub fn cumulative_sharpe(returns: &[f64], day_span: i64, risk_free: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&risk_free) || returns.is_empty() || day_span <= 0 {
        return None;
    }

    let growth: Vec<f64> = returns.iter().map(|r| 1.0 + r).collect();
    let cumulative: f64 = growth.iter().product::<f64>() - 1.0;

    let n = growth.len() as f64;
    let mean = growth.iter().sum::<f64>() / n;
    let variance = growth.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / n;
    let volatility = (day_span as f64).sqrt() * variance.sqrt();

    let sharpe = (cumulative - risk_free) / volatility;
    sharpe.is_finite().then_some(sharpe)
}

/// Annualized return from start capital to final value over a day span.
pub fn annualized_return_pct(final_value: f64, capital: f64, day_span: i64) -> f64 {
    if capital <= 0.0 || final_value <= 0.0 || day_span <= 0 {
        return f64::NAN;
    }
    ((final_value / capital).powf(365.0 / day_span as f64) - 1.0) * 100.0
}

/// Peak-to-trough ratio of the aggregate totals: max / min.
pub fn drawdown_ratio(totals: &[f64]) -> f64 {
    let max = totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = totals.iter().copied().fold(f64::INFINITY, f64::min);
    max / min
}

/// Evaluate a simulated portfolio.
///
/// The final value reads the untrimmed last row; the day span, drawdown,
/// and Sharpe inputs all come from the trimmed portfolio (warm-up rows
/// dropped).
pub fn evaluate(
    portfolio: &PairPortfolio,
    capital: f64,
    risk_free: f64,
) -> Result<PerformanceReport, MetricsError> {
    let final_value = portfolio.final_total().ok_or(MetricsError::EmptyWindow)?;

    let trimmed = portfolio.trimmed();
    if trimmed.len() < 2 {
        return Err(MetricsError::EmptyWindow);
    }
    let first = trimmed.rows.first().expect("trimmed is non-empty");
    let last = trimmed.rows.last().expect("trimmed is non-empty");
    let day_span = (last.date - first.date).num_days();
    if day_span <= 0 {
        return Err(MetricsError::EmptyWindow);
    }

    Ok(PerformanceReport {
        annualized_return_pct: annualized_return_pct(final_value, capital, day_span),
        sharpe_a: cumulative_sharpe(&trimmed.returns_a(), day_span, risk_free),
        sharpe_b: cumulative_sharpe(&trimmed.returns_b(), day_span, risk_free),
        drawdown_ratio: drawdown_ratio(&trimmed.totals()),
        final_value,
        day_span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pairlab_core::domain::PortfolioRow;

    fn row(day: u32, total: f64, return_a: f64, return_b: f64) -> PortfolioRow {
        PortfolioRow {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            price_a: 100.0,
            price_b: 50.0,
            holdings_a: 0.0,
            cash_a: total / 2.0,
            total_a: total / 2.0,
            return_a,
            holdings_b: 0.0,
            cash_b: total / 2.0,
            total_b: total / 2.0,
            return_b,
            total,
        }
    }

    fn portfolio(rows: Vec<PortfolioRow>) -> PairPortfolio {
        PairPortfolio {
            rows,
            position_size_a: 10.0,
            position_size_b: 20.0,
        }
    }

    // ── Cumulative Sharpe ──

    #[test]
    fn sharpe_known_value() {
        // Two days of +1% with a 10 day span and zero risk-free.
        let returns = [0.01, 0.01];
        let s = cumulative_sharpe(&returns, 10, 0.0);
        // cumprod(1.01, 1.01) - 1 = 0.0201, std of [1.01, 1.01] is 0.
        assert!(s.is_none(), "zero volatility must be undefined");

        let returns = [0.02, -0.01];
        let s = cumulative_sharpe(&returns, 10, 0.0).unwrap();
        // cum = 1.02 * 0.99 - 1 = 0.0098; pop std of [1.02, 0.99] = 0.015
        let expected = 0.0098 / (10.0_f64.sqrt() * 0.015);
        assert!((s - expected).abs() < 1e-9, "got {s}, want {expected}");
    }

    #[test]
    fn sharpe_rejects_out_of_range_risk_free() {
        assert!(cumulative_sharpe(&[0.01, -0.02], 10, 1.5).is_none());
        assert!(cumulative_sharpe(&[0.01, -0.02], 10, -0.1).is_none());
    }

    #[test]
    fn sharpe_empty_returns_is_undefined() {
        assert!(cumulative_sharpe(&[], 10, 0.02).is_none());
    }

    #[test]
    fn sharpe_uses_population_std() {
        // With n=2 the sample std would be sqrt(2) times larger.
        let s = cumulative_sharpe(&[0.03, -0.03], 4, 0.0).unwrap();
        let cum = 1.03 * 0.97 - 1.0;
        let pop_std = 0.03;
        assert!((s - cum / (2.0 * pop_std)).abs() < 1e-9);
    }

    // ── Annualized return ──

    #[test]
    fn annualized_return_over_one_year() {
        // Exactly 365 days and +10% growth.
        let r = annualized_return_pct(11_000.0, 10_000.0, 365);
        assert!((r - 10.0).abs() < 1e-9);
    }

    #[test]
    fn annualized_return_compounds_short_windows() {
        // +10% in half a year annualizes above 20%.
        let r = annualized_return_pct(11_000.0, 10_000.0, 182);
        assert!(r > 20.0);
    }

    #[test]
    fn annualized_return_undefined_without_span() {
        assert!(annualized_return_pct(11_000.0, 10_000.0, 0).is_nan());
    }

    // ── Drawdown ratio ──

    #[test]
    fn drawdown_ratio_is_max_over_min() {
        let totals = [10_000.0, 10_500.0, 9_800.0, 10_200.0];
        assert!((drawdown_ratio(&totals) - 10_500.0 / 9_800.0).abs() < 1e-12);
    }

    #[test]
    fn drawdown_ratio_constant_curve_is_one() {
        assert_eq!(drawdown_ratio(&[10_000.0; 5]), 1.0);
    }

    // ── Evaluate ──

    #[test]
    fn evaluate_reads_final_before_trim() {
        let rows = vec![
            row(1, f64::NAN, f64::NAN, f64::NAN),
            row(2, 10_000.0, f64::NAN, f64::NAN),
            row(3, 10_100.0, 0.01, 0.01),
            row(11, 10_300.0, 0.02, 0.0),
            row(21, 9_900.0, -0.02, -0.02),
        ];
        let report = evaluate(&portfolio(rows), 10_000.0, 0.02).unwrap();

        // Final value is the raw last row, even though earlier rows trim away.
        assert_eq!(report.final_value, 9_900.0);
        // Day span covers only the defined rows: Jan 3 to Jan 21.
        assert_eq!(report.day_span, 18);
        assert!((report.drawdown_ratio - 10_300.0 / 9_900.0).abs() < 1e-12);
        assert!(report.sharpe_a.is_some());
    }

    #[test]
    fn evaluate_rejects_all_warmup_portfolio() {
        let rows = vec![
            row(1, f64::NAN, f64::NAN, f64::NAN),
            row(2, 10_000.0, f64::NAN, f64::NAN),
        ];
        assert!(matches!(
            evaluate(&portfolio(rows), 10_000.0, 0.02),
            Err(MetricsError::EmptyWindow)
        ));
    }

    #[test]
    fn combined_sharpe_requires_both_legs() {
        let report = PerformanceReport {
            annualized_return_pct: 1.0,
            sharpe_a: Some(0.5),
            sharpe_b: None,
            drawdown_ratio: 1.1,
            final_value: 10_000.0,
            day_span: 100,
        };
        assert!(report.combined_sharpe().is_none());

        let both = PerformanceReport {
            sharpe_b: Some(0.25),
            ..report
        };
        assert_eq!(both.combined_sharpe(), Some(0.75));
    }
}
