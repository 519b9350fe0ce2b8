//! Simulated pair portfolio — per-leg holdings, cash, and totals by date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated row of the simulated portfolio.
///
/// Invariant (both legs): `total = holdings + cash`. The rows produced from
/// the first signal row carry NaN (no prior position state), mirroring the
/// warm-up rows a differencing step always produces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PortfolioRow {
    pub date: NaiveDate,
    pub price_a: f64,
    pub price_b: f64,
    pub holdings_a: f64,
    pub cash_a: f64,
    pub total_a: f64,
    pub return_a: f64,
    pub holdings_b: f64,
    pub cash_b: f64,
    pub total_b: f64,
    pub return_b: f64,
    /// Aggregate: `total_a + total_b`.
    pub total: f64,
}

impl PortfolioRow {
    /// True when any accounting column is NaN (warm-up row).
    pub fn has_undefined(&self) -> bool {
        !(self.total_a.is_finite()
            && self.total_b.is_finite()
            && self.return_a.is_finite()
            && self.return_b.is_finite()
            && self.total.is_finite())
    }
}

/// Full simulation output for one pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairPortfolio {
    pub rows: Vec<PortfolioRow>,
    /// Fixed share count per trade, leg A.
    pub position_size_a: f64,
    /// Fixed share count per trade, leg B.
    pub position_size_b: f64,
}

impl PairPortfolio {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Aggregate total of the last row, warm-up included.
    ///
    /// Captured before trimming: the final mark-to-market value does not
    /// depend on whether the earliest rows are defined.
    pub fn final_total(&self) -> Option<f64> {
        self.rows.last().map(|r| r.total)
    }

    /// Portfolio restricted to rows where every column is defined.
    pub fn trimmed(&self) -> PairPortfolio {
        PairPortfolio {
            rows: self
                .rows
                .iter()
                .filter(|r| !r.has_undefined())
                .copied()
                .collect(),
            position_size_a: self.position_size_a,
            position_size_b: self.position_size_b,
        }
    }

    pub fn totals(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.total).collect()
    }

    pub fn returns_a(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.return_a).collect()
    }

    pub fn returns_b(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.return_b).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: u32, total_a: f64, return_a: f64) -> PortfolioRow {
        PortfolioRow {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            price_a: 100.0,
            price_b: 50.0,
            holdings_a: 0.0,
            cash_a: total_a,
            total_a,
            return_a,
            holdings_b: 0.0,
            cash_b: 100.0,
            total_b: 100.0,
            return_b: 0.0,
            total: total_a + 100.0,
        }
    }

    #[test]
    fn trimmed_drops_warmup_rows() {
        let p = PairPortfolio {
            rows: vec![
                row(1, f64::NAN, f64::NAN),
                row(2, 100.0, f64::NAN),
                row(3, 101.0, 0.01),
            ],
            position_size_a: 1.0,
            position_size_b: 1.0,
        };
        assert_eq!(p.trimmed().len(), 1);
        // Final value still reads the untrimmed last row.
        assert_eq!(p.final_total(), Some(201.0));
    }
}
