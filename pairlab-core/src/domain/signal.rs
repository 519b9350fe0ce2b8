//! Signal table — per-date trading state for one candidate pair.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated row of the signal table.
///
/// `signal_a` takes values in {-1, 0, +1}; `signal_b` is the opposite leg
/// scaled by the hedge ratio, so it is fractional in the spread variant.
/// `delta_*` is the first difference of the signal column; the first row's
/// deltas are NaN (no prior state) and never trigger a trade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SignalRow {
    pub date: NaiveDate,
    pub price_a: f64,
    pub price_b: f64,
    pub z_score: f64,
    pub z_low: f64,
    pub z_up: f64,
    pub signal_a: f64,
    pub signal_b: f64,
    pub delta_a: f64,
    pub delta_b: f64,
}

/// Date-indexed signal rows plus the hedge ratio that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalTable {
    pub rows: Vec<SignalRow>,
    pub hedge_ratio: f64,
}

impl SignalTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows where either leg changes position.
    pub fn trade_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| {
                (r.delta_a.is_finite() && r.delta_a != 0.0)
                    || (r.delta_b.is_finite() && r.delta_b != 0.0)
            })
            .count()
    }
}
