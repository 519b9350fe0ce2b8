//! Date-indexed numeric series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A daily close-price (or derived) series aligned on explicit dates.
///
/// Invariant: `dates` strictly increasing, `values.len() == dates.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl PriceSeries {
    /// Build a series, validating the index invariants.
    ///
    /// Panics are reserved for programmer errors; this returns `None` on a
    /// malformed index so callers in the data layer can surface it as data
    /// validation instead.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Option<Self> {
        if dates.len() != values.len() {
            return None;
        }
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return None;
        }
        Some(Self { dates, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// True when both series share exactly the same date index.
    pub fn same_index(&self, other: &PriceSeries) -> bool {
        self.dates == other.dates
    }

    /// Largest value in the series, ignoring non-finite entries.
    pub fn max_value(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }

    /// Combine two index-aligned series element-wise. `None` if misaligned.
    pub fn zip_with(&self, other: &PriceSeries, f: impl Fn(f64, f64) -> f64) -> Option<PriceSeries> {
        if !self.same_index(other) {
            return None;
        }
        Some(PriceSeries {
            dates: self.dates.clone(),
            values: self
                .values
                .iter()
                .zip(other.values.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}
