//! Z-score signal generation.
//!
//! The reference series (spread or raw price ratio) is standardized over the
//! full sample — this is a whole-window backtest, not an online filter. Two
//! band policies are supported: bands derived from the z-score's own sample
//! moments, and fixed ±1 bands.

use crate::domain::{PriceSeries, SignalRow, SignalTable};
use crate::spread::{PairError, Spread};
use crate::stats;
use serde::{Deserialize, Serialize};

/// Which series the z-score is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceSeries {
    /// The regression spread `a - h·b`. Leg B is scaled by the hedge ratio.
    Spread,
    /// The raw price ratio `a / b`. Leg B simply mirrors leg A.
    PriceRatio,
}

/// How the entry thresholds are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdBands {
    /// `z_low/z_up = mean(z) ∓ std(z)` — lands near ±1 but keeps the small
    /// residual drift real data leaves in the standardized series.
    Sample,
    /// Hard ±1 thresholds.
    Fixed,
}

/// A named strategy variant: reference series + band policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyVariant {
    pub reference: ReferenceSeries,
    pub bands: ThresholdBands,
}

impl Default for StrategyVariant {
    fn default() -> Self {
        Self {
            reference: ReferenceSeries::Spread,
            bands: ThresholdBands::Sample,
        }
    }
}

/// Standardize a series to mean 0, standard deviation 1 (sample std).
pub fn z_score(values: &[f64]) -> Vec<f64> {
    let m = stats::mean(values);
    let s = stats::sample_std(values);
    if s < 1e-300 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - m) / s).collect()
}

/// Generate the signal table for one pair.
///
/// Short the spread when the z-score sits above the upper band, long when
/// below the lower band, flat in between. Leg B always takes the opposite
/// side of leg A, scaled by the hedge ratio in the spread variant.
pub fn generate_signals(
    variant: StrategyVariant,
    prices_a: &PriceSeries,
    prices_b: &PriceSeries,
    spread: &Spread,
) -> Result<SignalTable, PairError> {
    if !prices_a.same_index(prices_b) || !prices_a.same_index(&spread.series) {
        return Err(PairError::MisalignedSeries);
    }

    let reference: Vec<f64> = match variant.reference {
        ReferenceSeries::Spread => spread.series.values().to_vec(),
        ReferenceSeries::PriceRatio => prices_a
            .values()
            .iter()
            .zip(prices_b.values())
            .map(|(&a, &b)| a / b)
            .collect(),
    };

    let z = z_score(&reference);
    let (z_low, z_up) = match variant.bands {
        ThresholdBands::Sample => {
            let m = stats::mean(&z);
            let s = stats::sample_std(&z);
            (m - s, m + s)
        }
        ThresholdBands::Fixed => (-1.0, 1.0),
    };

    let leg_b_scale = match variant.reference {
        ReferenceSeries::Spread => spread.hedge_ratio,
        ReferenceSeries::PriceRatio => 1.0,
    };

    let mut rows = Vec::with_capacity(z.len());
    let mut prev: Option<(f64, f64)> = None;
    for (i, &zv) in z.iter().enumerate() {
        let signal_a = if zv > z_up {
            -1.0
        } else if zv < z_low {
            1.0
        } else {
            0.0
        };
        let signal_b = -leg_b_scale * signal_a;

        let (delta_a, delta_b) = match prev {
            Some((pa, pb)) => (signal_a - pa, signal_b - pb),
            None => (f64::NAN, f64::NAN),
        };
        prev = Some((signal_a, signal_b));

        rows.push(SignalRow {
            date: prices_a.dates()[i],
            price_a: prices_a.values()[i],
            price_b: prices_b.values()[i],
            z_score: zv,
            z_low,
            z_up,
            signal_a,
            signal_b,
            delta_a,
            delta_b,
        });
    }

    Ok(SignalTable {
        rows,
        hedge_ratio: spread.hedge_ratio,
    })
}
