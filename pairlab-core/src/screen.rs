//! Pairwise cointegration screening over the asset universe.
//!
//! Every ordered pair is tested independently — (i, j) and (j, i) run
//! through different cointegrating regressions and may both qualify. The
//! full matrix is computed even though only threshold-passing entries feed
//! the backtest; the heatmap rendering wants all of it.

use crate::domain::PriceTable;
use crate::stats::{engle_granger, StatError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Significance threshold below which a pair becomes a candidate.
pub const DEFAULT_PVALUE_THRESHOLD: f64 = 0.05;

/// Minimum overlapping observations for one pair's test.
pub const MIN_PAIR_OVERLAP: usize = 20;

/// Output of one screening pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenResult {
    /// Symbol ordering shared by the matrix axes.
    pub symbols: Vec<String>,
    /// `pvalue_matrix[i][j]` is the p-value of symbol i tested against
    /// symbol j. Diagonal and skipped cells stay at 1.0.
    pub pvalue_matrix: Vec<Vec<f64>>,
    /// Ordered candidate pairs with p-value below the threshold, in
    /// row-major matrix order. Both directions may appear.
    pub pairs: Vec<(String, String)>,
    /// Per-pair skip reasons (insufficient overlap, degenerate columns).
    pub warnings: Vec<String>,
}

impl ScreenResult {
    /// p-value recorded for an ordered pair, if both symbols are known.
    pub fn p_value(&self, symbol_a: &str, symbol_b: &str) -> Option<f64> {
        let i = self.symbols.iter().position(|s| s == symbol_a)?;
        let j = self.symbols.iter().position(|s| s == symbol_b)?;
        Some(self.pvalue_matrix[i][j])
    }
}

/// Screen all ordered pairs of the table for cointegration.
///
/// Pairs that cannot be tested (fewer than `MIN_PAIR_OVERLAP` overlapping
/// rows after the row-wise missing-value drop, or a degenerate regression)
/// are skipped with a warning; their matrix cells stay at 1.0. Only a
/// universe of fewer than two symbols fails the whole call.
pub fn screen(table: &PriceTable, threshold: f64) -> Result<ScreenResult, StatError> {
    let symbols = table.symbols().to_vec();
    let n = symbols.len();
    if n < 2 {
        return Err(StatError::InsufficientData { have: n, need: 2 });
    }

    let index_pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .filter(|&(i, j)| i != j)
        .collect();

    // Each cell is independent; the pass is embarrassingly parallel.
    let cells: Vec<(usize, usize, Result<f64, String>)> = index_pairs
        .par_iter()
        .map(|&(i, j)| {
            let outcome = test_pair(table, &symbols[i], &symbols[j]);
            (i, j, outcome)
        })
        .collect();

    let mut pvalue_matrix = vec![vec![1.0; n]; n];
    let mut warnings = Vec::new();
    for (i, j, outcome) in cells {
        match outcome {
            Ok(p) => pvalue_matrix[i][j] = p,
            Err(reason) => warnings.push(reason),
        }
    }

    let mut pairs = Vec::new();
    for i in 0..n {
        for j in 0..n {
            if i != j && pvalue_matrix[i][j] < threshold {
                pairs.push((symbols[i].clone(), symbols[j].clone()));
            }
        }
    }

    Ok(ScreenResult {
        symbols,
        pvalue_matrix,
        pairs,
        warnings,
    })
}

fn test_pair(table: &PriceTable, symbol_a: &str, symbol_b: &str) -> Result<f64, String> {
    let (series_a, series_b) = table
        .pair_observations(symbol_a, symbol_b)
        .map_err(|e| format!("{symbol_a}/{symbol_b}: {e}"))?;

    if series_a.len() < MIN_PAIR_OVERLAP {
        return Err(format!(
            "{symbol_a}/{symbol_b}: skipped, {} overlapping observations (need {MIN_PAIR_OVERLAP})",
            series_a.len()
        ));
    }

    engle_granger(series_a.values(), series_b.values())
        .map(|out| out.p_value)
        .map_err(|e| format!("{symbol_a}/{symbol_b}: skipped, {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    /// Deterministic xorshift noise in [-0.1, 0.1).
    fn noise_series(len: usize, seed: u64) -> Vec<f64> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state >> 11) as f64 / (1u64 << 53) as f64 * 0.2 - 0.1
            })
            .collect()
    }

    fn random_walk(len: usize, seed: u64, drift: f64) -> Vec<f64> {
        let steps = noise_series(len, seed);
        let mut w = vec![100.0];
        for i in 1..len {
            w.push(w[i - 1] + drift + steps[i]);
        }
        w
    }

    fn table_from(columns: Vec<(&str, Vec<f64>)>) -> PriceTable {
        let len = columns[0].1.len();
        let dates: Vec<NaiveDate> = (0..len as i64)
            .map(|i| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(i))
            .collect();
        let symbols: Vec<String> = columns.iter().map(|(s, _)| s.to_string()).collect();
        let map: HashMap<String, Vec<f64>> = columns
            .into_iter()
            .map(|(s, v)| (s.to_string(), v))
            .collect();
        PriceTable::from_columns(dates, symbols, map).unwrap()
    }

    fn three_symbol_table() -> PriceTable {
        let base = random_walk(400, 7919, 0.0);
        let wobble = noise_series(400, 1237);
        let partner: Vec<f64> = base
            .iter()
            .enumerate()
            .map(|(i, v)| v + wobble[i])
            .collect();
        // The stranger drifts while the pair does not, so no combination
        // with either leg is stationary.
        let stranger = random_walk(400, 104_729, 0.05);
        table_from(vec![("AAA", base), ("BBB", partner), ("CCC", stranger)])
    }

    #[test]
    fn matrix_shape_and_bounds() {
        let result = screen(&three_symbol_table(), DEFAULT_PVALUE_THRESHOLD).unwrap();
        assert_eq!(result.pvalue_matrix.len(), 3);
        for (i, row) in result.pvalue_matrix.iter().enumerate() {
            assert_eq!(row.len(), 3);
            assert_eq!(row[i], 1.0, "diagonal must stay untested");
            for (j, &p) in row.iter().enumerate() {
                if i != j {
                    assert!((0.0..=1.0).contains(&p), "p[{i}][{j}] = {p}");
                }
            }
        }
    }

    #[test]
    fn cointegrated_pair_is_a_candidate_in_both_directions() {
        let result = screen(&three_symbol_table(), DEFAULT_PVALUE_THRESHOLD).unwrap();
        assert!(result
            .pairs
            .contains(&("AAA".to_string(), "BBB".to_string())));
        assert!(result
            .pairs
            .contains(&("BBB".to_string(), "AAA".to_string())));
    }

    #[test]
    fn candidates_are_not_deduplicated_by_symbol_set() {
        let result = screen(&three_symbol_table(), DEFAULT_PVALUE_THRESHOLD).unwrap();
        let ab = result
            .pairs
            .iter()
            .filter(|(a, b)| (a == "AAA" && b == "BBB") || (a == "BBB" && b == "AAA"))
            .count();
        assert_eq!(ab, 2);
    }

    #[test]
    fn single_symbol_universe_fails() {
        let t = table_from(vec![("AAA", random_walk(100, 7919, 0.0))]);
        assert!(matches!(
            screen(&t, DEFAULT_PVALUE_THRESHOLD),
            Err(StatError::InsufficientData { .. })
        ));
    }

    #[test]
    fn sparse_pair_is_skipped_not_fatal() {
        let base = random_walk(400, 7919, 0.0);
        let wobble = noise_series(400, 1237);
        let partner: Vec<f64> = base
            .iter()
            .enumerate()
            .map(|(i, v)| v + wobble[i])
            .collect();
        // Third column only has 10 finite rows — below the overlap floor.
        let mut sparse = vec![f64::NAN; 400];
        for (i, value) in sparse.iter_mut().enumerate().take(10) {
            *value = 50.0 + i as f64;
        }
        let t = table_from(vec![("AAA", base), ("BBB", partner), ("SPR", sparse)]);

        let result = screen(&t, DEFAULT_PVALUE_THRESHOLD).unwrap();
        assert!(!result.warnings.is_empty());
        // Skipped cells stay at 1.0 and never qualify.
        assert!(!result.pairs.iter().any(|(a, b)| a == "SPR" || b == "SPR"));
        // The good pair still screens.
        assert!(result
            .pairs
            .contains(&("AAA".to_string(), "BBB".to_string())));
    }

    #[test]
    fn p_value_lookup_matches_matrix() {
        let result = screen(&three_symbol_table(), DEFAULT_PVALUE_THRESHOLD).unwrap();
        let p = result.p_value("AAA", "BBB").unwrap();
        assert_eq!(p, result.pvalue_matrix[0][1]);
        assert!(result.p_value("AAA", "ZZZ").is_none());
    }
}
