//! Backtest runner — wires together screening, signal generation,
//! simulation, and metrics.
//!
//! Two entry points:
//! - `run_backtest()`: screen a universe, evaluate every candidate pair,
//!   and pick the best one. Used for the in-sample phase.
//! - `run_pair()`: evaluate one named pair. Used for the out-of-sample
//!   phase after selection.

use pairlab_core::domain::{PriceTable, TableError};
use pairlab_core::render::Renderer;
use pairlab_core::stats::StatError;
use pairlab_core::{estimate_spread, generate_signals, screen, simulate, PairError, ScreenResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{BacktestConfig, ConfigError};
use crate::metrics::{evaluate, MetricsError, PerformanceReport};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("screening error: {0}")]
    Screen(#[from] StatError),

    #[error("table error: {0}")]
    Table(#[from] TableError),

    #[error("pair error: {0}")]
    Pair(#[from] PairError),

    #[error("metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("no pair passed the cointegration screen and simulated cleanly")]
    NoTradablePairs,
}

/// One candidate pair's full in-sample evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairEvaluation {
    pub symbol_a: String,
    pub symbol_b: String,
    /// Screening p-value, absent when the pair was run directly.
    pub p_value: Option<f64>,
    pub hedge_ratio: f64,
    pub trade_count: usize,
    pub report: PerformanceReport,
}

/// Result of a full screen-and-select run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestOutcome {
    pub screen: ScreenResult,
    /// All candidates that simulated cleanly, in screening order.
    pub evaluations: Vec<PairEvaluation>,
    /// The selected pair.
    pub best: PairEvaluation,
    /// Candidates dropped mid-run (degenerate regressions, empty windows).
    pub warnings: Vec<String>,
}

/// Evaluate one named pair over the table's window.
///
/// Direct runs are always for the selected pair, so the price rendering
/// marks the final observation; candidate sweeps inside [`run_backtest`]
/// do not.
pub fn run_pair(
    config: &BacktestConfig,
    table: &PriceTable,
    symbol_a: &str,
    symbol_b: &str,
    renderer: &mut dyn Renderer,
) -> Result<PairEvaluation, RunError> {
    evaluate_pair(config, table, symbol_a, symbol_b, renderer, true)
}

fn evaluate_pair(
    config: &BacktestConfig,
    table: &PriceTable,
    symbol_a: &str,
    symbol_b: &str,
    renderer: &mut dyn Renderer,
    highlight_final: bool,
) -> Result<PairEvaluation, RunError> {
    let (series_a, series_b) = table.pair_observations(symbol_a, symbol_b)?;
    renderer.price_series(&series_a, &series_b, symbol_a, symbol_b, highlight_final);

    let spread = estimate_spread(&series_a, &series_b)?;
    renderer.spread(&spread);

    let signals = generate_signals(config.strategy, &series_a, &series_b, &spread)?;
    renderer.z_score(&signals);
    renderer.signals(&signals);

    let portfolio = simulate(&signals, config.capital);
    let report = evaluate(&portfolio, config.capital, config.risk_free_rate)?;

    Ok(PairEvaluation {
        symbol_a: symbol_a.to_string(),
        symbol_b: symbol_b.to_string(),
        p_value: None,
        hedge_ratio: spread.hedge_ratio,
        trade_count: signals.trade_count(),
        report,
    })
}

/// Screen the universe, evaluate every candidate, and select the best pair.
///
/// A candidate that fails mid-evaluation is recorded as a warning and
/// skipped; only an empty candidate list (or every candidate failing) is
/// fatal.
pub fn run_backtest(
    config: &BacktestConfig,
    table: &PriceTable,
    renderer: &mut dyn Renderer,
) -> Result<BacktestOutcome, RunError> {
    config.validate()?;

    let screen_result = screen(table, config.pvalue_threshold)?;
    renderer.cointegration_heatmap(&screen_result);

    if screen_result.pairs.is_empty() {
        return Err(RunError::NoTradablePairs);
    }

    let mut warnings = screen_result.warnings.clone();
    let mut evaluations = Vec::new();
    for (symbol_a, symbol_b) in &screen_result.pairs {
        match evaluate_pair(config, table, symbol_a, symbol_b, renderer, false) {
            Ok(mut evaluation) => {
                evaluation.p_value = screen_result.p_value(symbol_a, symbol_b);
                evaluations.push(evaluation);
            }
            Err(e) => warnings.push(format!("{symbol_a}/{symbol_b}: {e}")),
        }
    }

    let best = select_best(&evaluations)
        .ok_or(RunError::NoTradablePairs)?
        .clone();

    Ok(BacktestOutcome {
        screen: screen_result,
        evaluations,
        best,
        warnings,
    })
}

/// Pick the best pair from a list of evaluations.
///
/// Primary criterion is the combined two-leg Sharpe (undefined counts as
/// negative infinity). A candidate also displaces the incumbent when the
/// combined Sharpes sit within 0.1 of each other and the candidate's
/// drawdown ratio is at least 0.1 higher. Note the asymmetry: a markedly
/// better drawdown never compensates for a clearly worse Sharpe.
pub fn select_best(evaluations: &[PairEvaluation]) -> Option<&PairEvaluation> {
    let mut iter = evaluations.iter();
    let mut best = iter.next()?;
    let mut best_sharpe = ranking_sharpe(best);

    for candidate in iter {
        let sharpe = ranking_sharpe(candidate);
        let displaces = sharpe > best_sharpe
            || ((sharpe - best_sharpe).abs() < 0.1
                && candidate.report.drawdown_ratio >= best.report.drawdown_ratio + 0.1);
        if displaces {
            best = candidate;
            best_sharpe = sharpe;
        }
    }
    Some(best)
}

fn ranking_sharpe(evaluation: &PairEvaluation) -> f64 {
    evaluation
        .report
        .combined_sharpe()
        .unwrap_or(f64::NEG_INFINITY)
}
