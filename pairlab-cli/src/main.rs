//! PairLab CLI — screen a universe for cointegrated pairs, backtest the
//! candidates in-sample, and re-run the selected pair out-of-sample.
//!
//! Data comes from Yahoo Finance by default; `--historical-csv` and
//! `--forward-csv` switch to offline CSV files with a `date` column plus
//! one close-price column per symbol.

use anyhow::{bail, Context, Result};
use clap::Parser;
use pairlab_core::data::{
    build_price_table, default_universe, load_tickers, read_price_csv, PriceProvider,
    YahooProvider,
};
use pairlab_core::domain::PriceTable;
use pairlab_core::render::{Renderer, TextRenderer};
use pairlab_runner::config::Window;
use pairlab_runner::{
    run_backtest, run_pair, BacktestConfig, BacktestOutcome, PairEvaluation, RunError,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "pairlab",
    about = "PairLab — cointegration screening and pairs-trading backtests"
)]
struct Cli {
    /// Path to a ticker file, one symbol per line. Defaults to the
    /// built-in universe.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Path to a TOML config file. Defaults to the published parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Offline mode: read in-sample prices from this CSV instead of Yahoo.
    #[arg(long, requires = "forward_csv")]
    historical_csv: Option<PathBuf>,

    /// Offline mode: read out-of-sample prices from this CSV.
    #[arg(long, requires = "historical_csv")]
    forward_csv: Option<PathBuf>,

    /// Output directory for result JSON.
    #[arg(long, default_value = "results")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BacktestConfig::from_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => BacktestConfig::default(),
    };

    let tickers = match &cli.file {
        Some(path) => load_tickers(path)?,
        None => default_universe(),
    };
    if tickers.len() < 2 {
        bail!("need at least two symbols, got {}", tickers.len());
    }

    let provider = YahooProvider::new();
    let historical = match &cli.historical_csv {
        Some(path) => read_price_csv(path)?,
        None => fetch_table(&provider, &tickers, config.historical)?,
    };

    let mut renderer = TextRenderer::new(std::io::stdout());
    let Some(outcome) = in_sample_phase(&config, &historical, &mut renderer)? else {
        return Ok(());
    };
    print_outcome(&outcome);

    let best_pair = vec![outcome.best.symbol_a.clone(), outcome.best.symbol_b.clone()];
    let forward_table = match &cli.forward_csv {
        Some(path) => read_price_csv(path)?,
        None => fetch_table(&provider, &best_pair, config.forward)?,
    };

    println!("\nout-of-sample window ({} to {}):", config.forward.start, config.forward.end);
    let forward = run_pair(
        &config,
        &forward_table,
        &outcome.best.symbol_a,
        &outcome.best.symbol_b,
        &mut renderer,
    )?;
    print_evaluation(&forward);

    save_results(&cli.output_dir, &outcome, &forward)?;
    Ok(())
}

/// Run the in-sample screen-and-select phase.
///
/// An empty candidate list is a reportable outcome, not a failure: the run
/// prints "no tradable pair" and exits cleanly with `None`.
fn in_sample_phase(
    config: &BacktestConfig,
    historical: &PriceTable,
    renderer: &mut dyn Renderer,
) -> Result<Option<BacktestOutcome>> {
    match run_backtest(config, historical, renderer) {
        Ok(outcome) => Ok(Some(outcome)),
        Err(RunError::NoTradablePairs) => {
            println!(
                "no tradable pair: nothing screened below p-value threshold {:.2}",
                config.pvalue_threshold
            );
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Fetch every symbol over one window and align onto a shared calendar.
fn fetch_table(
    provider: &dyn PriceProvider,
    symbols: &[String],
    window: Window,
) -> Result<PriceTable> {
    let mut fetched = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        println!("fetching {symbol} ({} to {})...", window.start, window.end);
        let result = provider
            .fetch(symbol, window.start, window.end)
            .with_context(|| format!("fetch {symbol}"))?;
        fetched.push(result);
    }
    Ok(build_price_table(symbols, &fetched)?)
}

fn print_outcome(outcome: &BacktestOutcome) {
    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }

    println!("\ncandidates ({}):", outcome.evaluations.len());
    for evaluation in &outcome.evaluations {
        let sharpe = evaluation
            .report
            .combined_sharpe()
            .map_or("undefined".to_string(), |s| format!("{s:.4}"));
        println!(
            "  {}/{}: p={:.4} combined sharpe={} drawdown ratio={:.4}",
            evaluation.symbol_a,
            evaluation.symbol_b,
            evaluation.p_value.unwrap_or(1.0),
            sharpe,
            evaluation.report.drawdown_ratio,
        );
    }

    println!("\nselected pair (in-sample):");
    print_evaluation(&outcome.best);
}

fn print_evaluation(evaluation: &PairEvaluation) {
    println!("  pair:              {}/{}", evaluation.symbol_a, evaluation.symbol_b);
    println!("  hedge ratio:       {:.4}", evaluation.hedge_ratio);
    println!("  trades:            {}", evaluation.trade_count);
    let report = &evaluation.report;
    println!("  final value:       {:.2}", report.final_value);
    println!("  annualized return: {:.2}%", report.annualized_return_pct);
    match (report.sharpe_a, report.sharpe_b) {
        (Some(a), Some(b)) => {
            println!("  sharpe (a, b):     {a:.4}, {b:.4}");
        }
        _ => println!("  sharpe (a, b):     undefined"),
    }
    println!("  drawdown ratio:    {:.4}", report.drawdown_ratio);
    println!("  day span:          {}", report.day_span);
}

fn save_results(
    output_dir: &Path,
    outcome: &BacktestOutcome,
    forward: &PairEvaluation,
) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;

    let backtest_path = output_dir.join("backtest.json");
    std::fs::write(&backtest_path, serde_json::to_string_pretty(outcome)?)?;

    let forward_path = output_dir.join("forward.json");
    std::fs::write(&forward_path, serde_json::to_string_pretty(forward)?)?;

    println!(
        "\nresults saved to {} and {}",
        backtest_path.display(),
        forward_path.display()
    );
    Ok(())
}
