//! Dollar-neutral pair simulation.
//!
//! Capital is split evenly between the legs. Each leg trades a fixed integer
//! share count sized so the worst single trade over the window never exceeds
//! the leg's half of the capital. Exposure is re-derived as the running sum
//! of position deltas, so repeated entries in the same direction stack.

use crate::domain::{PairPortfolio, PortfolioRow, SignalTable};

/// Fixed share count for a leg: `floor(capital / (2 * max price))`.
fn position_size(capital: f64, prices: &[f64]) -> f64 {
    let max_price = prices
        .iter()
        .copied()
        .filter(|p| p.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !max_price.is_finite() || max_price <= 0.0 {
        return 0.0;
    }
    (capital / (2.0 * max_price)).floor()
}

/// Running sum that reproduces tabular-library semantics: a NaN entry yields
/// NaN at its own position but does not poison the rest of the accumulation.
fn cumulative(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut acc = 0.0;
    values
        .map(|v| {
            if v.is_nan() {
                f64::NAN
            } else {
                acc += v;
                acc
            }
        })
        .collect()
}

struct Leg {
    holdings: Vec<f64>,
    cash: Vec<f64>,
    total: Vec<f64>,
    returns: Vec<f64>,
}

fn simulate_leg(prices: &[f64], deltas: &[f64], size: f64, half_capital: f64) -> Leg {
    let exposure = cumulative(deltas.iter().copied());
    let spent = cumulative(
        deltas
            .iter()
            .zip(prices)
            .map(|(&d, &p)| d * p * size),
    );

    let holdings: Vec<f64> = exposure
        .iter()
        .zip(prices)
        .map(|(&e, &p)| e * p * size)
        .collect();
    let cash: Vec<f64> = spent.iter().map(|&s| half_capital - s).collect();
    let total: Vec<f64> = holdings
        .iter()
        .zip(&cash)
        .map(|(&h, &c)| h + c)
        .collect();

    let mut returns = Vec::with_capacity(total.len());
    for (i, &t) in total.iter().enumerate() {
        if i == 0 {
            returns.push(f64::NAN);
        } else {
            let prev = total[i - 1];
            returns.push((t - prev) / prev);
        }
    }

    Leg {
        holdings,
        cash,
        total,
        returns,
    }
}

/// Simulate the strategy over a signal table with the given total capital.
pub fn simulate(signals: &SignalTable, capital: f64) -> PairPortfolio {
    let prices_a: Vec<f64> = signals.rows.iter().map(|r| r.price_a).collect();
    let prices_b: Vec<f64> = signals.rows.iter().map(|r| r.price_b).collect();
    let deltas_a: Vec<f64> = signals.rows.iter().map(|r| r.delta_a).collect();
    let deltas_b: Vec<f64> = signals.rows.iter().map(|r| r.delta_b).collect();

    let size_a = position_size(capital, &prices_a);
    let size_b = position_size(capital, &prices_b);
    let half = capital / 2.0;

    let leg_a = simulate_leg(&prices_a, &deltas_a, size_a, half);
    let leg_b = simulate_leg(&prices_b, &deltas_b, size_b, half);

    let rows: Vec<PortfolioRow> = signals
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| PortfolioRow {
            date: r.date,
            price_a: r.price_a,
            price_b: r.price_b,
            holdings_a: leg_a.holdings[i],
            cash_a: leg_a.cash[i],
            total_a: leg_a.total[i],
            return_a: leg_a.returns[i],
            holdings_b: leg_b.holdings[i],
            cash_b: leg_b.cash[i],
            total_b: leg_b.total[i],
            return_b: leg_b.returns[i],
            total: leg_a.total[i] + leg_b.total[i],
        })
        .collect();

    PairPortfolio {
        rows,
        position_size_a: size_a,
        position_size_b: size_b,
    }
}
