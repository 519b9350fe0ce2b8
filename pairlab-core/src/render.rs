//! Rendering seam for research output.
//!
//! The analytics never draw anything themselves; they hand structured data
//! to a [`Renderer`]. Callers that want charts plug in their own backend,
//! the CLI uses [`TextRenderer`], and tests use [`NullRenderer`].

use crate::domain::{PriceSeries, SignalTable};
use crate::screen::ScreenResult;
use crate::spread::Spread;
use std::io::Write;

/// Output hooks invoked at each stage of a pair study.
///
/// All methods are fire-and-forget: a renderer that fails to draw must not
/// abort the run, so nothing here returns a `Result`.
pub trait Renderer {
    /// The full pairwise p-value matrix after screening.
    fn cointegration_heatmap(&mut self, result: &ScreenResult) {
        let _ = result;
    }

    /// Both legs of a pair, optionally marking the final observation.
    fn price_series(
        &mut self,
        a: &PriceSeries,
        b: &PriceSeries,
        label_a: &str,
        label_b: &str,
        highlight_final: bool,
    ) {
        let _ = (a, b, label_a, label_b, highlight_final);
    }

    /// The fitted spread series.
    fn spread(&mut self, spread: &Spread) {
        let _ = spread;
    }

    /// The signal table with entry and exit markers.
    fn signals(&mut self, table: &SignalTable) {
        let _ = table;
    }

    /// The standardized series against its threshold bands.
    fn z_score(&mut self, table: &SignalTable) {
        let _ = table;
    }
}

/// Renderer that discards everything. Used in tests and headless runs.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {}

/// Plain-text renderer writing compact summaries to any sink.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn cointegration_heatmap(&mut self, result: &ScreenResult) {
        let _ = writeln!(self.out, "cointegration p-values:");
        let width = result
            .symbols
            .iter()
            .map(|s| s.len())
            .max()
            .unwrap_or(4)
            .max(6);
        let _ = write!(self.out, "{:width$}", "");
        for s in &result.symbols {
            let _ = write!(self.out, " {s:>width$}");
        }
        let _ = writeln!(self.out);
        for (i, row) in result.pvalue_matrix.iter().enumerate() {
            let _ = write!(self.out, "{:width$}", result.symbols[i]);
            for p in row {
                let _ = write!(self.out, " {p:>width$.4}");
            }
            let _ = writeln!(self.out);
        }
    }

    fn price_series(
        &mut self,
        a: &PriceSeries,
        b: &PriceSeries,
        label_a: &str,
        label_b: &str,
        highlight_final: bool,
    ) {
        let _ = writeln!(
            self.out,
            "{label_a}/{label_b}: {} shared observations",
            a.len()
        );
        if highlight_final {
            if let (Some(fa), Some(fb)) = (a.last_value(), b.last_value()) {
                let _ = writeln!(self.out, "  final close: {label_a}={fa:.2} {label_b}={fb:.2}");
            }
        }
    }

    fn spread(&mut self, spread: &Spread) {
        let values = spread.series.values();
        let first = values.first().copied().unwrap_or(f64::NAN);
        let last = values.last().copied().unwrap_or(f64::NAN);
        let _ = writeln!(
            self.out,
            "spread: hedge ratio {:.4}, first {first:.4}, last {last:.4}",
            spread.hedge_ratio
        );
    }

    fn signals(&mut self, table: &SignalTable) {
        let _ = writeln!(self.out, "signals: {} position changes", table.trade_count());
    }

    fn z_score(&mut self, table: &SignalTable) {
        if let Some(first) = table.rows.first() {
            let _ = writeln!(
                self.out,
                "z-score bands: low {:.4}, up {:.4}",
                first.z_low, first.z_up
            );
        }
    }
}
