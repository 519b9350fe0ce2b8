//! Daily close-price table for a symbol universe.
//!
//! One column per symbol on a common date axis. Missing observations are NaN
//! (a symbol listed mid-range simply has NaN rows before its first trade).
//! The table is immutable after construction and shared read-only by the
//! screening and backtest layers.

use super::series::PriceSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from table construction and column access.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),

    #[error("column '{symbol}' has {have} rows, expected {expected}")]
    ColumnLength {
        symbol: String,
        have: usize,
        expected: usize,
    },

    #[error("dates must be strictly increasing")]
    UnsortedDates,

    #[error("column '{symbol}' has no finite observations in the requested range")]
    EmptyColumn { symbol: String },

    #[error("table has no rows")]
    Empty,
}

/// Ordered-by-date close prices, one column per symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    /// Symbol ordering as requested; drives the p-value matrix layout.
    symbols: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
}

impl PriceTable {
    /// Build a table from per-symbol columns over a shared date axis.
    ///
    /// Every column must match the date axis length and carry at least one
    /// finite observation; dates must be strictly increasing.
    pub fn from_columns(
        dates: Vec<NaiveDate>,
        symbols: Vec<String>,
        columns: HashMap<String, Vec<f64>>,
    ) -> Result<Self, TableError> {
        if dates.is_empty() {
            return Err(TableError::Empty);
        }
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TableError::UnsortedDates);
        }
        for symbol in &symbols {
            let column = columns
                .get(symbol)
                .ok_or_else(|| TableError::UnknownSymbol(symbol.clone()))?;
            if column.len() != dates.len() {
                return Err(TableError::ColumnLength {
                    symbol: symbol.clone(),
                    have: column.len(),
                    expected: dates.len(),
                });
            }
            if !column.iter().any(|v| v.is_finite()) {
                return Err(TableError::EmptyColumn {
                    symbol: symbol.clone(),
                });
            }
        }
        Ok(Self {
            dates,
            symbols,
            columns,
        })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn n_rows(&self) -> usize {
        self.dates.len()
    }

    /// Raw column, NaN rows included.
    pub fn column(&self, symbol: &str) -> Result<&[f64], TableError> {
        self.columns
            .get(symbol)
            .map(|c| c.as_slice())
            .ok_or_else(|| TableError::UnknownSymbol(symbol.to_string()))
    }

    /// Column as a `PriceSeries` with NaN rows dropped.
    pub fn series(&self, symbol: &str) -> Result<PriceSeries, TableError> {
        let column = self.column(symbol)?;
        let mut dates = Vec::new();
        let mut values = Vec::new();
        for (date, &v) in self.dates.iter().zip(column) {
            if v.is_finite() {
                dates.push(*date);
                values.push(v);
            }
        }
        PriceSeries::new(dates, values).ok_or(TableError::Empty)
    }

    /// The two columns restricted to dates where both are finite.
    ///
    /// This is the row-wise drop the statistical tests require: both legs on
    /// an identical date index, no missing values.
    pub fn pair_observations(
        &self,
        symbol_a: &str,
        symbol_b: &str,
    ) -> Result<(PriceSeries, PriceSeries), TableError> {
        let col_a = self.column(symbol_a)?;
        let col_b = self.column(symbol_b)?;

        let mut dates = Vec::new();
        let mut values_a = Vec::new();
        let mut values_b = Vec::new();
        for ((date, &a), &b) in self.dates.iter().zip(col_a).zip(col_b) {
            if a.is_finite() && b.is_finite() {
                dates.push(*date);
                values_a.push(a);
                values_b.push(b);
            }
        }

        let series_a = PriceSeries::new(dates.clone(), values_a).ok_or(TableError::Empty)?;
        let series_b = PriceSeries::new(dates, values_b).ok_or(TableError::Empty)?;
        Ok((series_a, series_b))
    }
}
