//! CSV price import.
//!
//! Offline fallback for when Yahoo is unreachable. Expects a wide layout:
//! a `date` column (YYYY-MM-DD) followed by one close-price column per
//! symbol. Empty cells become NaN.

use super::provider::DataError;
use crate::domain::PriceTable;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

/// Read a wide CSV of daily closes into a [`PriceTable`].
///
/// Column order in the header fixes the table's symbol order.
pub fn read_price_csv(path: &Path) -> Result<PriceTable, DataError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| DataError::CsvError(format!("{}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| DataError::CsvError(e.to_string()))?
        .clone();
    if headers.len() < 2 {
        return Err(DataError::CsvError(
            "expected a date column plus at least one symbol column".into(),
        ));
    }
    let symbols: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut dates = Vec::new();
    let mut columns: HashMap<String, Vec<f64>> =
        symbols.iter().map(|s| (s.clone(), Vec::new())).collect();

    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| DataError::CsvError(e.to_string()))?;
        let date_field = record
            .get(0)
            .ok_or_else(|| DataError::CsvError(format!("row {}: missing date", line + 2)))?;
        let date = NaiveDate::parse_from_str(date_field, "%Y-%m-%d").map_err(|e| {
            DataError::CsvError(format!("row {}: bad date '{date_field}': {e}", line + 2))
        })?;
        dates.push(date);

        for (i, symbol) in symbols.iter().enumerate() {
            let cell = record.get(i + 1).unwrap_or("").trim();
            let value = if cell.is_empty() {
                f64::NAN
            } else {
                cell.parse::<f64>().map_err(|e| {
                    DataError::CsvError(format!("row {}: bad price '{cell}': {e}", line + 2))
                })?
            };
            if let Some(column) = columns.get_mut(symbol) {
                column.push(value);
            }
        }
    }

    PriceTable::from_columns(dates, symbols, columns)
        .map_err(|e| DataError::CsvError(e.to_string()))
}
