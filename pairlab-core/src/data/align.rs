//! Multi-symbol time alignment.
//!
//! Per-symbol fetch results land on different calendars (listings, halts,
//! exchange holidays). Alignment takes the union of all dates and fills
//! missing observations with strict NaN; nothing is forward-filled.

use super::provider::FetchResult;
use crate::domain::{PriceTable, TableError};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Assemble fetched symbols into one [`PriceTable`] on the union calendar.
///
/// The `symbols` slice fixes the column order of the result (and therefore
/// the p-value matrix layout); every listed symbol must appear in `fetched`.
pub fn build_price_table(
    symbols: &[String],
    fetched: &[FetchResult],
) -> Result<PriceTable, TableError> {
    let by_symbol: HashMap<&str, &FetchResult> =
        fetched.iter().map(|f| (f.symbol.as_str(), f)).collect();

    for symbol in symbols {
        if !by_symbol.contains_key(symbol.as_str()) {
            return Err(TableError::UnknownSymbol(symbol.clone()));
        }
    }

    let mut all_dates = BTreeSet::new();
    for symbol in symbols {
        for point in &by_symbol[symbol.as_str()].points {
            all_dates.insert(point.date);
        }
    }
    let dates: Vec<NaiveDate> = all_dates.into_iter().collect();

    let mut columns: HashMap<String, Vec<f64>> = HashMap::new();
    for symbol in symbols {
        let result = by_symbol[symbol.as_str()];
        let mut date_map: HashMap<NaiveDate, f64> = HashMap::new();
        for point in &result.points {
            date_map.insert(point.date, point.close);
        }
        let column: Vec<f64> = dates
            .iter()
            .map(|d| date_map.get(d).copied().unwrap_or(f64::NAN))
            .collect();
        columns.insert(symbol.clone(), column);
    }

    PriceTable::from_columns(dates, symbols.to_vec(), columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::{ClosePoint, DataSource};

    fn point(date: &str, close: f64) -> ClosePoint {
        ClosePoint {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            close,
        }
    }

    fn fetched(symbol: &str, points: Vec<ClosePoint>) -> FetchResult {
        FetchResult {
            symbol: symbol.to_string(),
            points,
            source: DataSource::Synthetic,
        }
    }

    #[test]
    fn union_calendar_fills_missing_with_nan() {
        let results = vec![
            fetched(
                "SPY",
                vec![
                    point("2024-01-02", 100.0),
                    point("2024-01-03", 101.0),
                    point("2024-01-04", 102.0),
                ],
            ),
            fetched(
                "QQQ",
                vec![point("2024-01-02", 200.0), point("2024-01-04", 202.0)],
            ),
        ];
        let symbols = vec!["SPY".to_string(), "QQQ".to_string()];
        let table = build_price_table(&symbols, &results).unwrap();

        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.column("SPY").unwrap()[1], 101.0);
        assert!(table.column("QQQ").unwrap()[1].is_nan());
    }

    #[test]
    fn column_order_follows_request_not_fetch() {
        let results = vec![
            fetched("BBB", vec![point("2024-01-02", 2.0)]),
            fetched("AAA", vec![point("2024-01-02", 1.0)]),
        ];
        let symbols = vec!["AAA".to_string(), "BBB".to_string()];
        let table = build_price_table(&symbols, &results).unwrap();
        assert_eq!(table.symbols(), &["AAA".to_string(), "BBB".to_string()]);
    }

    #[test]
    fn missing_fetch_is_an_error() {
        let results = vec![fetched("AAA", vec![point("2024-01-02", 1.0)])];
        let symbols = vec!["AAA".to_string(), "BBB".to_string()];
        assert!(matches!(
            build_price_table(&symbols, &results),
            Err(TableError::UnknownSymbol(_))
        ));
    }
}
