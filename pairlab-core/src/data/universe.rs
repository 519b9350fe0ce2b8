//! Ticker universe handling.
//!
//! The universe is a plain text file, one symbol per line. A built-in
//! default list covers the liquid names the tool was tuned on.

use super::provider::DataError;
use std::path::Path;

/// Symbols used when no ticker file is supplied.
pub const DEFAULT_UNIVERSE: [&str; 10] = [
    "MSFT", "ADBE", "AAPL", "V", "MA", "AMZN", "NVDA", "GOOG", "EWA", "EWC",
];

/// Read a ticker file: one symbol per line, blank lines and surrounding
/// whitespace ignored. Order is preserved.
pub fn load_tickers(path: &Path) -> Result<Vec<String>, DataError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DataError::TickerFile(format!("{}: {e}", path.display())))?;
    let tickers = parse_tickers(&content);
    if tickers.is_empty() {
        return Err(DataError::TickerFile(format!(
            "{}: no symbols found",
            path.display()
        )));
    }
    Ok(tickers)
}

fn parse_tickers(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// The default universe as owned strings.
pub fn default_universe() -> Vec<String> {
    DEFAULT_UNIVERSE.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_symbol_per_line() {
        let tickers = parse_tickers("MSFT\nAAPL\n\n  GOOG  \n");
        assert_eq!(tickers, vec!["MSFT", "AAPL", "GOOG"]);
    }

    #[test]
    fn default_universe_has_ten_symbols() {
        assert_eq!(default_universe().len(), 10);
        assert_eq!(DEFAULT_UNIVERSE[0], "MSFT");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_tickers(Path::new("/nonexistent/tickers.txt"));
        assert!(matches!(err, Err(DataError::TickerFile(_))));
    }
}
