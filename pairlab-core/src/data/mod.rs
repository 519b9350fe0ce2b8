//! Price data acquisition: provider abstraction, Yahoo Finance client,
//! CSV import, and alignment of per-symbol series onto a shared calendar.

pub mod align;
pub mod csv_import;
pub mod provider;
pub mod universe;
pub mod yahoo;

pub use align::build_price_table;
pub use csv_import::read_price_csv;
pub use provider::{ClosePoint, DataError, DataSource, FetchResult, PriceProvider};
pub use universe::{default_universe, load_tickers, DEFAULT_UNIVERSE};
pub use yahoo::YahooProvider;
