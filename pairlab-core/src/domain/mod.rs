//! Domain types: price table, date-indexed series, signal table, portfolio.

pub mod portfolio;
pub mod price_table;
pub mod series;
pub mod signal;

pub use portfolio::{PairPortfolio, PortfolioRow};
pub use price_table::{PriceTable, TableError};
pub use series::PriceSeries;
pub use signal::{SignalRow, SignalTable};
