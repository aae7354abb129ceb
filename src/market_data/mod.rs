pub mod history;
pub mod watchlist;
pub mod yahoo;

// Re-export the common types for convenient access (e.g. `use crate::market_data::PriceSeries`).
pub use history::{PricePoint, PriceSeries, SeriesOrderError};
pub use watchlist::{Watchlist, WatchlistEntry};
pub use yahoo::{normalize_symbol, MarketDataError, YahooChartClient};
