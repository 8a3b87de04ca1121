//! Historical credit market data.

/// Weekly price table parsing.
pub mod history;
pub mod stats;

pub use history::{HistoricalSeriesParser, ParseMode, PricePoint, PriceSeries};
pub use stats::SeriesStats;
