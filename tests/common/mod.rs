//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use fuel_credit_sim::market::{HistoricalSeriesParser, PricePoint, PriceSeries};

/// Weekly price table shipped under `data/` (52 weeks, 2 without a price).
pub fn weekly_prices_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/weekly_credit_prices.csv")
}

/// Parses the shipped weekly price table in strict mode.
pub fn weekly_prices() -> PriceSeries {
    HistoricalSeriesParser::default()
        .parse_path(&weekly_prices_path())
        .expect("shipped price table should parse")
}

/// Builds a weekly series starting 2024-01-01 from raw prices.
pub fn weekly_series(prices: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PricePoint {
            date: start + Duration::weeks(i as i64),
            price,
        })
        .collect()
}

/// Path to a scenario file under `scenarios/`.
pub fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(format!("{name}.toml"))
}
