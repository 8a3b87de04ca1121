//! Historical credit price ingestion from delimited text.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CreditError, Result, RowError};

/// Header of the date column.
pub const DATE_COLUMN: &str = "Week Of";
/// Header of the price column.
pub const PRICE_COLUMN: &str = "Weekly Average Credit Price ($)";

/// Accepted date layouts, tried in order. Two-digit years come before
/// four-digit ones since `%Y` would otherwise read "19" as year 19.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];

/// One weekly credit price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    /// Start of the reporting week.
    pub date: NaiveDate,
    /// Average credit price for the week ($).
    pub price: f64,
}

/// Price observations in source row order.
///
/// The series is never re-sorted: "latest" always means the last row the
/// source supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Wraps already-validated points.
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last point in source order.
    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Prices in series order.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// How rows with unparseable values are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Any malformed row fails the whole parse with a list of row errors.
    #[default]
    Strict,
    /// Malformed rows are logged and dropped.
    Lenient,
}

/// Parser for weekly credit price tables.
///
/// # Examples
///
/// ```
/// use fuel_credit_sim::market::HistoricalSeriesParser;
///
/// let data = "Week Of,Weekly Average Credit Price ($)\n\
///             2024-01-01,65.50\n\
///             2024-01-08,\n\
///             2024-01-15,66.25\n";
/// let series = HistoricalSeriesParser::default().parse(data.as_bytes()).unwrap();
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.latest().map(|p| p.price), Some(66.25));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HistoricalSeriesParser {
    delimiter: u8,
    mode: ParseMode,
}

impl Default for HistoricalSeriesParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            mode: ParseMode::Strict,
        }
    }
}

impl HistoricalSeriesParser {
    /// Creates a parser with the given field delimiter and malformed-row policy.
    pub fn new(delimiter: u8, mode: ParseMode) -> Self {
        Self { delimiter, mode }
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::Io` if the file cannot be opened, otherwise the
    /// same errors as [`HistoricalSeriesParser::parse`].
    pub fn parse_path(&self, path: &Path) -> Result<PriceSeries> {
        let file = File::open(path)?;
        debug!(path = %path.display(), "reading price history");
        self.parse(io::BufReader::new(file))
    }

    /// Parses a price table from any reader.
    ///
    /// Rows with an empty price cell are skipped. Remaining rows keep their
    /// input order.
    ///
    /// # Errors
    ///
    /// * `CreditError::MissingColumn` if a required header is absent
    /// * `CreditError::MalformedRows` in strict mode if any row has an
    ///   unparseable date, a price that is not a finite, non-negative number,
    ///   or a cell that is not valid UTF-8
    /// * `CreditError::Csv` if the input is not valid delimited text
    pub fn parse<R: Read>(&self, reader: R) -> Result<PriceSeries> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let date_idx = column_index(&headers, DATE_COLUMN)?;
        let price_idx = column_index(&headers, PRICE_COLUMN)?;

        let mut points = Vec::new();
        let mut errors = Vec::new();
        let mut skipped_empty = 0_usize;

        for record in rdr.byte_records() {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);
            let raw_price = record.get(price_idx).unwrap_or_default().trim_ascii();
            if raw_price.is_empty() {
                skipped_empty += 1;
                continue;
            }
            let raw_date = record.get(date_idx).unwrap_or_default().trim_ascii();

            match parse_row(line, raw_date, raw_price) {
                Ok(point) => points.push(point),
                Err(row_errors) => match self.mode {
                    ParseMode::Strict => errors.extend(row_errors),
                    ParseMode::Lenient => {
                        for row_err in &row_errors {
                            warn!("dropping price row: {row_err}");
                        }
                    }
                },
            }
        }

        if !errors.is_empty() {
            return Err(CreditError::MalformedRows(errors));
        }

        info!(
            rows = points.len(),
            skipped_empty, "parsed historical price series"
        );
        Ok(PriceSeries::new(points))
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| CreditError::MissingColumn(name.to_string()))
}

/// Parses one row, collecting an error for each bad cell.
fn parse_row(
    line: u64,
    raw_date: &[u8],
    raw_price: &[u8],
) -> std::result::Result<PricePoint, Vec<RowError>> {
    let date = decode_cell(raw_date)
        .and_then(|raw| parse_date(raw).ok_or("is not a recognised date"));
    let price = decode_cell(raw_price).and_then(parse_price);

    match (date, price) {
        (Ok(date), Ok(price)) => Ok(PricePoint { date, price }),
        (date, price) => {
            let mut errors = Vec::with_capacity(2);
            if let Err(reason) = date {
                errors.push(row_error(line, DATE_COLUMN, raw_date, reason));
            }
            if let Err(reason) = price {
                errors.push(row_error(line, PRICE_COLUMN, raw_price, reason));
            }
            Err(errors)
        }
    }
}

fn decode_cell(raw: &[u8]) -> std::result::Result<&str, &'static str> {
    std::str::from_utf8(raw).map_err(|_| "is not valid UTF-8")
}

fn row_error(line: u64, column: &str, raw: &[u8], reason: &str) -> RowError {
    RowError {
        line,
        column: column.to_string(),
        value: String::from_utf8_lossy(raw).into_owned(),
        reason: reason.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn parse_price(raw: &str) -> std::result::Result<f64, &'static str> {
    let cleaned: String = raw
        .strip_prefix('$')
        .unwrap_or(raw)
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let price: f64 = cleaned.trim().parse().map_err(|_| "is not a number")?;
    if !price.is_finite() {
        return Err("is not a finite number");
    }
    if price < 0.0 {
        return Err("must not be negative");
    }
    Ok(price)
}
