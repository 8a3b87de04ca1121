//! Error types shared by the computation pipeline.

use std::fmt;

use thiserror::Error;

/// Errors raised while normalizing fuel, parsing price history, or projecting.
#[derive(Debug, Error)]
pub enum CreditError {
    #[error("unknown fuel type \"{0}\"")]
    UnknownFuelType(String),

    #[error("invalid fuel table: {0}")]
    InvalidFuelTable(String),

    #[error("price history is missing required column \"{0}\"")]
    MissingColumn(String),

    #[error("{} malformed price history row(s), first: {}", .0.len(), first_row(.0))]
    MalformedRows(Vec<RowError>),

    #[error("price history is empty; at least one price is required to project")]
    EmptySeries,

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CreditError>;

/// A single rejected row from a price history file.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line number in the source, header included.
    pub line: u64,
    /// Column the bad value came from.
    pub column: String,
    /// Raw cell contents.
    pub value: String,
    /// Why the value was rejected.
    pub reason: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} \"{}\" {}",
            self.line, self.column, self.value, self.reason
        )
    }
}

fn first_row(rows: &[RowError]) -> String {
    rows.first().map_or_else(String::new, ToString::to_string)
}
