//! Unit-carrying quantities produced by fuel normalization and credit estimation.

use std::fmt;

use serde::Serialize;

/// Energy quantity in diesel-gallon-equivalents (DGE).
///
/// One DGE is the energy content of one gallon of diesel. Values are not
/// clamped: a negative fuel amount yields a negative quantity.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Dge(pub f64);

impl Dge {
    /// Returns the raw DGE value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Dge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} DGE", self.0)
    }
}

/// Estimated number of regulatory credits.
///
/// Negative when the fuel's carbon intensity exceeds the benchmark.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Credits(pub f64);

impl Credits {
    /// Returns the raw credit count.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} credits", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dge_display_rounds_to_two_places() {
        assert_eq!(Dge(26.6).to_string(), "26.60 DGE");
    }

    #[test]
    fn credits_serialize_as_bare_number() {
        let value = toml::Value::try_from(Credits(9.5)).ok();
        assert_eq!(value.and_then(|v| v.as_float()), Some(9.5));
    }
}
