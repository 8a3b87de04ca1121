//! Projection horizon choices and their month counts.

use std::fmt;

/// Projection horizon choices offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionHorizon {
    OneYear,
    FiveYears,
    TenYears,
}

impl ProjectionHorizon {
    /// All selectable horizons, shortest first.
    pub const ALL: [ProjectionHorizon; 3] = [Self::OneYear, Self::FiveYears, Self::TenYears];

    /// Maps a year count to a horizon, `None` for anything but 1, 5 or 10.
    pub fn from_years(years: u32) -> Option<Self> {
        match years {
            1 => Some(Self::OneYear),
            5 => Some(Self::FiveYears),
            10 => Some(Self::TenYears),
            _ => None,
        }
    }

    pub fn years(self) -> u32 {
        match self {
            Self::OneYear => 1,
            Self::FiveYears => 5,
            Self::TenYears => 10,
        }
    }

    /// Horizon length in months.
    pub fn months(self) -> usize {
        self.years() as usize * 12
    }
}

impl fmt::Display for ProjectionHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.years() {
            1 => write!(f, "1 year"),
            n => write!(f, "{n} years"),
        }
    }
}
