use crate::types::series::HistoricalSeries;
use crate::weather_data::error::{FetchError, FetchErrorKind};
use std::fmt;

/// A year that produced no sample, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct YearError {
    pub year: i32,
    pub error: FetchError,
}

impl YearError {
    pub fn new(year: i32, error: FetchError) -> Self {
        Self { year, error }
    }

    pub fn kind(&self) -> FetchErrorKind {
        self.error.kind()
    }
}

impl fmt::Display for YearError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Year {}: {}", self.year, self.error)
    }
}

/// Result of fetching one variable over all requested years.
///
/// Partial data is an expected outcome: `series` holds every year that
/// succeeded and `errors` every year that did not, both in ascending year
/// order. `series` is `None` only when no year succeeded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchOutcome {
    pub series: Option<HistoricalSeries>,
    pub errors: Vec<YearError>,
}

impl FetchOutcome {
    pub fn years_fetched(&self) -> usize {
        self.series.as_ref().map_or(0, HistoricalSeries::len)
    }

    pub fn is_partial(&self) -> bool {
        self.series.is_some() && !self.errors.is_empty()
    }

    pub fn errors_of_kind(&self, kind: FetchErrorKind) -> impl Iterator<Item = &YearError> {
        self.errors.iter().filter(move |e| e.kind() == kind)
    }

    pub fn summary(&self) -> FetchSummary {
        FetchSummary {
            years_fetched: self.years_fetched(),
            errors: self.errors.clone(),
        }
    }
}

/// How many years were fetched for a variable, plus the per-year failures.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSummary {
    pub years_fetched: usize,
    pub errors: Vec<YearError>,
}

impl fmt::Display for FetchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "years fetched: {}", self.years_fetched)?;
        if !self.errors.is_empty() {
            write!(f, ", errors: {}", self.errors.len())?;
        }
        Ok(())
    }
}
