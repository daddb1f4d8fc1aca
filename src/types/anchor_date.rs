//! The month/day combination reused across every historical year of an analysis.

use crate::NimbusError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A leap year used to check that a month/day exists in *some* year.
const LEAP_REFERENCE_YEAR: i32 = 2000;

/// A calendar day without a year, e.g. "July 15th" or "February 29th".
///
/// Only the month and day of whatever date it was built from are kept. Projecting
/// it onto a concrete year with [`AnchorDate::in_year`] returns `None` when the
/// day does not exist in that year, it never rolls over to the next day.
///
/// # Examples
///
/// ```
/// use nimbus::AnchorDate;
/// use chrono::NaiveDate;
///
/// let anchor: AnchorDate = "2024-02-29".parse().unwrap();
/// assert_eq!(anchor.in_year(2020), NaiveDate::from_ymd_opt(2020, 2, 29));
/// assert_eq!(anchor.in_year(2021), None);
///
/// let summer = AnchorDate::new(7, 15).unwrap();
/// assert_eq!(summer.to_string(), "07-15");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AnchorDate {
    month: u32,
    day: u32,
}

impl AnchorDate {
    /// Returns `None` if the month/day does not exist in any year.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(LEAP_REFERENCE_YEAR, month, day)?;
        Some(Self { month, day })
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn day(self) -> u32 {
        self.day
    }

    /// The same month and day in `year`, if it exists there.
    pub fn in_year(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }

    /// Long human form used in titles, e.g. "July 15".
    pub fn label(self) -> String {
        // The reference year always contains the anchor.
        match self.in_year(LEAP_REFERENCE_YEAR) {
            Some(date) => date.format("%B %d").to_string(),
            None => self.to_string(),
        }
    }
}

impl From<NaiveDate> for AnchorDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl FromStr for AnchorDate {
    type Err = NimbusError;

    /// Accepts `YYYY-MM-DD` (the year is discarded) or `MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(date.into());
        }
        let mut parts = trimmed.splitn(2, '-');
        let month = parts.next().and_then(|m| m.parse::<u32>().ok());
        let day = parts.next().and_then(|d| d.parse::<u32>().ok());
        let anchor = match (month, day) {
            (Some(month), Some(day)) => AnchorDate::new(month, day),
            _ => None,
        };
        anchor.ok_or_else(|| NimbusError::DateParsingError(s.to_string()))
    }
}

impl Display for AnchorDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_forms() -> Result<(), NimbusError> {
        let full: AnchorDate = "1999-12-31".parse()?;
        let short: AnchorDate = "12-31".parse()?;
        assert_eq!(full, short);
        assert_eq!(full.month(), 12);
        assert_eq!(full.day(), 31);
        Ok(())
    }

    #[test]
    fn rejects_impossible_days() {
        assert!(AnchorDate::new(2, 30).is_none());
        assert!(AnchorDate::new(13, 1).is_none());
        assert!("04-31".parse::<AnchorDate>().is_err());
        assert!("tomorrow".parse::<AnchorDate>().is_err());
    }

    #[test]
    fn leap_day_only_exists_in_leap_years() {
        let anchor = AnchorDate::new(2, 29).unwrap();
        assert!(anchor.in_year(2024).is_some());
        assert!(anchor.in_year(2000).is_some());
        assert!(anchor.in_year(1900).is_none());
        assert!(anchor.in_year(2023).is_none());
    }

    #[test]
    fn label_is_readable() {
        assert_eq!(AnchorDate::new(7, 4).unwrap().label(), "July 04");
    }
}
