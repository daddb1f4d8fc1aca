//! Projects an anchor date onto every fully elapsed year of a lookback window.

use crate::types::anchor_date::AnchorDate;
use chrono::{Datelike, NaiveDate};
use std::iter::FusedIterator;
use std::ops::Range;

/// Lazy, ascending sequence of `(year, date)` pairs for
/// `reference_year - years_back ..= reference_year - 1`.
///
/// The reference year itself is never included. The date is `None` when the
/// anchor does not exist in that year (February 29 outside leap years).
/// Years outside the calendar range of [`NaiveDate`] are left out, so an
/// extreme lookback yields fewer than `years_back` items.
///
/// # Examples
///
/// ```
/// use nimbus::{AnchorDate, YearProjection};
///
/// let anchor = AnchorDate::new(2, 29).unwrap();
/// let years: Vec<_> = YearProjection::new(anchor, 3, 2025)
///     .map(|(year, date)| (year, date.is_some()))
///     .collect();
/// assert_eq!(years, vec![(2022, false), (2023, false), (2024, true)]);
/// ```
#[derive(Debug, Clone)]
pub struct YearProjection {
    anchor: AnchorDate,
    years: Range<i32>,
}

impl YearProjection {
    pub fn new(anchor: AnchorDate, years_back: u32, reference_year: i32) -> Self {
        let span = i32::try_from(years_back).unwrap_or(i32::MAX);
        let end = reference_year.min(NaiveDate::MAX.year().saturating_add(1));
        let start = end.saturating_sub(span).max(NaiveDate::MIN.year());
        Self {
            anchor,
            years: start..end.max(start),
        }
    }

    pub fn first_year(&self) -> i32 {
        self.years.start
    }

    pub fn last_year(&self) -> i32 {
        self.years.end - 1
    }
}

impl Iterator for YearProjection {
    type Item = (i32, Option<NaiveDate>);

    fn next(&mut self) -> Option<Self::Item> {
        let year = self.years.next()?;
        Some((year, self.anchor.in_year(year)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.years.size_hint()
    }
}

impl ExactSizeIterator for YearProjection {}
impl FusedIterator for YearProjection {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_exactly_years_back_ascending() {
        let anchor = AnchorDate::new(7, 15).unwrap();
        for years_back in 1..=40u32 {
            let projection = YearProjection::new(anchor, years_back, 2025);
            assert_eq!(projection.len(), years_back as usize);
            let years: Vec<i32> = projection.map(|(y, _)| y).collect();
            assert_eq!(years.len(), years_back as usize);
            assert!(years.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(*years.last().unwrap(), 2024);
        }
    }

    #[test]
    fn dates_keep_month_and_day() {
        let anchor = AnchorDate::new(12, 31).unwrap();
        for (year, date) in YearProjection::new(anchor, 5, 2000) {
            assert_eq!(date, NaiveDate::from_ymd_opt(year, 12, 31));
        }
    }

    #[test]
    fn leap_day_skips_common_years() {
        let anchor = AnchorDate::new(2, 29).unwrap();
        let valid: Vec<i32> = YearProjection::new(anchor, 10, 2025)
            .filter_map(|(year, date)| date.map(|_| year))
            .collect();
        assert_eq!(valid, vec![2016, 2020, 2024]);
    }

    #[test]
    fn bounds_are_reported() {
        let projection = YearProjection::new(AnchorDate::new(1, 1).unwrap(), 20, 2025);
        assert_eq!(projection.first_year(), 2005);
        assert_eq!(projection.last_year(), 2024);
    }

    #[test]
    fn stays_within_the_calendar() {
        let anchor = AnchorDate::new(3, 1).unwrap();
        let projection = YearProjection::new(anchor, u32::MAX, 2025);
        assert_eq!(projection.first_year(), NaiveDate::MIN.year());
        assert_eq!(projection.last_year(), 2024);

        let mut projection = YearProjection::new(anchor, u32::MAX, 2025);
        assert!(projection.all(|(_, date)| date.is_some()));

        let beyond = YearProjection::new(anchor, 3, i32::MAX);
        assert_eq!(beyond.last_year(), NaiveDate::MAX.year());
        assert_eq!(beyond.len(), 3);
    }
}
