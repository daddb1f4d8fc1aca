//! Reduced yearly observations and the ordered series built from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One reduced observation: the mean of every reading returned for `date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearSample {
    pub year: i32,
    pub date: NaiveDate,
    pub value: f64,
}

/// Yearly samples for one variable, ascending by year with unique years.
///
/// Gap years are simply absent. A series is built once per fetch and replaced
/// wholesale on the next one.
///
/// # Examples
///
/// ```
/// use nimbus::{HistoricalSeries, YearSample};
/// use chrono::NaiveDate;
///
/// let sample = |year, value| YearSample {
///     year,
///     date: NaiveDate::from_ymd_opt(year, 7, 1).unwrap(),
///     value,
/// };
/// let series = HistoricalSeries::new(vec![sample(2022, 31.0), sample(2020, 28.0)]);
/// assert_eq!(series.years().collect::<Vec<_>>(), vec![2020, 2022]);
/// assert_eq!(series.exceedance_probability(30.0), 50.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<YearSample>", from = "Vec<YearSample>")]
pub struct HistoricalSeries {
    samples: Vec<YearSample>,
}

impl From<Vec<YearSample>> for HistoricalSeries {
    fn from(samples: Vec<YearSample>) -> Self {
        Self::new(samples)
    }
}

impl From<HistoricalSeries> for Vec<YearSample> {
    fn from(series: HistoricalSeries) -> Self {
        series.samples
    }
}

impl HistoricalSeries {
    /// Sorts `samples` by year. When a year appears more than once the first
    /// occurrence wins.
    pub fn new(mut samples: Vec<YearSample>) -> Self {
        samples.sort_by_key(|s| s.year);
        samples.dedup_by_key(|s| s.year);
        Self { samples }
    }

    /// Caller guarantees ascending, unique years.
    pub(crate) fn from_sorted(samples: Vec<YearSample>) -> Self {
        debug_assert!(samples.windows(2).all(|w| w[0].year < w[1].year));
        Self { samples }
    }

    pub fn samples(&self) -> &[YearSample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, YearSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.samples.iter().map(|s| s.year)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }

    pub fn get(&self, year: i32) -> Option<&YearSample> {
        self.samples
            .binary_search_by_key(&year, |s| s.year)
            .ok()
            .map(|i| &self.samples[i])
    }
}

impl<'a> IntoIterator for &'a HistoricalSeries {
    type Item = &'a YearSample;
    type IntoIter = std::slice::Iter<'a, YearSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
