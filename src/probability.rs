//! Exceedance statistics over a [`HistoricalSeries`].

use crate::types::series::{HistoricalSeries, YearSample};
use serde::{Deserialize, Serialize};
use std::fmt;

const LOW_UPPER_BOUND: f64 = 20.0;
const MODERATE_UPPER_BOUND: f64 = 50.0;

/// Percentage (0–100) of samples whose value is strictly greater than `threshold`.
///
/// A sample equal to the threshold does not count. An empty series yields `0.0`.
pub fn exceedance_probability(series: &HistoricalSeries, threshold: f64) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let exceeding = exceeding_samples(series, threshold).count();
    100.0 * exceeding as f64 / series.len() as f64
}

/// Samples strictly above `threshold`, in year order.
pub fn exceeding_samples(
    series: &HistoricalSeries,
    threshold: f64,
) -> impl Iterator<Item = &YearSample> {
    series.iter().filter(move |s| s.value > threshold)
}

impl HistoricalSeries {
    /// See [`exceedance_probability`].
    pub fn exceedance_probability(&self, threshold: f64) -> f64 {
        exceedance_probability(self, threshold)
    }
}

/// Coarse classification of an exceedance probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceedanceBand {
    /// At most 20 %.
    Low,
    /// Above 20 % and at most 50 %.
    Moderate,
    /// Above 50 %.
    High,
}

impl ExceedanceBand {
    pub fn from_probability(probability: f64) -> Self {
        if probability <= LOW_UPPER_BOUND {
            ExceedanceBand::Low
        } else if probability <= MODERATE_UPPER_BOUND {
            ExceedanceBand::Moderate
        } else {
            ExceedanceBand::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExceedanceBand::Low => "low",
            ExceedanceBand::Moderate => "moderate",
            ExceedanceBand::High => "high",
        }
    }

    /// Display colour conventionally used for the band.
    pub fn color(&self) -> &'static str {
        match self {
            ExceedanceBand::Low => "green",
            ExceedanceBand::Moderate => "orange",
            ExceedanceBand::High => "red",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            ExceedanceBand::Low => "Low chance - safe to proceed.",
            ExceedanceBand::Moderate => "Moderate chance - plan with caution.",
            ExceedanceBand::High => {
                "High chance of extreme weather - consider postponing outdoor activities."
            }
        }
    }
}

impl fmt::Display for ExceedanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exceedance statistics of one variable, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceedanceReport {
    pub threshold: f64,
    pub probability: f64,
    pub band: ExceedanceBand,
    /// Years whose value was strictly above the threshold.
    pub exceeding_years: Vec<i32>,
    pub available_years: usize,
}

impl ExceedanceReport {
    pub fn new(series: &HistoricalSeries, threshold: f64) -> Self {
        let probability = exceedance_probability(series, threshold);
        Self {
            threshold,
            probability,
            band: ExceedanceBand::from_probability(probability),
            exceeding_years: exceeding_samples(series, threshold)
                .map(|s| s.year)
                .collect(),
            available_years: series.len(),
        }
    }
}

impl fmt::Display for ExceedanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}% chance > {}", self.probability, self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(values: &[(i32, f64)]) -> HistoricalSeries {
        HistoricalSeries::new(
            values
                .iter()
                .map(|&(year, value)| YearSample {
                    year,
                    date: NaiveDate::from_ymd_opt(year, 8, 1).unwrap(),
                    value,
                })
                .collect(),
        )
    }

    #[test]
    fn empty_series_is_zero() {
        let empty = HistoricalSeries::default();
        for threshold in [-1e9, -5.0, 0.0, 12.5, f64::MAX] {
            assert_eq!(exceedance_probability(&empty, threshold), 0.0);
        }
    }

    #[test]
    fn equal_value_does_not_exceed() {
        let s = series(&[(2020, 30.0)]);
        assert_eq!(exceedance_probability(&s, 30.0), 0.0);
        assert_eq!(exceedance_probability(&s, 29.999), 100.0);
    }

    #[test]
    fn counts_strictly_greater() {
        let s = series(&[(2018, 10.0), (2019, 21.0), (2020, 19.0), (2021, 25.0)]);
        assert_eq!(exceedance_probability(&s, 20.0), 50.0);
        assert_eq!(
            exceeding_samples(&s, 20.0).map(|s| s.year).collect::<Vec<_>>(),
            vec![2019, 2021]
        );
    }

    #[test]
    fn non_increasing_in_threshold() {
        let s = series(&[
            (2010, -3.5),
            (2011, 0.0),
            (2012, 4.25),
            (2013, 4.25),
            (2014, 17.0),
            (2015, 33.3),
        ]);
        let mut previous = f64::INFINITY;
        let mut threshold = -10.0;
        while threshold <= 40.0 {
            let p = exceedance_probability(&s, threshold);
            assert!((0.0..=100.0).contains(&p));
            assert!(p <= previous, "p({threshold}) = {p} > {previous}");
            previous = p;
            threshold += 0.25;
        }
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(ExceedanceBand::from_probability(0.0), ExceedanceBand::Low);
        assert_eq!(ExceedanceBand::from_probability(20.0), ExceedanceBand::Low);
        assert_eq!(
            ExceedanceBand::from_probability(20.0001),
            ExceedanceBand::Moderate
        );
        assert_eq!(
            ExceedanceBand::from_probability(50.0),
            ExceedanceBand::Moderate
        );
        assert_eq!(ExceedanceBand::from_probability(50.1), ExceedanceBand::High);
        assert_eq!(ExceedanceBand::from_probability(100.0), ExceedanceBand::High);
    }

    #[test]
    fn report_collects_everything() {
        let s = series(&[(2020, 12.0), (2021, 8.0), (2022, 14.0), (2023, 2.0), (2024, 1.0)]);
        let report = ExceedanceReport::new(&s, 10.0);
        assert_eq!(report.probability, 40.0);
        assert_eq!(report.band, ExceedanceBand::Moderate);
        assert_eq!(report.band.color(), "orange");
        assert_eq!(report.exceeding_years, vec![2020, 2022]);
        assert_eq!(report.available_years, 5);
        assert_eq!(report.to_string(), "40.0% chance > 10");
    }
}
