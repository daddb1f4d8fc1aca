//! Results of analysing several variables for one location and anchor date.

use crate::export::merge_series;
use crate::probability::ExceedanceReport;
use crate::types::anchor_date::AnchorDate;
use crate::types::outcome::{FetchOutcome, FetchSummary};
use crate::types::series::{HistoricalSeries, YearSample};
use crate::types::variable::VariableSpec;
use crate::{LatLon, NimbusError};
use polars::prelude::DataFrame;

/// One variable's fetch outcome together with the variable it was fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableAnalysis {
    pub variable: VariableSpec,
    pub outcome: FetchOutcome,
}

impl VariableAnalysis {
    pub fn series(&self) -> Option<&HistoricalSeries> {
        self.outcome.series.as_ref()
    }

    /// Exceedance statistics against the variable's threshold, `None` when no
    /// year could be fetched.
    pub fn report(&self) -> Option<ExceedanceReport> {
        self.series()
            .map(|series| ExceedanceReport::new(series, self.variable.threshold))
    }

    /// Samples to highlight in a plot: those above the threshold.
    pub fn exceeding_samples(&self) -> Vec<YearSample> {
        self.series()
            .map(|series| {
                crate::probability::exceeding_samples(series, self.variable.threshold)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn summary(&self) -> FetchSummary {
        self.outcome.summary()
    }
}

/// Everything one analysis run produced. Replaced wholesale by the next run.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub location: LatLon,
    pub anchor: AnchorDate,
    pub years_back: u32,
    /// The first year *not* queried; samples cover the years before it.
    pub reference_year: i32,
    pub variables: Vec<VariableAnalysis>,
}

impl Analysis {
    pub fn get(&self, label: &str) -> Option<&VariableAnalysis> {
        self.variables.iter().find(|v| v.variable.label == label)
    }

    /// `true` when at least one variable has a series.
    pub fn has_data(&self) -> bool {
        self.variables.iter().any(|v| v.series().is_some())
    }

    /// Title for a per-variable chart, e.g. "Temperature (°C) on July 15 - last 20 years".
    pub fn title_for(&self, variable: &VariableSpec) -> String {
        format!(
            "{} on {} - last {} years",
            variable.label,
            self.anchor.label(),
            self.years_back
        )
    }

    /// All variables with data, outer-joined on date. `None` when no variable
    /// has a series.
    pub fn to_dataframe(&self) -> Result<Option<DataFrame>, NimbusError> {
        let columns: Vec<(&str, &HistoricalSeries)> = self
            .variables
            .iter()
            .filter_map(|v| v.series().map(|s| (v.variable.label.as_str(), s)))
            .collect();
        if columns.is_empty() {
            return Ok(None);
        }
        merge_series(&columns).map(Some)
    }
}
