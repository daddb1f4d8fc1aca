use crate::analysis::Analysis;
use crate::types::outcome::YearError;
use crate::types::series::HistoricalSeries;
use crate::LatLon;

/// Caller-owned state of an interactive session: the selected location and
/// the results of the last analysis.
///
/// The client never keeps state of its own; pass this into
/// [`crate::Nimbus::analyze_session`] and keep what it returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub selected_location: LatLon,
    pub last_analysis: Option<Analysis>,
}

impl SessionState {
    pub fn new(selected_location: LatLon) -> Self {
        Self {
            selected_location,
            last_analysis: None,
        }
    }

    /// Moves the selection. Results of earlier runs are kept until the next
    /// analysis replaces them; they carry their own location.
    pub fn select_location(&mut self, location: LatLon) {
        self.selected_location = location;
    }

    pub fn with_analysis(mut self, analysis: Analysis) -> Self {
        self.last_analysis = Some(analysis);
        self
    }

    /// `(label, series)` of every variable of the last analysis.
    pub fn last_series(&self) -> Vec<(&str, Option<&HistoricalSeries>)> {
        self.last_analysis
            .iter()
            .flat_map(|a| a.variables.iter())
            .map(|v| (v.variable.label.as_str(), v.series()))
            .collect()
    }

    /// `(label, errors)` of every variable of the last analysis.
    pub fn last_errors(&self) -> Vec<(&str, &[YearError])> {
        self.last_analysis
            .iter()
            .flat_map(|a| a.variables.iter())
            .map(|v| (v.variable.label.as_str(), v.outcome.errors.as_slice()))
            .collect()
    }
}
