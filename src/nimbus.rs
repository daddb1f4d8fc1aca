//! Main entry point: the [`Nimbus`] client, which turns a location, a calendar
//! day and a lookback window into per-year samples and exceedance statistics.

use crate::analysis::{Analysis, VariableAnalysis};
use crate::error::NimbusError;
use crate::projection::YearProjection;
use crate::types::anchor_date::AnchorDate;
use crate::types::outcome::FetchOutcome;
use crate::types::session::SessionState;
use crate::types::variable::VariableSpec;
use crate::weather_data::error::FetchError;
use crate::weather_data::fetcher::WeatherFetcher;
use crate::weather_data::meteomatics::{Credentials, MeteomaticsSource, DEFAULT_REQUEST_TIMEOUT};
use crate::weather_data::source::{DayRequest, WeatherDataSource};
use bon::bon;
use chrono::{Datelike, NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Lookback used when `years_back` is not given.
pub const DEFAULT_YEARS_BACK: u32 = 20;
/// Range a user interface should offer for `years_back`. The client itself
/// accepts any positive value.
pub const YEARS_BACK_RANGE: RangeInclusive<u32> = 5..=40;
/// Location selected before the user picks one.
pub const DEFAULT_LOCATION: LatLon = LatLon(20.0, 0.0);

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both are decimal degrees.
///
/// # Examples
///
/// ```
/// use nimbus::LatLon;
///
/// let berlin_center = LatLon(52.5200, 13.4050);
/// assert!(berlin_center.is_valid());
/// assert!(!LatLon(91.0, 0.0).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn lat(self) -> f64 {
        self.0
    }

    pub fn lon(self) -> f64 {
        self.1
    }

    /// Latitude in [-90, 90] and longitude in [-180, 180].
    pub fn is_valid(self) -> bool {
        (-90.0..=90.0).contains(&self.0) && (-180.0..=180.0).contains(&self.1)
    }

    pub fn validate(self) -> Result<Self, NimbusError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(NimbusError::InvalidCoordinate {
                lat: self.0,
                lon: self.1,
            })
        }
    }
}

impl Default for LatLon {
    fn default() -> Self {
        DEFAULT_LOCATION
    }
}

/// Client for historical same-day exceedance analysis.
///
/// For every fully elapsed year in the lookback window it requests the anchor
/// day from a [`WeatherDataSource`], reduces the day's readings to their mean
/// and collects the results into a [`crate::HistoricalSeries`]. Years that
/// fail are reported next to the series instead of failing the call.
///
/// The client is stateless between calls; interactive state lives in a
/// caller-owned [`SessionState`].
///
/// # Examples
///
/// ```no_run
/// # use nimbus::{Credentials, LatLon, Nimbus, NimbusError, VariableSpec};
/// # use chrono::NaiveDate;
/// # #[tokio::main]
/// # async fn main() -> Result<(), NimbusError> {
/// let client = Nimbus::meteomatics(Credentials::new("user", "secret"))?;
///
/// let analysis = client
///     .analyze()
///     .location(LatLon(48.8566, 2.3522))
///     .date(NaiveDate::from_ymd_opt(2025, 7, 14).unwrap())
///     .years_back(20)
///     .variables(&[VariableSpec::temperature().with_threshold(28.0)])
///     .call()
///     .await?;
///
/// for variable in &analysis.variables {
///     if let Some(report) = variable.report() {
///         println!("{}: {} ({})", variable.variable.label, report, report.band);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct Nimbus<S = MeteomaticsSource> {
    fetcher: WeatherFetcher<S>,
    reference_year: Option<i32>,
}

impl Nimbus<MeteomaticsSource> {
    /// A client talking to the public Meteomatics API with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::HttpClient`] if the HTTP client cannot be built.
    pub fn meteomatics(credentials: Credentials) -> Result<Self, NimbusError> {
        let source = MeteomaticsSource::builder()
            .credentials(credentials)
            .build()?;
        Ok(Nimbus::builder().source(source).build())
    }
}

#[bon]
impl<S: WeatherDataSource> Nimbus<S> {
    /// Creates a client around any [`WeatherDataSource`].
    ///
    /// * `.source(S)`: **Required.** Where single-day data comes from.
    /// * `.request_timeout(Duration)`: Optional. Upper bound on each request, defaults to 12 seconds. An expired request counts as a transport error for its year.
    /// * `.concurrency(usize)`: Optional. Requests in flight at once, defaults to `1` (strictly sequential). Results are always assembled in ascending year order.
    /// * `.reference_year(i32)`: Optional. The "current" year; only the years before it are queried. Defaults to the current UTC year.
    #[builder]
    pub fn new(
        source: S,
        request_timeout: Option<Duration>,
        concurrency: Option<usize>,
        reference_year: Option<i32>,
    ) -> Self {
        Self {
            fetcher: WeatherFetcher::new(
                source,
                request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
                concurrency.unwrap_or(1),
            ),
            reference_year,
        }
    }

    pub fn source(&self) -> &S {
        self.fetcher.source()
    }

    /// The year whose predecessors are queried.
    pub fn reference_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(|| Utc::now().year())
    }

    /// Fetches one calendar day and returns the mean of its readings.
    ///
    /// Issues exactly one request. Every failure is returned as a
    /// [`FetchError`] describing its category; nothing panics.
    pub async fn fetch_one_day_mean(
        &self,
        location: LatLon,
        date: NaiveDate,
        parameter: &str,
    ) -> Result<f64, FetchError> {
        self.fetcher
            .one_day_mean(&DayRequest::new(location, date, parameter))
            .await
    }

    /// Fetches one value per year for a single parameter.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.**
    /// * `.date(impl Into<AnchorDate>)`: **Required.** Only month and day are used.
    /// * `.parameter(&str)`: **Required.** Provider parameter code, e.g. `t_2m:C`.
    /// * `.years_back(u32)`: Optional. Defaults to [`DEFAULT_YEARS_BACK`].
    /// * `.cancellation(&CancellationToken)`: Optional. Checked before each year's request.
    ///
    /// # Returns
    ///
    /// A [`FetchOutcome`] with the successful years as a series (absent when
    /// none succeeded) and every failed year with its reason.
    ///
    /// # Errors
    ///
    /// Only for invalid input: [`NimbusError::InvalidCoordinate`],
    /// [`NimbusError::ZeroYearsBack`] or [`NimbusError::EmptyParameter`].
    /// Failing years never make the call fail.
    #[builder]
    pub async fn historical_series(
        &self,
        location: LatLon,
        #[builder(into)] date: AnchorDate,
        parameter: &str,
        years_back: Option<u32>,
        cancellation: Option<&CancellationToken>,
    ) -> Result<FetchOutcome, NimbusError> {
        let years_back = validate_request(location, years_back)?;
        let reference_year = self.reference_year();
        self.series_for(location, date, years_back, reference_year, parameter, cancellation)
            .await
    }

    /// Fetches every variable in `variables`, one after the other.
    ///
    /// Takes the same `.location`, `.date`, `.years_back` and `.cancellation`
    /// arguments as [`Nimbus::historical_series`], plus
    /// `.variables(&[VariableSpec])` (**required**, non-empty).
    ///
    /// # Errors
    ///
    /// [`NimbusError::NoVariablesSelected`] for an empty variable list, otherwise
    /// as [`Nimbus::historical_series`].
    #[builder]
    pub async fn analyze(
        &self,
        location: LatLon,
        #[builder(into)] date: AnchorDate,
        variables: &[VariableSpec],
        years_back: Option<u32>,
        cancellation: Option<&CancellationToken>,
    ) -> Result<Analysis, NimbusError> {
        let years_back = validate_request(location, years_back)?;
        if variables.is_empty() {
            return Err(NimbusError::NoVariablesSelected);
        }
        // Reject a bad parameter before any request goes out.
        if variables.iter().any(|v| v.parameter.trim().is_empty()) {
            return Err(NimbusError::EmptyParameter);
        }

        // Every variable covers the same years, even across a new year.
        let reference_year = self.reference_year();
        let mut results = Vec::with_capacity(variables.len());
        for variable in variables {
            let outcome = self
                .series_for(
                    location,
                    date,
                    years_back,
                    reference_year,
                    &variable.parameter,
                    cancellation,
                )
                .await?;
            results.push(VariableAnalysis {
                variable: variable.clone(),
                outcome,
            });
        }

        Ok(Analysis {
            location,
            anchor: date,
            years_back,
            reference_year,
            variables: results,
        })
    }

    /// Runs [`Nimbus::analyze`] for the session's selected location and returns
    /// the session with its last analysis replaced.
    ///
    /// Takes `.state(SessionState)` (**required**) in place of `.location`.
    #[builder]
    pub async fn analyze_session(
        &self,
        state: SessionState,
        #[builder(into)] date: AnchorDate,
        variables: &[VariableSpec],
        years_back: Option<u32>,
        cancellation: Option<&CancellationToken>,
    ) -> Result<SessionState, NimbusError> {
        let analysis = self
            .analyze()
            .location(state.selected_location)
            .date(date)
            .variables(variables)
            .maybe_years_back(years_back)
            .maybe_cancellation(cancellation)
            .call()
            .await?;
        Ok(state.with_analysis(analysis))
    }

    async fn series_for(
        &self,
        location: LatLon,
        anchor: AnchorDate,
        years_back: u32,
        reference_year: i32,
        parameter: &str,
        cancellation: Option<&CancellationToken>,
    ) -> Result<FetchOutcome, NimbusError> {
        if parameter.trim().is_empty() {
            return Err(NimbusError::EmptyParameter);
        }
        let projection = YearProjection::new(anchor, years_back, reference_year);
        info!(
            "Fetching {} for {} in {}..={} at {},{}",
            parameter,
            anchor,
            projection.first_year(),
            projection.last_year(),
            location.0,
            location.1
        );
        Ok(self
            .fetcher
            .historical_series(location, anchor, projection, parameter, cancellation)
            .await)
    }
}

fn validate_request(location: LatLon, years_back: Option<u32>) -> Result<u32, NimbusError> {
    location.validate()?;
    let years_back = years_back.unwrap_or(DEFAULT_YEARS_BACK);
    if years_back == 0 {
        return Err(NimbusError::ZeroYearsBack);
    }
    Ok(years_back)
}
