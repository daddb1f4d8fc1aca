use crate::projection::YearProjection;
use crate::types::anchor_date::AnchorDate;
use crate::types::outcome::{FetchOutcome, YearError};
use crate::types::series::{HistoricalSeries, YearSample};
use crate::weather_data::error::FetchError;
use crate::weather_data::extractor::reduce_payload;
use crate::weather_data::source::{DayRequest, WeatherDataSource};
use crate::LatLon;
use chrono::NaiveDate;
use futures_util::{stream, StreamExt};
use log::{debug, info, warn};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Runs single-day and multi-year fetches against a [`WeatherDataSource`].
///
/// Holds no per-request state, so one fetcher can serve any number of
/// independent calls.
pub(crate) struct WeatherFetcher<S> {
    source: S,
    request_timeout: Duration,
    concurrency: usize,
}

impl<S: WeatherDataSource> WeatherFetcher<S> {
    pub fn new(source: S, request_timeout: Duration, concurrency: usize) -> Self {
        Self {
            source,
            request_timeout,
            concurrency: concurrency.max(1),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// One request for the whole UTC day, reduced to the mean of its readings.
    pub async fn one_day_mean(&self, request: &DayRequest) -> Result<f64, FetchError> {
        let response =
            match tokio::time::timeout(self.request_timeout, self.source.fetch_day(request)).await
            {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    return Err(FetchError::Transport {
                        url: e.url,
                        message: e.message,
                    })
                }
                Err(_) => {
                    return Err(FetchError::Transport {
                        url: request.path(),
                        message: format!("no response within {:?}", self.request_timeout),
                    })
                }
            };

        if !response.status.is_success() {
            return Err(FetchError::provider(response.status, &response.body));
        }
        reduce_payload(&response.body)
    }

    /// One sample per year of `projection`, in ascending year order.
    ///
    /// Up to `concurrency` requests are in flight at once; results are assembled
    /// in projection order regardless of completion order. Years not yet started
    /// when `cancellation` fires are reported as [`FetchError::Cancelled`].
    pub async fn historical_series(
        &self,
        location: LatLon,
        anchor: AnchorDate,
        projection: YearProjection,
        parameter: &str,
        cancellation: Option<&CancellationToken>,
    ) -> FetchOutcome {
        let requested = projection.len();
        let results: Vec<(i32, Result<YearSample, FetchError>)> = stream::iter(projection)
            .map(move |(year, date)| {
                self.fetch_year(location, anchor, year, date, parameter, cancellation)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut samples = Vec::with_capacity(results.len());
        let mut errors = Vec::new();
        for (year, result) in results {
            match result {
                Ok(sample) => samples.push(sample),
                Err(error) => errors.push(YearError::new(year, error)),
            }
        }

        info!(
            "Fetched {}/{} years of {} at {},{} ({} failed)",
            samples.len(),
            requested,
            parameter,
            location.0,
            location.1,
            errors.len()
        );

        FetchOutcome {
            series: (!samples.is_empty()).then(|| HistoricalSeries::from_sorted(samples)),
            errors,
        }
    }

    async fn fetch_year(
        &self,
        location: LatLon,
        anchor: AnchorDate,
        year: i32,
        date: Option<NaiveDate>,
        parameter: &str,
        cancellation: Option<&CancellationToken>,
    ) -> (i32, Result<YearSample, FetchError>) {
        let Some(date) = date else {
            debug!("{} does not exist in {}, skipping", anchor, year);
            return (
                year,
                Err(FetchError::InvalidDateForYear {
                    year,
                    month: anchor.month(),
                    day: anchor.day(),
                }),
            );
        };
        if cancellation.is_some_and(CancellationToken::is_cancelled) {
            return (year, Err(FetchError::Cancelled));
        }

        let request = DayRequest::new(location, date, parameter);
        let result = self
            .one_day_mean(&request)
            .await
            .map(|value| YearSample { year, date, value });
        if let Err(e) = &result {
            warn!("Year {} of {} failed: {}", year, parameter, e);
        }
        (year, result)
    }
}
