//! The seam between the engine and whatever serves single-day weather data.

use crate::LatLon;
use chrono::NaiveDate;
use reqwest::StatusCode;
use std::future::Future;
use thiserror::Error;

/// One day, one parameter, one coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRequest {
    pub location: LatLon,
    pub date: NaiveDate,
    pub parameter: String,
}

impl DayRequest {
    pub fn new(location: LatLon, date: NaiveDate, parameter: impl Into<String>) -> Self {
        Self {
            location,
            date,
            parameter: parameter.into(),
        }
    }

    /// UTC window covering the whole day, formatted as `start--end`.
    pub fn time_range(&self) -> String {
        let day = self.date.format("%Y-%m-%d");
        format!("{day}T00:00:00Z--{day}T23:59:59Z")
    }

    /// Path relative to the provider base URL:
    /// `{start}--{end}/{parameter}/{lat},{lon}/json`.
    pub fn path(&self) -> String {
        format!(
            "{}/{}/{},{}/json",
            self.time_range(),
            self.parameter,
            self.location.0,
            self.location.1
        )
    }
}

/// Status and (possibly truncated) body of a provider response.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ProviderResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok_json(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

/// The provider could not be reached or the response could not be read.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub url: String,
    pub message: String,
}

impl TransportError {
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// Something that answers single-day weather queries.
///
/// Implementations issue exactly one request per call and report only
/// transport-level failures as errors; status handling and payload parsing
/// happen in the engine so every source is classified the same way.
pub trait WeatherDataSource: Send + Sync {
    fn fetch_day(
        &self,
        request: &DayRequest,
    ) -> impl Future<Output = Result<ProviderResponse, TransportError>> + Send;
}
