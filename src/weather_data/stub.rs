//! In-memory [`WeatherDataSource`] used by the test suites.

use crate::weather_data::source::{DayRequest, ProviderResponse, TransportError, WeatherDataSource};
use chrono::Datelike;
use reqwest::StatusCode;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub(crate) enum StubReply {
    /// Successful payload with the given readings (`None` becomes JSON null).
    Readings(Vec<Option<f64>>),
    Status(StatusCode, String),
    Transport(String),
    Raw(String),
    Slow(Duration, f64),
}

impl StubReply {
    pub(crate) fn value(value: f64) -> Self {
        StubReply::Readings(vec![Some(value)])
    }
}

pub(crate) fn payload(readings: &[Option<f64>]) -> String {
    let dates: Vec<_> = readings
        .iter()
        .enumerate()
        .map(|(hour, value)| json!({ "date": format!("T{hour:02}:00:00Z"), "value": value }))
        .collect();
    json!({
        "version": "3.0",
        "data": [{
            "parameter": "stub",
            "coordinates": [{ "lat": 0.0, "lon": 0.0, "dates": dates }]
        }]
    })
    .to_string()
}

/// Replies per `(parameter, year)`, falling back to a per-parameter and then a
/// global default. Unknown requests get a 404.
#[derive(Debug, Default)]
pub(crate) struct StubSource {
    replies: HashMap<(String, i32), StubReply>,
    parameter_defaults: HashMap<String, StubReply>,
    fallback: Option<StubReply>,
    calls: Mutex<Vec<DayRequest>>,
}

impl StubSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, parameter: &str, year: i32, reply: StubReply) -> Self {
        self.replies.insert((parameter.to_string(), year), reply);
        self
    }

    pub(crate) fn parameter_default(mut self, parameter: &str, reply: StubReply) -> Self {
        self.parameter_defaults.insert(parameter.to_string(), reply);
        self
    }

    pub(crate) fn fallback(mut self, reply: StubReply) -> Self {
        self.fallback = Some(reply);
        self
    }

    pub(crate) fn calls(&self) -> Vec<DayRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn reply_for(&self, request: &DayRequest) -> Option<StubReply> {
        self.replies
            .get(&(request.parameter.clone(), request.date.year()))
            .or_else(|| self.parameter_defaults.get(&request.parameter))
            .or(self.fallback.as_ref())
            .cloned()
    }
}

impl WeatherDataSource for StubSource {
    async fn fetch_day(&self, request: &DayRequest) -> Result<ProviderResponse, TransportError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }
        let reply = self.reply_for(request);
        match reply {
            Some(StubReply::Readings(readings)) => Ok(ProviderResponse::ok_json(payload(&readings))),
            Some(StubReply::Status(status, body)) => Ok(ProviderResponse::new(status, body)),
            Some(StubReply::Transport(message)) => Err(TransportError::new(request.path(), message)),
            Some(StubReply::Raw(body)) => Ok(ProviderResponse::ok_json(body)),
            Some(StubReply::Slow(delay, value)) => {
                tokio::time::sleep(delay).await;
                Ok(ProviderResponse::ok_json(payload(&[Some(value)])))
            }
            None => Ok(ProviderResponse::new(StatusCode::NOT_FOUND, "not stubbed")),
        }
    }
}
