//! Turns a provider JSON payload into readings and reduces them to one value.

use crate::weather_data::error::FetchError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Payload {
    data: Vec<ParameterBlock>,
}

#[derive(Debug, Deserialize)]
struct ParameterBlock {
    coordinates: Vec<CoordinateBlock>,
}

#[derive(Debug, Deserialize)]
struct CoordinateBlock {
    dates: Vec<Reading>,
}

#[derive(Debug, Deserialize)]
struct Reading {
    #[allow(dead_code)]
    date: String,
    #[serde(default)]
    value: Option<f64>,
}

/// Values of every reading of the first parameter at the first coordinate.
///
/// Readings whose value is null or missing are skipped. Any other deviation from
/// `{ data: [ { coordinates: [ { dates: [ {date, value} ] } ] } ] }` is a
/// [`FetchError::Parse`].
pub(crate) fn extract_readings(body: &[u8]) -> Result<Vec<f64>, FetchError> {
    let payload: Payload =
        serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))?;
    let block = payload
        .data
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Parse("payload has no data blocks".to_string()))?;
    let coordinate = block
        .coordinates
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Parse("data block has no coordinates".to_string()))?;
    Ok(coordinate
        .dates
        .into_iter()
        .filter_map(|reading| reading.value)
        .collect())
}

/// Arithmetic mean, or [`FetchError::NoNumericValues`] for an empty slice.
pub(crate) fn mean(values: &[f64]) -> Result<f64, FetchError> {
    if values.is_empty() {
        return Err(FetchError::NoNumericValues);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Parses a successful payload and returns the mean of its readings.
pub(crate) fn reduce_payload(body: &[u8]) -> Result<f64, FetchError> {
    let readings = extract_readings(body)?;
    mean(&readings)
}
