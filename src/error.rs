use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NimbusError {
    #[error("Coordinate out of range: lat {lat}, lon {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("Years back must be at least 1")]
    ZeroYearsBack,

    #[error("Parameter code must not be empty")]
    EmptyParameter,

    #[error("Select at least one weather variable")]
    NoVariablesSelected,

    #[error("Could not parse anchor date '{0}'")]
    DateParsingError(String),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
