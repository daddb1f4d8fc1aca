//! Historical same-day weather exceedance probabilities.
//!
//! Pick a location and a calendar day; [`Nimbus`] asks a weather provider for
//! that day in each of the last N years, reduces every day to the mean of its
//! readings and reports how often a threshold was exceeded.

mod analysis;
mod error;
mod export;
mod nimbus;
mod probability;
mod projection;
mod types;
mod weather_data;

pub use error::NimbusError;
pub use nimbus::*;

pub use analysis::{Analysis, VariableAnalysis};
pub use export::{merge_series, write_csv, DATE_COLUMN};
pub use probability::{
    exceedance_probability, exceeding_samples, ExceedanceBand, ExceedanceReport,
};
pub use projection::YearProjection;

pub use types::anchor_date::AnchorDate;
pub use types::outcome::{FetchOutcome, FetchSummary, YearError};
pub use types::series::{HistoricalSeries, YearSample};
pub use types::session::SessionState;
pub use types::variable::VariableSpec;

pub use weather_data::error::{FetchError, FetchErrorKind, ERROR_BODY_EXCERPT_CHARS};
pub use weather_data::meteomatics::{
    Credentials, MeteomaticsSource, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT,
};
pub use weather_data::source::{DayRequest, ProviderResponse, TransportError, WeatherDataSource};

pub use tokio_util::sync::CancellationToken;
