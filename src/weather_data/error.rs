use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Maximum number of characters of a provider error body kept for diagnostics.
pub const ERROR_BODY_EXCERPT_CHARS: usize = 300;

/// Why a single year produced no sample.
///
/// Every variant is recovered inside the per-year fetch and reported next to the
/// year that caused it; none of them aborts a multi-year run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("{month:02}-{day:02} does not exist in {year}")]
    InvalidDateForYear { year: i32, month: u32, day: u32 },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP {status}: {body_excerpt}")]
    Provider {
        status: StatusCode,
        body_excerpt: String,
    },

    #[error("No numeric values returned for this date")]
    NoNumericValues,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Cancelled before the request was sent")]
    Cancelled,
}

/// Stable category of a [`FetchError`], suitable for grouping and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    InvalidDateForYear,
    TransportError,
    ProviderError,
    NoNumericValues,
    ParseError,
    Cancelled,
}

impl FetchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::InvalidDateForYear => "invalid_date_for_year",
            FetchErrorKind::TransportError => "transport_error",
            FetchErrorKind::ProviderError => "provider_error",
            FetchErrorKind::NoNumericValues => "no_numeric_values",
            FetchErrorKind::ParseError => "parse_error",
            FetchErrorKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::InvalidDateForYear { .. } => FetchErrorKind::InvalidDateForYear,
            FetchError::Transport { .. } => FetchErrorKind::TransportError,
            FetchError::Provider { .. } => FetchErrorKind::ProviderError,
            FetchError::NoNumericValues => FetchErrorKind::NoNumericValues,
            FetchError::Parse(_) => FetchErrorKind::ParseError,
            FetchError::Cancelled => FetchErrorKind::Cancelled,
        }
    }

    /// Builds a [`FetchError::Provider`], keeping at most
    /// [`ERROR_BODY_EXCERPT_CHARS`] characters of the body.
    pub(crate) fn provider(status: StatusCode, body: &[u8]) -> Self {
        let body_excerpt = String::from_utf8_lossy(body)
            .chars()
            .take(ERROR_BODY_EXCERPT_CHARS)
            .collect();
        FetchError::Provider {
            status,
            body_excerpt,
        }
    }
}
