//! [`WeatherDataSource`] backed by the Meteomatics REST API.

use crate::weather_data::source::{DayRequest, ProviderResponse, TransportError, WeatherDataSource};
use crate::NimbusError;
use bon::bon;
use log::{debug, warn};
use reqwest::{Client, Response};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.meteomatics.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(12);
/// Upper bound on how much of a non-success body is buffered.
const MAX_ERROR_BODY_BYTES: usize = 4096;

/// HTTP basic auth credentials for the provider. Supplied by the caller; this
/// crate never stores them.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Queries `GET {base_url}/{start}--{end}/{parameter}/{lat},{lon}/json`.
#[derive(Debug, Clone)]
pub struct MeteomaticsSource {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

#[bon]
impl MeteomaticsSource {
    /// Creates a source with its own pooled HTTP client.
    ///
    /// * `.credentials(Credentials)`: **Required.**
    /// * `.base_url(String)`: Optional. Defaults to [`DEFAULT_BASE_URL`].
    /// * `.timeout(Duration)`: Optional. Per-request timeout, defaults to [`DEFAULT_REQUEST_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::HttpClient`] if the TLS backend cannot be initialised.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use nimbus::{Credentials, MeteomaticsSource, NimbusError};
    /// # use std::time::Duration;
    /// # fn main() -> Result<(), NimbusError> {
    /// let source = MeteomaticsSource::builder()
    ///     .credentials(Credentials::new("user", "secret"))
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn new(
        credentials: Credentials,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, NimbusError> {
        let timeout = timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(NimbusError::HttpClient)?;
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, request: &DayRequest) -> String {
        format!("{}/{}", self.base_url, request.path())
    }
}

impl WeatherDataSource for MeteomaticsSource {
    async fn fetch_day(&self, request: &DayRequest) -> Result<ProviderResponse, TransportError> {
        let url = self.url_for(request);
        debug!("Requesting {}", url);

        let mut response = self
            .client
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        let body = if status.is_success() {
            response
                .bytes()
                .await
                .map_err(|e| transport_error(&url, e))?
                .to_vec()
        } else {
            warn!("HTTP {} for {}", status, url);
            read_capped(&mut response, MAX_ERROR_BODY_BYTES).await
        };

        Ok(ProviderResponse { status, body })
    }
}

fn transport_error(url: &str, error: reqwest::Error) -> TransportError {
    let message = if error.is_timeout() {
        "request timed out".to_string()
    } else {
        error.to_string()
    };
    TransportError::new(url, message)
}

/// Reads at most `limit` bytes of an error body. The status is what matters,
/// so a body that breaks off keeps whatever arrived before the break.
async fn read_capped(response: &mut Response, limit: usize) -> Vec<u8> {
    let mut body = Vec::new();
    while body.len() < limit {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let remaining = limit - body.len();
                body.extend_from_slice(&chunk[..chunk.len().min(remaining)]);
            }
            Ok(None) => break,
            Err(e) => {
                debug!("Error body cut short after {} bytes: {}", body.len(), e);
                break;
            }
        }
    }
    body
}
