//! HTTP [`DistanceQuery`] backed by the Google Distance Matrix API.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use optipath_core::{BatchCells, DistanceBatch, DistanceQuery, DistanceQueryError, Location};
use reqwest::Client;
use url::Url;

use super::google::DistanceMatrixResponse;

/// Error type for [`HttpDistanceQueryClient`] construction failures.
#[derive(Debug)]
pub enum ClientBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// The configured base URL could not be parsed.
    InvalidBaseUrl(url::ParseError),
    /// No API key was configured.
    MissingApiKey,
}

impl std::fmt::Display for ClientBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::InvalidBaseUrl(err) => write!(f, "invalid distance service URL: {err}"),
            Self::MissingApiKey => f.write_str("a distance service API key is required"),
        }
    }
}

impl std::error::Error for ClientBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::InvalidBaseUrl(err) => Some(err),
            Self::MissingApiKey => None,
        }
    }
}

/// Default Distance Matrix endpoint.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Default user agent for distance requests.
pub const DEFAULT_USER_AGENT: &str = "optipath-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const REDACTED: &str = "<redacted>";

/// Configuration for [`HttpDistanceQueryClient`].
///
/// `Debug` output never includes the API key.
#[derive(Clone)]
pub struct HttpDistanceQueryConfig {
    /// Distance Matrix endpoint.
    pub base_url: String,
    /// Credential sent as the `key` query parameter.
    pub api_key: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpDistanceQueryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDistanceQueryConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &REDACTED)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpDistanceQueryConfig {
    /// Create a configuration for the default endpoint with the given key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Point the client at a different endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Distance query client issuing one HTTP request per batch.
///
/// The client holds a pooled [`reqwest::Client`], so concurrent batches
/// share connections. Errors carry the request URL with the key replaced
/// by `<redacted>`.
pub struct HttpDistanceQueryClient {
    client: Client,
    config: HttpDistanceQueryConfig,
    base_url: Url,
}

impl std::fmt::Debug for HttpDistanceQueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDistanceQueryClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpDistanceQueryClient {
    /// Create a client for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpDistanceQueryConfig::new(api_key))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank, the base URL does not parse, or
    /// the HTTP client fails to build.
    pub fn with_config(config: HttpDistanceQueryConfig) -> Result<Self, ClientBuildError> {
        if config.api_key.trim().is_empty() {
            return Err(ClientBuildError::MissingApiKey);
        }
        let base_url = Url::parse(&config.base_url).map_err(ClientBuildError::InvalidBaseUrl)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Build the request URL for a batch.
    ///
    /// Origins and destinations are `|`-separated; the query encoder escapes
    /// any separators inside the location text.
    fn build_request_url(&self, batch: &DistanceBatch<'_>, api_key: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("origins", &join_locations(batch.origins))
            .append_pair("destinations", &join_locations(batch.destinations))
            .append_pair("key", api_key);
        url
    }

    /// Fetch and decode the response for a batch.
    async fn fetch(&self, batch: &DistanceBatch<'_>) -> Result<BatchCells, DistanceQueryError> {
        let url = self.build_request_url(batch, &self.config.api_key);
        let shown = self.build_request_url(batch, REDACTED).to_string();
        debug!(
            "requesting {}x{} distance batch at ({}, {})",
            batch.origins.len(),
            batch.destinations.len(),
            batch.origin_offset,
            batch.destination_offset
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &shown))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, &shown))?;

        let body: DistanceMatrixResponse =
            response
                .json()
                .await
                .map_err(|err| DistanceQueryError::ParseError {
                    message: err.without_url().to_string(),
                })?;

        body.into_cells(batch)
    }

    /// Convert a reqwest error to a `DistanceQueryError`.
    ///
    /// The error's embedded URL holds the key, so it is stripped before
    /// formatting.
    fn convert_reqwest_error(&self, error: reqwest::Error, url: &str) -> DistanceQueryError {
        if error.is_timeout() {
            return DistanceQueryError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        let status = error.status();
        let message = error.without_url().to_string();
        if let Some(status) = status {
            return DistanceQueryError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message,
            };
        }

        DistanceQueryError::NetworkError {
            url: url.to_owned(),
            message,
        }
    }
}

fn join_locations(locations: &[Location]) -> String {
    locations
        .iter()
        .map(Location::as_str)
        .collect::<Vec<_>>()
        .join("|")
}

#[async_trait]
impl DistanceQuery for HttpDistanceQueryClient {
    async fn query(&self, batch: DistanceBatch<'_>) -> Result<BatchCells, DistanceQueryError> {
        if batch.is_empty() {
            return Err(DistanceQueryError::EmptyBatch);
        }
        self.fetch(&batch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optipath_core::test_support::locations;
    use rstest::{fixture, rstest};

    #[fixture]
    fn client() -> HttpDistanceQueryClient {
        HttpDistanceQueryClient::new("secret-key").expect("client should build")
    }

    fn query_value(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    #[rstest]
    fn build_request_url_joins_locations(client: HttpDistanceQueryClient) {
        let places = locations(3);
        let batch = DistanceBatch {
            origins: &places[..2],
            destinations: &places[2..],
            origin_offset: 0,
            destination_offset: 2,
        };

        let url = client.build_request_url(&batch, "secret-key");

        assert!(url.as_str().starts_with(DEFAULT_BASE_URL));
        assert_eq!(
            query_value(&url, "origins").as_deref(),
            Some("Location 0|Location 1")
        );
        assert_eq!(query_value(&url, "destinations").as_deref(), Some("Location 2"));
        assert_eq!(query_value(&url, "key").as_deref(), Some("secret-key"));
    }

    #[rstest]
    fn redacted_url_hides_key(client: HttpDistanceQueryClient) {
        let places = locations(2);
        let batch = DistanceBatch {
            origins: &places,
            destinations: &places,
            origin_offset: 0,
            destination_offset: 0,
        };

        let shown = client.build_request_url(&batch, REDACTED).to_string();

        assert!(!shown.contains("secret-key"));
    }

    #[rstest]
    fn debug_output_hides_key(client: HttpDistanceQueryClient) {
        let rendered = format!("{client:?}");

        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains(REDACTED));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_key_is_rejected(#[case] key: &str) {
        let err = HttpDistanceQueryClient::new(key).expect_err("should fail");
        assert!(matches!(err, ClientBuildError::MissingApiKey));
    }

    #[rstest]
    fn invalid_base_url_is_rejected() {
        let config = HttpDistanceQueryConfig::new("key").with_base_url("not a url");

        let err = HttpDistanceQueryClient::with_config(config).expect_err("should fail");

        assert!(matches!(err, ClientBuildError::InvalidBaseUrl(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn empty_batch_returns_error(client: HttpDistanceQueryClient) {
        let places = locations(1);
        let batch = DistanceBatch {
            origins: &places,
            destinations: &[],
            origin_offset: 0,
            destination_offset: 0,
        };

        let err = client.query(batch).await.expect_err("should fail");

        assert_eq!(err, DistanceQueryError::EmptyBatch);
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpDistanceQueryConfig::new("key")
            .with_base_url("http://localhost:8080/matrix")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://localhost:8080/matrix");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }
}
