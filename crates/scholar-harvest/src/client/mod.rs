//! Shared HTTP client for the metadata sources.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - One User-Agent for every source
//! - Uniform status code mapping

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};

/// Query parameters as owned key/value pairs.
pub type QueryParams = Vec<(String, String)>;

/// HTTP client used by every [`crate::sources::MetadataSource`].
#[derive(Clone)]
pub struct HarvestClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Endpoints and tuning.
    config: Config,
}

impl HarvestClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if an endpoint is not an absolute URL or HTTP client
    /// initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        for endpoint in [&config.arxiv_api_url, &config.crossref_api_url, &config.archive_api_url] {
            url::Url::parse(endpoint)
                .map_err(|e| anyhow::anyhow!("invalid endpoint URL '{endpoint}': {e}"))?;
        }

        let client = Client::builder()
            .user_agent(api::USER_AGENT)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client, config })
    }

    /// Configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// GET `url` and return the body as text.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-success status.
    pub async fn get_text(&self, url: &str, params: &[(String, String)]) -> ClientResult<String> {
        tracing::debug!(url, params = params.len(), "GET");
        let response = self.client.get(url).query(params).send().await?;
        let response = Self::handle_response(response).await?;
        Ok(response.text().await?)
    }

    /// GET `url` and parse the body as untyped JSON.
    ///
    /// Callers pick the payload apart themselves so one bad item never
    /// fails the whole response.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-success status, or a body
    /// that is not JSON.
    pub async fn get_json(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> ClientResult<serde_json::Value> {
        let body = self.get_text(url, params).await?;
        serde_json::from_str(&body).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

impl std::fmt::Debug for HarvestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarvestClient").field("config", &self.config).finish()
    }
}

/// Build an owned parameter list from borrowed pairs.
#[must_use]
pub fn params<const N: usize>(pairs: [(&str, String); N]) -> QueryParams {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}
