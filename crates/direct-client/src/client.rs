//! Core HTTP client with retry and Yandex Direct error handling.

use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::{Response, ResponseExt};
use crate::retry::RetryPolicy;

/// HTTP client for the Yandex Direct API with built-in retry and error handling.
#[derive(Debug, Clone)]
pub struct DirectHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl DirectHttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .danger_accept_invalid_certs(!config.verify_tls);

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    /// Execute a request with automatic retry handling.
    ///
    /// Transient failures are retried according to the configured
    /// [`RetryConfig`](crate::RetryConfig); once attempts run out the last
    /// error is returned as is.
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let mut retry_policy = self
            .config
            .retry
            .as_ref()
            .map(|c| RetryPolicy::new(c.clone()));

        loop {
            let result = self
                .execute_once(&request)
                .await
                .and_then(ResponseExt::check_direct_error);

            let err = match result {
                Ok(response) => return Ok(response),
                Err(err) => err,
            };

            let Some(policy) = retry_policy.as_mut() else {
                return Err(err);
            };

            if !policy.config().is_retryable(&err) {
                return Err(err);
            }

            match policy.next_delay(err.retry_after()) {
                Some(delay) => {
                    warn!(
                        attempt = policy.attempt(),
                        max_attempts = policy.config().max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    warn!(
                        attempts = policy.attempt() + 1,
                        error = %err,
                        "Retry attempts exhausted"
                    );
                    return Err(err);
                }
            }
        }
    }

    /// Execute a single request without retry logic.
    async fn execute_once(&self, request: &RequestBuilder) -> Result<Response> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url);

        if let Some(ref token) = request.bearer_token {
            req = req.bearer_auth(token);
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = req.body(serde_json::to_vec(body)?);
        }

        debug!(method = ?request.method, url = %request.url, "Sending request");

        let response = Response::from_reqwest(req.send().await?).await?;

        let status = response.status();
        let content_length = response.bytes().len();
        if response.is_success() {
            debug!(status, content_length, request_id = ?response.request_id(), "Response received");
        } else {
            info!(status, content_length, request_id = ?response.request_id(), "Non-success response");
        }

        Ok(response)
    }
}
