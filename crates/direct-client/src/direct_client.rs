//! High-level Yandex Direct client with JSON method calls.
//!
//! This module provides `DirectClient`, which combines credentials with
//! an HTTP client and turns `service.method(params)` calls into POST requests.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Request parameters are kept out of tracing spans; they are only
//!   emitted as debug events when `log_requests` is enabled

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, instrument};

use crate::client::DirectHttpClient;
use crate::config::ClientConfig;
use crate::credentials::DirectCredentials;
use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestBuilder;
use crate::response::{ApiUnits, Response};

/// High-level Yandex Direct API client.
///
/// Cloning is cheap: the underlying connection pool is shared.
///
/// # Example
///
/// ```rust,ignore
/// use yandex_direct_client::{DirectClient, DirectCredentials};
/// use serde_json::json;
///
/// let client = DirectClient::new(DirectCredentials::from_env()?)?;
///
/// let result = client
///     .call("campaigns", "get", json!({
///         "SelectionCriteria": {},
///         "FieldNames": ["Id", "Name"],
///     }))
///     .await?;
///
/// // or through the per-service proxy
/// let result = client
///     .campaigns()
///     .get(json!({"SelectionCriteria": {}, "FieldNames": ["Id"]}))
///     .await?;
/// ```
#[derive(Clone)]
pub struct DirectClient {
    http: DirectHttpClient,
    credentials: DirectCredentials,
}

impl std::fmt::Debug for DirectClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectClient")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// Decoded result of a call together with response metadata.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The `result` member of the payload (or the whole payload).
    pub result: Value,
    /// Value of the `RequestId` header.
    pub request_id: Option<String>,
    /// Points usage from the `Units` header.
    pub units: Option<ApiUnits>,
}

impl DirectClient {
    /// Create a client with the default configuration.
    pub fn new(credentials: DirectCredentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(credentials: DirectCredentials, config: ClientConfig) -> Result<Self> {
        url::Url::parse(credentials.api_url())?;
        url::Url::parse(credentials.reports_url())?;
        url::Url::parse(credentials.v4_url())?;

        let http = DirectHttpClient::new(config)?;
        Ok(Self { http, credentials })
    }

    /// Get the credentials.
    pub fn credentials(&self) -> &DirectCredentials {
        &self.credentials
    }

    /// Get the HTTP client configuration.
    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// Get the underlying HTTP client.
    pub fn http_client(&self) -> &DirectHttpClient {
        &self.http
    }

    /// URL of a v5 service endpoint. Service names are lowercased.
    pub fn service_url(&self, service: &str) -> String {
        format!("{}/{}", self.credentials.api_url(), service.to_lowercase())
    }

    /// Create a POST request builder carrying the authentication headers.
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.http.post(url).headers(self.credentials.headers())
    }

    /// Execute a request (with retries) and return the raw response.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        self.http.execute(request).await
    }

    /// Call `method` on `service` and return the `result` member of the
    /// response.
    ///
    /// `Value::Null` params are sent as an empty object.
    pub async fn call(&self, service: &str, method: &str, params: Value) -> Result<Value> {
        Ok(self.call_with_meta(service, method, params).await?.result)
    }

    /// Like [`call`](Self::call), but deserializes the result into `T`.
    pub async fn call_as<T: DeserializeOwned, P: Serialize>(
        &self,
        service: &str,
        method: &str,
        params: &P,
    ) -> Result<T> {
        let params = serde_json::to_value(params)?;
        let result = self.call(service, method, params).await?;
        serde_json::from_value(result).map_err(Into::into)
    }

    /// Call `method` on `service` and return the result with response metadata.
    #[instrument(skip(self, params))]
    pub async fn call_with_meta(
        &self,
        service: &str,
        method: &str,
        params: Value,
    ) -> Result<ApiResponse> {
        let params = if params.is_null() { json!({}) } else { params };

        if self.config().log_requests {
            debug!(service, method, params = %params, "Request");
        }

        let url = self.service_url(service);
        let request = self
            .post(&url)
            .json_value(json!({ "method": method, "params": params }));

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                if matches!(err.kind, ErrorKind::Timeout | ErrorKind::Connection(_)) {
                    error!(service, method, error = %err, "Transport error");
                }
                return Err(err);
            }
        };

        let payload: Value = if response.is_empty() {
            json!({})
        } else {
            response.json()?
        };

        let result = match payload {
            Value::Object(mut map) => match map.remove("result") {
                Some(result) => result,
                None => Value::Object(map),
            },
            other => other,
        };

        if self.config().log_responses {
            debug!(service, method, result = %result, "Response");
        }

        Ok(ApiResponse {
            result,
            request_id: response.request_id().map(str::to_string),
            units: response.units(),
        })
    }

    /// Call `get` on `service` and follow `LimitedBy` paging until every
    /// object has been fetched, concatenating `result[items_key]`.
    #[instrument(skip(self, params))]
    pub async fn get_all(&self, service: &str, params: Value, items_key: &str) -> Result<Vec<Value>> {
        let mut params = match params {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            _ => {
                return Err(Error::new(ErrorKind::Serialization(
                    "get params must be a JSON object".to_string(),
                )))
            }
        };

        let mut items = Vec::new();
        let mut offset: u64 = 0;

        loop {
            if offset > 0 {
                let page = params
                    .entry("Page")
                    .or_insert_with(|| json!({}));
                match page {
                    Value::Object(page) => {
                        page.insert("Offset".to_string(), json!(offset));
                    }
                    other => *other = json!({ "Offset": offset }),
                }
            }

            let mut result = self
                .call(service, "get", Value::Object(params.clone()))
                .await?;

            if let Some(Value::Array(batch)) = result.get_mut(items_key).map(Value::take) {
                items.extend(batch);
            }

            match result.get("LimitedBy").and_then(Value::as_u64) {
                Some(limited_by) if limited_by > offset => {
                    debug!(limited_by, fetched = items.len(), "Fetching next page");
                    offset = limited_by;
                }
                _ => break,
            }
        }

        Ok(items)
    }

    /// `ads.get` with the given selection criteria and field names.
    pub async fn get_ads(&self, selection_criteria: Value, field_names: &[&str]) -> Result<Value> {
        self.ads()
            .get(json!({ "SelectionCriteria": selection_criteria, "FieldNames": field_names }))
            .await
    }

    /// `campaigns.get` with the given selection criteria and field names.
    pub async fn get_campaigns(
        &self,
        selection_criteria: Value,
        field_names: &[&str],
    ) -> Result<Value> {
        self.campaigns()
            .get(json!({ "SelectionCriteria": selection_criteria, "FieldNames": field_names }))
            .await
    }

    /// `adgroups.get` with the given selection criteria and field names.
    pub async fn get_ad_groups(
        &self,
        selection_criteria: Value,
        field_names: &[&str],
    ) -> Result<Value> {
        self.adgroups()
            .get(json!({ "SelectionCriteria": selection_criteria, "FieldNames": field_names }))
            .await
    }
}
