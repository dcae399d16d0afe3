//! Legacy v4 Live JSON endpoint.
//!
//! A handful of operations (forecasts, wordstat, finance) are only served by
//! v4. Requests go to a single URL with the method name in the body, and
//! errors come back as top-level `error_code`/`error_str`/`error_detail`
//! members, which the transport maps to [`ErrorKind::Api`](crate::ErrorKind::Api).

use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::direct_client::DirectClient;
use crate::error::Result;

impl DirectClient {
    /// Call a v4 Live method and return its `data` member (or the full
    /// payload when there is none).
    #[instrument(skip(self, param))]
    pub async fn call_v4(&self, method: &str, param: Value) -> Result<Value> {
        let credentials = self.credentials();

        let mut body = json!({ "method": method, "locale": credentials.locale() });
        if !param.is_null() {
            body["param"] = param;
        }

        if self.config().log_requests {
            debug!(method, body = %body, "v4 request");
        }

        let request = self
            .http_client()
            .post(credentials.v4_url())
            .bearer_auth(credentials.access_token())
            .header("Accept-Language", credentials.locale())
            .json_value(body);

        let response = self.execute(request).await?;
        let payload: Value = if response.is_empty() {
            json!({})
        } else {
            response.json()?
        };

        Ok(match payload {
            Value::Object(mut map) => match map.remove("data") {
                Some(data) => data,
                None => Value::Object(map),
            },
            other => other,
        })
    }
}
