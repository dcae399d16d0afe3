//! HTTP request building.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Result;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Post,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Post => reqwest::Method::POST,
        }
    }
}

/// Builder for HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<serde_json::Value>,
    pub(crate) bearer_token: Option<String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            bearer_token: None,
        }
    }

    /// The target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Set the bearer token for authentication.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Add a header, replacing an existing value with the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add several headers. Later entries replace earlier ones.
    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Set JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        self.body = Some(value);
        self.headers
            .entry("Content-Type".to_string())
            .or_insert_with(|| "application/json; charset=utf-8".to_string());
        Ok(self)
    }

    /// Set raw JSON body.
    pub fn json_value(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self.headers
            .entry("Content-Type".to_string())
            .or_insert_with(|| "application/json; charset=utf-8".to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = RequestBuilder::new(RequestMethod::Post, "https://example.com/json/v5/ads")
            .bearer_auth("token123")
            .header("Client-Login", "agency-client");

        assert_eq!(req.method, RequestMethod::Post);
        assert_eq!(req.url(), "https://example.com/json/v5/ads");
        assert_eq!(req.bearer_token, Some("token123".to_string()));
        assert_eq!(
            req.headers.get("Client-Login"),
            Some(&"agency-client".to_string())
        );
    }

    #[test]
    fn test_headers_override() {
        let req = RequestBuilder::new(RequestMethod::Post, "https://example.com")
            .headers([("skipReportHeader", "true"), ("processingMode", "auto")])
            .headers([("processingMode", "offline")]);

        assert_eq!(req.headers.get("skipReportHeader").map(String::as_str), Some("true"));
        assert_eq!(req.headers.get("processingMode").map(String::as_str), Some("offline"));
    }

    #[test]
    fn test_json_body_keeps_explicit_content_type() {
        let data = serde_json::json!({"method": "get", "params": {}});
        let req = RequestBuilder::new(RequestMethod::Post, "https://example.com")
            .json(&data)
            .unwrap();

        assert_eq!(req.body.as_ref(), Some(&data));
        assert_eq!(
            req.headers.get("Content-Type").map(String::as_str),
            Some("application/json; charset=utf-8")
        );

        let req = RequestBuilder::new(RequestMethod::Post, "https://example.com")
            .header("Content-Type", "application/json")
            .json_value(data);
        assert_eq!(
            req.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }
}
