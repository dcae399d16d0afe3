//! HTTP response handling with Yandex Direct specific extensions.

use std::sync::LazyLock;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Create a response from its parts.
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub(crate) async fn from_reqwest(resp: reqwest::Response) -> Result<Self> {
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;
        Ok(Self::new(status, headers, body))
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Get the `RequestId` header value.
    pub fn request_id(&self) -> Option<&str> {
        self.header("requestid")
    }

    /// Get the Retry-After header as a Duration.
    pub fn retry_after(&self) -> Option<Duration> {
        parse_seconds(self.header("retry-after")?)
    }

    /// Get the `retryIn` header sent by the reports service while a report
    /// is being built.
    pub fn retry_in(&self) -> Option<Duration> {
        parse_seconds(self.header("retryin")?)
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Raw body bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Returns true if the body is empty or whitespace only.
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(|e| {
            Error::with_source(
                ErrorKind::Other("Failed to decode response as UTF-8".to_string()),
                e,
            )
        })
    }

    /// Deserialize the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }

    /// Get API points usage from the `Units` header.
    pub fn units(&self) -> Option<ApiUnits> {
        ApiUnits::parse(self.header("units")?)
    }

    /// Login whose points were charged (`Units-Used-Login` header).
    pub fn units_used_login(&self) -> Option<&str> {
        self.header("units-used-login")
    }
}

fn parse_seconds(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// API points usage reported in the `Units` header.
///
/// The header has the form `spent/available/daily_limit`, e.g. `10/20828/64000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiUnits {
    /// Points spent by this request.
    pub spent: u64,
    /// Points left for the day.
    pub available: u64,
    /// Daily points limit.
    pub daily_limit: u64,
}

impl ApiUnits {
    /// Parse the `Units` header value.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.trim().split('/');
        let spent = parts.next()?.trim().parse().ok()?;
        let available = parts.next()?.trim().parse().ok()?;
        let daily_limit = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            spent,
            available,
            daily_limit,
        })
    }

    /// Get the usage percentage of the daily limit.
    pub fn percentage(&self) -> f64 {
        if self.daily_limit == 0 {
            100.0
        } else {
            (self.daily_limit.saturating_sub(self.available) as f64 / self.daily_limit as f64)
                * 100.0
        }
    }

    /// Returns true if usage is above the given percentage threshold.
    pub fn is_above_threshold(&self, threshold_percent: f64) -> bool {
        self.percentage() >= threshold_percent
    }
}

/// Extension trait for processing Yandex Direct API responses.
pub trait ResponseExt: Sized {
    /// Convert HTTP failures and API error payloads into errors.
    fn check_direct_error(self) -> Result<Self>;
}

impl ResponseExt for Response {
    fn check_direct_error(self) -> Result<Response> {
        let request_id = self.request_id().map(str::to_string);

        if !self.is_success() {
            return Err(
                parse_error_response(self.status, &self.body, self.retry_after())
                    .with_request_id(request_id.as_deref()),
            );
        }

        if let Some(err) = embedded_api_error(self.status, &self.body) {
            return Err(err.with_request_id(request_id.as_deref()));
        }

        Ok(self)
    }
}

/// Map a non-success response to an error kind.
fn parse_error_response(status: u16, body: &[u8], retry_after: Option<Duration>) -> Error {
    if status == 429 {
        return Error::new(ErrorKind::RateLimited {
            retry_after,
            request_id: None,
        });
    }

    if let Some(err) = embedded_api_error(status, body) {
        return err;
    }

    let sanitized = sanitize_error_message(&String::from_utf8_lossy(body));
    let kind = match status {
        401 => ErrorKind::Authentication {
            message: sanitized,
            request_id: None,
        },
        403 => ErrorKind::Authorization {
            message: sanitized,
            request_id: None,
        },
        _ => ErrorKind::Http {
            status,
            message: sanitized,
            request_id: None,
        },
    };

    Error::new(kind)
}

/// Decode an API error object from a JSON body, if there is one.
///
/// Handles both the v5 envelope (`{"error": {...}}`) and the flat v4 form
/// (`{"error_code": .., "error_str": ..}`).
pub(crate) fn embedded_api_error(status: u16, body: &[u8]) -> Option<Error> {
    let first = body.iter().find(|b| !b.is_ascii_whitespace())?;
    if *first != b'{' {
        return None;
    }

    let envelope: ErrorEnvelope = serde_json::from_slice(body).ok()?;

    if let Some(err) = envelope.error {
        return Some(Error::new(ErrorKind::Api {
            error_code: err.error_code.map(ErrorCode::value).unwrap_or_default(),
            message: sanitize_error_message(
                err.error_string
                    .as_deref()
                    .unwrap_or("Yandex Direct API error"),
            ),
            detail: err
                .error_detail
                .filter(|d| !d.is_empty())
                .map(|d| sanitize_error_message(&d)),
            request_id: err.request_id,
            status,
        }));
    }

    let error_code = envelope.error_code?;
    Some(Error::new(ErrorKind::Api {
        error_code: error_code.value(),
        message: sanitize_error_message(
            envelope
                .error_str
                .as_deref()
                .unwrap_or("Yandex Direct API error"),
        ),
        detail: envelope
            .error_detail
            .filter(|d| !d.is_empty())
            .map(|d| sanitize_error_message(&d)),
        request_id: None,
        status,
    }))
}

static TOKEN_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"(Bearer|OAuth|bearer|oauth)\s+[A-Za-z0-9._\-]+")
        .expect("token pattern is valid")
});

static YANDEX_TOKEN_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"\b(y0_|AQAAAA)[A-Za-z0-9_\-]{16,}").expect("token pattern is valid")
});

/// Sanitize an error message to prevent exposing sensitive data.
///
/// Redacts anything that looks like an OAuth token and truncates messages
/// longer than 500 characters.
pub(crate) fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let sanitized = TOKEN_PATTERN.replace_all(message, "$1 [REDACTED]");
    let mut sanitized = YANDEX_TOKEN_PATTERN
        .replace_all(&sanitized, "[REDACTED_TOKEN]")
        .into_owned();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

/// Error code that may arrive as a number or as a numeric string
/// (the reports service uses strings).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorCode {
    Int(i64),
    Str(String),
}

impl ErrorCode {
    fn value(self) -> i64 {
        match self {
            ErrorCode::Int(code) => code,
            ErrorCode::Str(code) => code.trim().parse().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    request_id: Option<String>,
    error_code: Option<ErrorCode>,
    error_string: Option<String>,
    error_detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiErrorBody>,
    error_code: Option<ErrorCode>,
    error_str: Option<String>,
    error_detail: Option<String>,
}
