//! Error types for direct-client.

use std::time::Duration;

/// Result type alias for direct-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for direct-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this error is retryable under the default retry sets.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Returns true if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.kind, ErrorKind::RateLimited { .. })
    }

    /// Returns true if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication { .. })
    }

    /// Returns the retry-after duration if this is a rate limit error.
    pub fn retry_after(&self) -> Option<Duration> {
        match &self.kind {
            ErrorKind::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// HTTP status code of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Api { status, .. } => Some(*status),
            ErrorKind::Http { status, .. } => Some(*status),
            ErrorKind::RateLimited { .. } => Some(429),
            ErrorKind::Authentication { .. } => Some(401),
            ErrorKind::Authorization { .. } => Some(403),
            _ => None,
        }
    }

    /// Value of the `RequestId` header (or the `request_id` of the error
    /// payload) of the failed response.
    pub fn request_id(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Api { request_id, .. }
            | ErrorKind::Http { request_id, .. }
            | ErrorKind::RateLimited { request_id, .. }
            | ErrorKind::Authentication { request_id, .. }
            | ErrorKind::Authorization { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// Application error code reported by the API.
    pub fn error_code(&self) -> Option<i64> {
        match &self.kind {
            ErrorKind::Api { error_code, .. } => Some(*error_code),
            _ => None,
        }
    }

    /// Attach a request id to the error if it doesn't carry one yet.
    pub(crate) fn with_request_id(mut self, id: Option<&str>) -> Self {
        let Some(id) = id else {
            return self;
        };
        match &mut self.kind {
            ErrorKind::Api { request_id, .. }
            | ErrorKind::Http { request_id, .. }
            | ErrorKind::RateLimited { request_id, .. }
            | ErrorKind::Authentication { request_id, .. }
            | ErrorKind::Authorization { request_id, .. } => {
                if request_id.is_none() {
                    *request_id = Some(id.to_string());
                }
            }
            _ => {}
        }
        self
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The API answered with an `error` object.
    #[error("Yandex Direct API error {error_code}: {message}{}", detail.as_ref().map(|d| format!(" ({d})")).unwrap_or_default())]
    Api {
        error_code: i64,
        message: String,
        detail: Option<String>,
        request_id: Option<String>,
        status: u16,
    },

    /// HTTP request failed without a decodable API error.
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        message: String,
        request_id: Option<String>,
    },

    /// Rate limit exceeded (HTTP 429).
    #[error("Rate limited{}", retry_after.map(|d| format!(", retry after {:?}", d)).unwrap_or_default())]
    RateLimited {
        retry_after: Option<Duration>,
        request_id: Option<String>,
    },

    /// Authentication error (HTTP 401).
    #[error("Authentication error: {message}")]
    Authentication {
        message: String,
        request_id: Option<String>,
    },

    /// Authorization error (HTTP 403).
    #[error("Authorization error: {message}")]
    Authorization {
        message: String,
        request_id: Option<String>,
    },

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Service name is not part of the v5 registry.
    #[error("Unknown service: {0}")]
    UnknownService(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl ErrorKind {
    /// Returns true if this error kind is retryable under the default sets.
    pub fn is_retryable(&self) -> bool {
        match self {
            ErrorKind::RateLimited { .. } => true,
            ErrorKind::Timeout => true,
            ErrorKind::Connection(_) => true,
            ErrorKind::Http { status, .. } => {
                crate::retry::DEFAULT_RETRYABLE_HTTP_CODES.contains(status)
            }
            ErrorKind::Api {
                error_code, status, ..
            } => {
                crate::retry::DEFAULT_RETRYABLE_ERROR_CODES.contains(error_code)
                    || crate::retry::DEFAULT_RETRYABLE_HTTP_CODES.contains(status)
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            ErrorKind::Http {
                status: status.as_u16(),
                message: err.to_string(),
                request_id: None,
            }
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}
