//! Error types for yandex-direct-reports.

use std::time::Duration;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// True if the report was accepted but is still being generated.
    pub fn is_pending(&self) -> bool {
        matches!(self.kind, ErrorKind::Pending { .. })
    }

    /// Request id reported by the API, if any.
    pub fn request_id(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Pending { request_id, .. } | ErrorKind::Timeout { request_id, .. } => {
                request_id.as_deref()
            }
            _ => self.client_error().and_then(|e| e.request_id()),
        }
    }

    /// The underlying client error, when the failure came from the HTTP call.
    pub fn client_error(&self) -> Option<&yandex_direct_client::Error> {
        self.source
            .as_ref()
            .and_then(|source| source.downcast_ref::<yandex_direct_client::Error>())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),

    /// The service answered 201/202: the report is queued or being built.
    #[error("Report is being generated{}", retry_in.map(|d| format!(", retry in {}s", d.as_secs())).unwrap_or_default())]
    Pending {
        request_id: Option<String>,
        retry_in: Option<Duration>,
    },

    /// The report did not become ready within the allowed attempts.
    #[error("{message}")]
    Timeout {
        message: String,
        request_id: Option<String>,
        retry_in: Option<Duration>,
    },

    #[error("Invalid report definition: {0}")]
    Definition(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("{0}")]
    Other(String),
}

impl From<yandex_direct_client::Error> for Error {
    fn from(err: yandex_direct_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error {
            kind: ErrorKind::Csv(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Definition(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
