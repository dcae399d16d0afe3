//! Error types for yandex-direct-v5.

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

    /// The underlying client error, when the failure came from the API call.
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
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("JSON error: {0}")]
    Json(String),
}

/// A request parameter failed local validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<yandex_direct_client::Error> for Error {
    fn from(err: yandex_direct_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error {
            kind: ErrorKind::Validation(err.0.clone()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Json(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_is_reachable() {
        let inner = yandex_direct_client::Error::new(yandex_direct_client::ErrorKind::Timeout);
        let err: Error = inner.into();
        assert!(matches!(err.kind, ErrorKind::Client(_)));
        assert!(matches!(
            err.client_error().map(|e| &e.kind),
            Some(yandex_direct_client::ErrorKind::Timeout)
        ));
    }

    #[test]
    fn test_validation_error_display() {
        let err: Error = ValidationError::new("Ids cannot be empty").into();
        assert_eq!(err.to_string(), "Validation error: Ids cannot be empty");
        assert!(err.client_error().is_none());
    }
}
