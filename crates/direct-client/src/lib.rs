//! # yandex-direct-client
//!
//! Core HTTP client infrastructure for the Yandex Direct API.
//!
//! This crate provides:
//! - Bearer authentication with agency `Client-Login` support
//! - Automatic retry with exponential backoff for transient HTTP statuses
//!   and application error codes
//! - Mapping of API error payloads to typed errors
//! - A registry of v5 services with per-service proxies
//! - Access to the legacy v4 Live JSON endpoint
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (yandex-direct-v5, yandex-direct-reports)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      DirectClient                           │
//! │  - Holds credentials + HTTP client                          │
//! │  - call(service, method, params), service proxies           │
//! │  - LimitedBy paging, v4 calls                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DirectHttpClient                         │
//! │  - Raw HTTP with retry and compression                      │
//! │  - Error payload decoding                                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use yandex_direct_client::{DirectClient, DirectCredentials};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), yandex_direct_client::Error> {
//!     let client = DirectClient::new(DirectCredentials::from_env()?)?;
//!
//!     let campaigns = client
//!         .campaigns()
//!         .get(json!({"SelectionCriteria": {}, "FieldNames": ["Id", "Name"]}))
//!         .await?;
//!
//!     println!("{campaigns}");
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod credentials;
mod direct_client;
mod error;
mod request;
mod response;
mod retry;
mod services;
mod v4;

pub use client::DirectHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use credentials::{
    DirectCredentials, API_URL, REPORTS_URL, SANDBOX_API_URL, SANDBOX_REPORTS_URL,
    SANDBOX_V4_API_URL, V4_API_URL,
};
pub use direct_client::{ApiResponse, DirectClient};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBuilder, RequestMethod};
pub use response::{ApiUnits, Response, ResponseExt};
pub use retry::{
    BackoffStrategy, RetryConfig, RetryPolicy, DEFAULT_RETRYABLE_ERROR_CODES,
    DEFAULT_RETRYABLE_HTTP_CODES,
};
pub use services::{normalize_method, Service, ServiceProxy, V5_SERVICES};

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("yandex-direct/", env!("CARGO_PKG_VERSION"));
