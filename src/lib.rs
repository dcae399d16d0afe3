//! # yandex-direct
//!
//! A Yandex Direct API client library for Rust.
//!
//! This library calls Direct API v5 services (and the legacy v4 Live
//! endpoint) without hand-built HTTP requests, with built-in authentication
//! headers, retry logic, error mapping and report polling.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Tracing spans skip credentials and request parameters
//! - Error messages taken from responses are sanitized
//!
//! ## Crates
//!
//! - **yandex-direct-client** - Core HTTP client, retry, errors, service registry, v4
//! - **yandex-direct-v5** - Typed criteria, request builders, field names, validation
//! - **yandex-direct-reports** - Report definitions, polling, TSV parsing
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use yandex_direct::{DirectClient, DirectCredentials};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     yandex_direct::logging::init("info");
//!
//!     let client = DirectClient::new(DirectCredentials::from_env()?)?;
//!
//!     let campaigns = client
//!         .get_all(
//!             "campaigns",
//!             json!({"SelectionCriteria": {}, "FieldNames": ["Id", "Name"]}),
//!             "Campaigns",
//!         )
//!         .await?;
//!
//!     for campaign in campaigns {
//!         println!("{} {}", campaign["Id"], campaign["Name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod logging;

// Re-export all crates for convenient access
pub use yandex_direct_client as client;
#[cfg(feature = "reports")]
pub use yandex_direct_reports as reports;
#[cfg(feature = "v5")]
pub use yandex_direct_v5 as v5;

// Re-export commonly used types at the top level
pub use yandex_direct_client::{
    ApiResponse, ClientConfig, DirectClient, DirectCredentials, Error, ErrorKind, Result,
    RetryConfig, Service, ServiceProxy, V5_SERVICES,
};
#[cfg(feature = "reports")]
pub use yandex_direct_reports::{ReportDefinition, ReportRequest, ReportsClient};
#[cfg(feature = "v5")]
pub use yandex_direct_v5::V5Client;
