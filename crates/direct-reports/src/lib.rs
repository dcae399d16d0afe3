//! # yandex-direct-reports
//!
//! Client for the Yandex Direct Reports service.
//!
//! ## Features
//!
//! - **Report definitions** - typed builder for the `params` object
//! - **Format switches** - title, column names, summary, VAT, micros
//! - **Polling** - wait for offline reports with a bounded number of attempts
//! - **TSV parsing** - turn the report body into columns and rows
//!
//! ## Example
//!
//! ```rust,ignore
//! use yandex_direct_reports::{ReportDefinition, ReportRequest, ReportsClient, ProcessingMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), yandex_direct_reports::Error> {
//!     let client = ReportsClient::new(DirectCredentials::from_env()?)?;
//!
//!     let definition = ReportDefinition::new("Clicks by day", "ACCOUNT_PERFORMANCE_REPORT")
//!         .with_field_names(["Date", "Clicks"]);
//!     let request = ReportRequest::from_definition(&definition)?
//!         .with_processing_mode(ProcessingMode::Auto);
//!
//!     let report = client.get_report_ready(&request, 12).await?;
//!     println!("{}", report.body);
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{ReportsClient, DEFAULT_ATTEMPTS};
pub use error::{Error, ErrorKind, Result};
pub use types::{
    Filter, OrderBy, ProcessingMode, Report, ReportDefinition, ReportRequest, ReportTable,
    CUSTOM_DATE,
};
