//! Reports service client.
//!
//! Reports are built asynchronously. The service answers 201 or 202 while a
//! report is queued or being built and 200 with the TSV body once it is
//! ready, so fetching is a poll loop around a single POST.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument};

use yandex_direct_client::{ClientConfig, DirectClient, DirectCredentials};

use crate::error::{Error, ErrorKind, Result};
use crate::types::{Report, ReportRequest};

/// Default polling interval between report fetch attempts.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default number of fetch attempts for [`ReportsClient::get_report_ready`].
pub const DEFAULT_ATTEMPTS: u32 = 12;

/// Yandex Direct Reports client.
///
/// # Example
///
/// ```rust,ignore
/// use yandex_direct_reports::{ReportsClient, ReportDefinition, ReportRequest};
///
/// let client = ReportsClient::new(DirectCredentials::from_env()?)?;
/// let definition = ReportDefinition::new("Last week", "CAMPAIGN_PERFORMANCE_REPORT")
///     .with_field_names(["CampaignId", "Impressions", "Clicks", "Cost"]);
///
/// let report = client
///     .get_report_ready(&ReportRequest::from_definition(&definition)?, 12)
///     .await?;
///
/// for row in report.table()?.rows {
///     println!("{row:?}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ReportsClient {
    client: DirectClient,
    poll_interval: Duration,
}

impl ReportsClient {
    /// Create a new Reports client.
    pub fn new(credentials: DirectCredentials) -> Result<Self> {
        Ok(Self::from_client(DirectClient::new(credentials)?))
    }

    /// Create a new Reports client with custom HTTP configuration.
    pub fn with_config(credentials: DirectCredentials, config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(DirectClient::with_config(
            credentials,
            config,
        )?))
    }

    /// Create a Reports client from an existing DirectClient.
    pub fn from_client(client: DirectClient) -> Self {
        Self {
            client,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Get the underlying DirectClient.
    pub fn inner(&self) -> &DirectClient {
        &self.client
    }

    /// Get the polling interval.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Set the polling interval between fetch attempts.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Fetch a report once.
    ///
    /// Returns [`ErrorKind::Pending`] while the report is still being built.
    #[instrument(skip(self, request))]
    pub async fn get_report(&self, request: &ReportRequest) -> Result<Report> {
        let http_request = self
            .client
            .post(self.client.credentials().reports_url())
            .headers(request.headers())
            .json_value(request.payload());

        let response = self.client.execute(http_request).await?;
        let request_id = response.request_id().map(str::to_string);

        match response.status() {
            201 | 202 => Err(Error::new(ErrorKind::Pending {
                request_id,
                retry_in: response.retry_in(),
            })),
            200 => {
                let mut report = Report::new(response.text()?, request);
                report.request_id = request_id;
                report.units = response.units();
                Ok(report)
            }
            status => Err(Error::new(ErrorKind::Other(format!(
                "Unexpected report response status {status}"
            )))),
        }
    }

    /// Fetch a report, polling while it is being built.
    ///
    /// Makes at most `attempts` requests, sleeping the poll interval after
    /// each pending answer. Any error other than "pending" is returned
    /// immediately.
    #[instrument(skip(self, request))]
    pub async fn get_report_ready(&self, request: &ReportRequest, attempts: u32) -> Result<Report> {
        let mut last_request_id = None;
        let mut last_retry_in = None;

        for attempt in 1..=attempts {
            info!(attempt, attempts, "Fetching report");

            match self.get_report(request).await {
                Ok(report) => return Ok(report),
                Err(Error {
                    kind: ErrorKind::Pending {
                        request_id,
                        retry_in,
                    },
                    ..
                }) => {
                    last_request_id = request_id;
                    last_retry_in = retry_in;

                    if attempt < attempts {
                        info!(
                            wait_ms = self.poll_interval.as_millis() as u64,
                            retry_in = ?last_retry_in,
                            "Report not ready, waiting"
                        );
                        sleep(self.poll_interval).await;
                    }
                }
                Err(err) => return Err(err),
            }
        }

        Err(Error::new(ErrorKind::Timeout {
            message: format!("Report was not ready after {attempts} attempts"),
            request_id: last_request_id,
            retry_in: last_retry_in,
        }))
    }
}
