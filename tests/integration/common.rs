use std::time::Duration;

use wiremock::MockServer;
use yandex_direct::{ClientConfig, DirectClient, DirectCredentials, RetryConfig};

/// Credentials pointing every endpoint at the mock server.
pub fn credentials(server: &MockServer) -> DirectCredentials {
    DirectCredentials::new("test-token", "agency-client")
        .with_api_url(format!("{}/json/v5", server.uri()))
        .with_reports_url(format!("{}/json/v5/reports", server.uri()))
        .with_v4_url(format!("{}/v4/json", server.uri()))
}

/// Retry config with millisecond delays so retry tests stay fast.
pub fn fast_retry() -> ClientConfig {
    ClientConfig::builder()
        .with_retry(
            RetryConfig::default()
                .with_max_attempts(3)
                .with_initial_delay(Duration::from_millis(5))
                .with_max_delay(Duration::from_millis(20)),
        )
        .build()
}

pub fn client(server: &MockServer) -> DirectClient {
    DirectClient::with_config(credentials(server), fast_retry())
        .expect("client should build against the mock server")
}
