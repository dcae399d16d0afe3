//! Report polling through the facade.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yandex_direct::reports::ErrorKind;
use yandex_direct::{ReportDefinition, ReportRequest, ReportsClient};

use super::common;

fn reports_client(server: &MockServer) -> ReportsClient {
    ReportsClient::from_client(common::client(server)).with_poll_interval(Duration::from_millis(5))
}

fn request() -> ReportRequest {
    let definition = ReportDefinition::new("Clicks", "ACCOUNT_PERFORMANCE_REPORT")
        .with_field_names(["Date", "Clicks"]);
    ReportRequest::from_definition(&definition).unwrap()
}

#[tokio::test]
async fn test_report_ready_after_retry() {
    let server = MockServer::start().await;
    let call_count = Arc::new(AtomicU32::new(0));
    let call_count_clone = call_count.clone();

    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .and(header("skipReportSummary", "true"))
        .respond_with(move |_: &wiremock::Request| {
            if call_count_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(201)
                    .insert_header("RequestId", "rep-7")
                    .insert_header("retryIn", "2")
            } else {
                ResponseTemplate::new(200)
                    .insert_header("RequestId", "rep-7")
                    .set_body_string("Date\tClicks\n2026-10-01\t12\n2026-10-02\t30\n")
            }
        })
        .mount(&server)
        .await;

    let report = reports_client(&server)
        .get_report_ready(&request(), 12)
        .await
        .unwrap();

    assert_eq!(call_count.load(Ordering::SeqCst), 2);
    assert_eq!(report.request_id.as_deref(), Some("rep-7"));

    let table = report.table().unwrap();
    assert_eq!(table.columns, vec!["Date", "Clicks"]);
    assert_eq!(table.get(1, "Clicks"), Some("30"));
}

#[tokio::test]
async fn test_report_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("RequestId", "rep-8")
                .insert_header("retryIn", "30"),
        )
        .expect(2)
        .mount(&server)
        .await;

    let err = reports_client(&server)
        .get_report_ready(&request(), 2)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("not ready"));
    assert_eq!(err.request_id(), Some("rep-8"));
    assert!(matches!(err.kind, ErrorKind::Timeout { .. }));
}

#[tokio::test]
async fn test_report_request_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .and(wiremock::matchers::body_partial_json(json!({
            "params": {"ReportName": "Clicks", "Format": "TSV", "FieldNames": ["Date", "Clicks"]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("Date\tClicks\n"))
        .expect(1)
        .mount(&server)
        .await;

    let report = reports_client(&server).get_report(&request()).await.unwrap();
    assert!(report.table().unwrap().is_empty());
}
