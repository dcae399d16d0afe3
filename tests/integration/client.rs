//! Calls, service proxies, errors and retries through the facade.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yandex_direct::{ErrorKind, Service, V5_SERVICES};

use super::common;

#[tokio::test]
async fn test_dynamic_proxy_returns_result() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/campaigns"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Client-Login", "agency-client"))
        .and(body_json(json!({
            "method": "get",
            "params": {"SelectionCriteria": {}, "FieldNames": ["Id"]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"Campaigns": [{"Id": 1}, {"Id": 2}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server);
    let result = client
        .try_service("Campaigns")
        .unwrap()
        .get(json!({"SelectionCriteria": {}, "FieldNames": ["Id"]}))
        .await
        .unwrap();

    assert_eq!(result["Campaigns"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_registry_lists_every_service() {
    let server = MockServer::start().await;
    let client = common::client(&server);

    let services = client.services();
    assert_eq!(services.len(), V5_SERVICES.len());
    for name in V5_SERVICES {
        assert!(services.contains_key(name), "missing service {name}");
        assert!(name.parse::<Service>().is_ok());
    }
}

#[tokio::test]
async fn test_unknown_service_is_rejected() {
    let server = MockServer::start().await;
    let client = common::client(&server);

    let err = client.try_service("nonexistent").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownService(_)));
}

#[tokio::test]
async fn test_api_error_code_is_exposed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/ads"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("RequestId", "8675309")
                .set_body_json(json!({
                    "error": {
                        "error_code": 8000,
                        "error_string": "Invalid request",
                        "error_detail": "SelectionCriteria is required"
                    }
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = common::client(&server)
        .call("ads", "get", json!({}))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), Some(8000));
    assert_eq!(err.request_id(), Some("8675309"));
    assert_eq!(err.status(), Some(200));
    assert!(err.to_string().contains("Invalid request"));
}

#[tokio::test]
async fn test_http_error_status_and_request_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(502)
                .insert_header("RequestId", "gw-1")
                .set_body_string("Bad Gateway"),
        )
        .expect(3)
        .mount(&server)
        .await;

    let err = common::client(&server)
        .call("campaigns", "get", json!({}))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert_eq!(err.request_id(), Some("gw-1"));
    assert!(matches!(err.kind, ErrorKind::Http { .. }));
}

#[tokio::test]
async fn test_transient_error_then_success() {
    let server = MockServer::start().await;
    let call_count = Arc::new(AtomicU32::new(0));
    let call_count_clone = call_count.clone();

    Mock::given(method("POST"))
        .and(path("/json/v5/adgroups"))
        .respond_with(move |_: &wiremock::Request| {
            if call_count_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(429)
            } else {
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": {"AdGroups": [{"Id": 7}]}}))
            }
        })
        .mount(&server)
        .await;

    let result = common::client(&server)
        .get_ad_groups(json!({"CampaignIds": [1]}), &["Id"])
        .await
        .unwrap();

    assert_eq!(result["AdGroups"][0]["Id"], 7);
    assert_eq!(call_count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_v4_call_through_facade() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v4/json"))
        .and(body_json(json!({"method": "GetVersion", "locale": "ru"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": 4})))
        .mount(&server)
        .await;

    let data = common::client(&server)
        .call_v4("GetVersion", serde_json::Value::Null)
        .await
        .unwrap();
    assert_eq!(data, json!(4));
}
