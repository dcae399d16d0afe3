//! Typed v5 helpers through the facade.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yandex_direct::v5::{
    CampaignsSelectionCriteria, ErrorKind, GetCampaignsRequest, RequestValidator,
    COMMON_CAMPAIGN_FIELDS,
};
use yandex_direct::V5Client;

use super::common;

#[tokio::test]
async fn test_validated_campaigns_get() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/campaigns"))
        .and(body_json(json!({
            "method": "get",
            "params": {
                "SelectionCriteria": {"Ids": [10], "States": ["ON"]},
                "FieldNames": COMMON_CAMPAIGN_FIELDS,
                "Page": {"Limit": 500, "Offset": 0}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"Campaigns": [{"Id": 10, "Name": "Brand", "State": "ON"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let criteria = RequestValidator::validate_get_campaigns(Some(&[10]), Some(&["ON"])).unwrap();
    let request = GetCampaignsRequest::new(criteria)
        .with_field_names(COMMON_CAMPAIGN_FIELDS.iter().copied())
        .with_limit(500);

    let client = V5Client::from_client(common::client(&server));
    let result = client.get_campaigns(&request).await.unwrap();
    assert_eq!(result["Campaigns"][0]["Name"], "Brand");
}

#[tokio::test]
async fn test_client_error_is_wrapped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let client = V5Client::from_client(common::client(&server));
    let err = client
        .get_campaigns(&GetCampaignsRequest::new(CampaignsSelectionCriteria::new()))
        .await
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::Client(_)));
    assert!(err.client_error().is_some_and(|e| e.status() == Some(403)));
}
