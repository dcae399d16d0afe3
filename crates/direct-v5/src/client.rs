//! Typed client for the common v5 services.

use serde_json::Value;
use tracing::instrument;

use yandex_direct_client::{ClientConfig, DirectClient, DirectCredentials, Service};

use crate::error::Result;
use crate::requests::*;
use crate::types::{AddResults, UpdateResults};
use crate::validators::{validate_field_names, RequestValidator};

/// Typed wrapper around [`DirectClient`] for ads, campaigns, ad groups and
/// keywords.
///
/// `get` requests are validated locally before they are sent: field names
/// must be non-empty, ads, ad groups and keywords need at least one id list,
/// and campaign states must be known.
///
/// # Example
///
/// ```rust,ignore
/// use yandex_direct_v5::{V5Client, GetCampaignsRequest, CampaignsSelectionCriteria};
///
/// let client = V5Client::new(DirectCredentials::from_env()?)?;
/// let request = GetCampaignsRequest::new(
///     CampaignsSelectionCriteria::new().with_states(["ON"]),
/// );
/// let result = client.get_campaigns(&request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct V5Client {
    client: DirectClient,
}

impl V5Client {
    /// Create a new typed client.
    pub fn new(credentials: DirectCredentials) -> Result<Self> {
        Ok(Self {
            client: DirectClient::new(credentials)?,
        })
    }

    /// Create a new typed client with custom HTTP configuration.
    pub fn with_config(credentials: DirectCredentials, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: DirectClient::with_config(credentials, config)?,
        })
    }

    /// Create a typed client from an existing DirectClient.
    pub fn from_client(client: DirectClient) -> Self {
        Self { client }
    }

    /// Get the underlying DirectClient.
    pub fn inner(&self) -> &DirectClient {
        &self.client
    }

    async fn get(&self, service: Service, params: Value) -> Result<Value> {
        Ok(self.client.call(service.as_str(), "get", params).await?)
    }

    /// `ads.get`.
    #[instrument(skip(self, request))]
    pub async fn get_ads(&self, request: &GetAdsRequest) -> Result<Value> {
        validate_field_names(request.field_names.as_slice(), "FieldNames")?;
        let criteria = &request.criteria;
        RequestValidator::validate_get_ads(
            non_empty(&criteria.campaign_ids),
            non_empty(&criteria.ad_group_ids),
            non_empty(&criteria.ids),
        )?;
        self.get(Service::Ads, request.to_params()).await
    }

    /// `campaigns.get`.
    #[instrument(skip(self, request))]
    pub async fn get_campaigns(&self, request: &GetCampaignsRequest) -> Result<Value> {
        validate_field_names(request.field_names.as_slice(), "FieldNames")?;
        let states: Vec<&str> = request.criteria.states.iter().map(String::as_str).collect();
        RequestValidator::validate_get_campaigns(
            non_empty(&request.criteria.ids),
            (!states.is_empty()).then_some(states.as_slice()),
        )?;
        self.get(Service::Campaigns, request.to_params()).await
    }

    /// `adgroups.get`.
    #[instrument(skip(self, request))]
    pub async fn get_ad_groups(&self, request: &GetAdGroupsRequest) -> Result<Value> {
        validate_field_names(request.field_names.as_slice(), "FieldNames")?;
        RequestValidator::validate_get_ad_groups(
            non_empty(&request.criteria.campaign_ids),
            non_empty(&request.criteria.ids),
        )?;
        self.get(Service::AdGroups, request.to_params()).await
    }

    /// `keywords.get`.
    #[instrument(skip(self, request))]
    pub async fn get_keywords(&self, request: &GetKeywordsRequest) -> Result<Value> {
        validate_field_names(request.field_names.as_slice(), "FieldNames")?;
        let criteria = &request.criteria;
        RequestValidator::validate_get_keywords(
            non_empty(&criteria.campaign_ids),
            non_empty(&criteria.ad_group_ids),
            non_empty(&criteria.ids),
        )?;
        self.get(Service::Keywords, request.to_params()).await
    }

    /// `ads.add`.
    #[instrument(skip(self, request), fields(count = request.ads.len()))]
    pub async fn add_ads(&self, request: &AddAdsRequest) -> Result<AddResults> {
        let result = self
            .client
            .call(Service::Ads.as_str(), "add", request.to_params())
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// `campaigns.add`.
    #[instrument(skip(self, request), fields(count = request.campaigns.len()))]
    pub async fn add_campaigns(&self, request: &AddCampaignsRequest) -> Result<AddResults> {
        let result = self
            .client
            .call(Service::Campaigns.as_str(), "add", request.to_params())
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// `ads.update`.
    #[instrument(skip(self, request), fields(count = request.ads.len()))]
    pub async fn update_ads(&self, request: &UpdateAdsRequest) -> Result<UpdateResults> {
        let result = self
            .client
            .call(Service::Ads.as_str(), "update", request.to_params())
            .await?;
        Ok(serde_json::from_value(result)?)
    }
}

fn non_empty(ids: &[i64]) -> Option<&[i64]> {
    (!ids.is_empty()).then_some(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> V5Client {
        let creds = DirectCredentials::new("t", "l")
            .with_api_url(format!("{}/json/v5", server.uri()));
        V5Client::with_config(creds, ClientConfig::builder().without_retry().build()).unwrap()
    }

    #[tokio::test]
    async fn test_get_ads_sends_typed_params() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/json/v5/ads"))
            .and(body_json(json!({
                "method": "get",
                "params": {
                    "SelectionCriteria": {"CampaignIds": [1]},
                    "FieldNames": ["Id", "Status", "State"],
                    "Page": {"Limit": 10, "Offset": 0}
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"Ads": [{"Id": 5, "Status": "ACCEPTED", "State": "ON"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request =
            GetAdsRequest::new(AdsSelectionCriteria::new().with_campaign_ids([1])).with_limit(10);
        let result = client_for(&server).get_ads(&request).await.unwrap();
        assert_eq!(result["Ads"][0]["Id"], 5);
    }

    #[tokio::test]
    async fn test_invalid_field_names_fail_before_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut request = GetCampaignsRequest::new(CampaignsSelectionCriteria::new());
        request.field_names = vec!["Id".to_string(), " ".to_string()];

        let err = client_for(&server).get_campaigns(&request).await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Validation(_)));
    }

    #[tokio::test]
    async fn test_invalid_criteria_fail_before_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);

        let err = client
            .get_ads(&GetAdsRequest::new(AdsSelectionCriteria::new().with_states(["ON"])))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("At least one of"));

        let err = client
            .get_ad_groups(&GetAdGroupsRequest::new(
                AdGroupsSelectionCriteria::new().with_campaign_ids([-1]),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Validation(_)));

        let err = client
            .get_campaigns(&GetCampaignsRequest::new(
                CampaignsSelectionCriteria::new().with_states(["RUNNING"]),
            ))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid state: RUNNING"));

        let err = client
            .get_keywords(&GetKeywordsRequest::new(KeywordsSelectionCriteria::new()))
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Validation(_)));
    }

    #[tokio::test]
    async fn test_add_campaigns_decodes_results() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/json/v5/campaigns"))
            .and(body_json(json!({
                "method": "add",
                "params": {"Campaigns": [{"Name": "Autumn", "Type": "TEXT"}]}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"AddResults": [{"Id": 900}]}
            })))
            .mount(&server)
            .await;

        let results = client_for(&server)
            .add_campaigns(&AddCampaignsRequest::new([CampaignAddItem::new("Autumn")]))
            .await
            .unwrap();
        assert_eq!(results.ids(), vec![900]);
    }

    #[tokio::test]
    async fn test_update_ads_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/json/v5/ads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": {"error_code": 8800, "error_string": "Object not found", "request_id": "abc"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .update_ads(&UpdateAdsRequest::new([AdUpdateItem::new(1)]))
            .await
            .unwrap_err();

        assert!(matches!(err.kind, ErrorKind::Client(_)));
        let client_err = err.client_error().unwrap();
        assert_eq!(client_err.error_code(), Some(8800));
        assert_eq!(client_err.request_id(), Some("abc"));
    }

    #[tokio::test]
    async fn test_add_ads_and_get_keywords() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/json/v5/ads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"AddResults": [{"Id": 11}, {"Errors": [{"Code": 5005, "Message": "Bad"}]}]}
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/json/v5/keywords"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"Keywords": [{"Id": 3, "Keyword": "shoes", "Bid": 1_000_000}]}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let results = client
            .add_ads(&AddAdsRequest::new([
                AdAddItem::new(1, TextAdAdd::new("A", "a")),
                AdAddItem::new(1, TextAdAdd::new("B", "b")),
            ]))
            .await
            .unwrap();
        assert_eq!(results.ids(), vec![11]);
        assert_eq!(results.failures().count(), 1);

        let keywords = client
            .get_keywords(&GetKeywordsRequest::new(
                KeywordsSelectionCriteria::new().with_ad_group_ids([4]),
            ))
            .await
            .unwrap();
        assert_eq!(keywords["Keywords"][0]["Keyword"], "shoes");
    }
}
