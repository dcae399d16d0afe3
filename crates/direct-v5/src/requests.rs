//! Request builders for the common v5 methods.
//!
//! Each builder produces the `params` object of the request envelope via
//! `to_params()`.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::criteria::{
    AdGroupsSelectionCriteria, AdsSelectionCriteria, CampaignsSelectionCriteria,
    KeywordsSelectionCriteria,
};
use crate::fields::{ad_fields, ad_group_fields, campaign_fields, keyword_fields};

/// Paging for `get` methods.
///
/// When a limit is set the offset defaults to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Page {
    pub fn limit(limit: u64) -> Self {
        Self {
            limit: Some(limit),
            offset: None,
        }
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }

    fn to_value(self) -> Option<Value> {
        match (self.limit, self.offset) {
            (Some(limit), offset) => Some(json!({"Limit": limit, "Offset": offset.unwrap_or(0)})),
            (None, Some(offset)) => Some(json!({"Offset": offset})),
            (None, None) => None,
        }
    }
}

fn get_params<C: Serialize>(criteria: &C, field_names: &[String], page: Option<Page>) -> Value {
    let mut params = Map::new();
    params.insert("SelectionCriteria".to_string(), json!(criteria));
    params.insert("FieldNames".to_string(), json!(field_names));
    if let Some(page) = page.and_then(Page::to_value) {
        params.insert("Page".to_string(), page);
    }
    Value::Object(params)
}

fn names(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

macro_rules! get_request {
    ($(#[$doc:meta])* $name:ident, $criteria:ty, [$($default:expr),+]) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub criteria: $criteria,
            pub field_names: Vec<String>,
            pub page: Option<Page>,
        }

        impl $name {
            /// Create a request with the default field names.
            pub fn new(criteria: $criteria) -> Self {
                Self {
                    criteria,
                    field_names: names(&[$($default),+]),
                    page: None,
                }
            }

            /// Replace the requested field names. An empty list keeps the defaults.
            pub fn with_field_names<S: Into<String>>(
                mut self,
                field_names: impl IntoIterator<Item = S>,
            ) -> Self {
                let field_names: Vec<String> = field_names.into_iter().map(Into::into).collect();
                if !field_names.is_empty() {
                    self.field_names = field_names;
                }
                self
            }

            pub fn with_page(mut self, page: Page) -> Self {
                self.page = Some(page);
                self
            }

            pub fn with_limit(mut self, limit: u64) -> Self {
                self.page.get_or_insert_with(Page::default).limit = Some(limit);
                self
            }

            pub fn with_offset(mut self, offset: u64) -> Self {
                self.page.get_or_insert_with(Page::default).offset = Some(offset);
                self
            }

            pub fn to_params(&self) -> Value {
                get_params(&self.criteria, &self.field_names, self.page)
            }
        }
    };
}

get_request!(
    /// Builder for `ads.get`.
    GetAdsRequest,
    AdsSelectionCriteria,
    [ad_fields::ID, ad_fields::STATUS, ad_fields::STATE]
);

get_request!(
    /// Builder for `campaigns.get`.
    GetCampaignsRequest,
    CampaignsSelectionCriteria,
    [campaign_fields::ID, campaign_fields::NAME, campaign_fields::STATUS]
);

get_request!(
    /// Builder for `adgroups.get`.
    GetAdGroupsRequest,
    AdGroupsSelectionCriteria,
    [ad_group_fields::ID, ad_group_fields::CAMPAIGN_ID, ad_group_fields::NAME]
);

get_request!(
    /// Builder for `keywords.get`.
    GetKeywordsRequest,
    KeywordsSelectionCriteria,
    [keyword_fields::ID, keyword_fields::KEYWORD, keyword_fields::BID]
);

/// Text ad content for `ads.add` and `ads.update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextAdAdd {
    pub text: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_domain: Option<String>,
}

impl TextAdAdd {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: title.into(),
            title2: None,
            href: None,
            display_domain: None,
        }
    }

    pub fn with_title2(mut self, title2: impl Into<String>) -> Self {
        self.title2 = Some(title2.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_display_domain(mut self, domain: impl Into<String>) -> Self {
        self.display_domain = Some(domain.into());
        self
    }
}

/// One ad in an `ads.add` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdAddItem {
    pub ad_group_id: i64,
    pub text_ad: TextAdAdd,
}

impl AdAddItem {
    pub fn new(ad_group_id: i64, text_ad: TextAdAdd) -> Self {
        Self {
            ad_group_id,
            text_ad,
        }
    }
}

/// Builder for `ads.add`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddAdsRequest {
    pub ads: Vec<AdAddItem>,
}

impl AddAdsRequest {
    pub fn new(ads: impl IntoIterator<Item = AdAddItem>) -> Self {
        Self {
            ads: ads.into_iter().collect(),
        }
    }

    pub fn to_params(&self) -> Value {
        json!(self)
    }
}

/// Daily budget of a campaign, in account currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyBudget {
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// One campaign in a `campaigns.add` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CampaignAddItem {
    pub name: String,
    #[serde(rename = "Type")]
    pub campaign_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_budget: Option<DailyBudget>,
    /// `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

impl CampaignAddItem {
    /// A `TEXT` campaign.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            campaign_type: "TEXT".to_string(),
            daily_budget: None,
            start_date: None,
        }
    }

    pub fn with_type(mut self, campaign_type: impl Into<String>) -> Self {
        self.campaign_type = campaign_type.into();
        self
    }

    pub fn with_daily_budget(mut self, amount: i64) -> Self {
        self.daily_budget = Some(DailyBudget { amount, mode: None });
        self
    }

    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }
}

/// Builder for `campaigns.add`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddCampaignsRequest {
    pub campaigns: Vec<CampaignAddItem>,
}

impl AddCampaignsRequest {
    pub fn new(campaigns: impl IntoIterator<Item = CampaignAddItem>) -> Self {
        Self {
            campaigns: campaigns.into_iter().collect(),
        }
    }

    pub fn to_params(&self) -> Value {
        json!(self)
    }
}

/// One ad in an `ads.update` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdUpdateItem {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_ad: Option<TextAdAdd>,
}

impl AdUpdateItem {
    pub fn new(id: i64) -> Self {
        Self { id, text_ad: None }
    }

    pub fn with_text_ad(mut self, text_ad: TextAdAdd) -> Self {
        self.text_ad = Some(text_ad);
        self
    }
}

/// Builder for `ads.update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateAdsRequest {
    pub ads: Vec<AdUpdateItem>,
}

impl UpdateAdsRequest {
    pub fn new(ads: impl IntoIterator<Item = AdUpdateItem>) -> Self {
        Self {
            ads: ads.into_iter().collect(),
        }
    }

    pub fn to_params(&self) -> Value {
        json!(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_ads_defaults() {
        let request = GetAdsRequest::new(AdsSelectionCriteria::new().with_ids([1, 2]));
        assert_eq!(
            request.to_params(),
            json!({
                "SelectionCriteria": {"Ids": [1, 2]},
                "FieldNames": ["Id", "Status", "State"]
            })
        );
    }

    #[test]
    fn test_get_ads_limit_defaults_offset_to_zero() {
        let params = GetAdsRequest::new(AdsSelectionCriteria::new())
            .with_limit(100)
            .to_params();
        assert_eq!(params["Page"], json!({"Limit": 100, "Offset": 0}));

        let params = GetAdsRequest::new(AdsSelectionCriteria::new())
            .with_offset(50)
            .to_params();
        assert_eq!(params["Page"], json!({"Offset": 50}));
    }

    #[test]
    fn test_default_field_names_per_request() {
        let campaigns = GetCampaignsRequest::new(CampaignsSelectionCriteria::new()).to_params();
        assert_eq!(campaigns["FieldNames"], json!(["Id", "Name", "Status"]));

        let groups = GetAdGroupsRequest::new(AdGroupsSelectionCriteria::new()).to_params();
        assert_eq!(groups["FieldNames"], json!(["Id", "CampaignId", "Name"]));

        let keywords = GetKeywordsRequest::new(KeywordsSelectionCriteria::new())
            .with_page(Page::limit(10).with_offset(20))
            .to_params();
        assert_eq!(keywords["FieldNames"], json!(["Id", "Keyword", "Bid"]));
        assert_eq!(keywords["Page"], json!({"Limit": 10, "Offset": 20}));
    }

    #[test]
    fn test_custom_field_names() {
        let params = GetCampaignsRequest::new(CampaignsSelectionCriteria::new())
            .with_field_names(["Id", "State"])
            .to_params();
        assert_eq!(params["FieldNames"], json!(["Id", "State"]));
        assert!(params.get("Page").is_none());
    }

    #[test]
    fn test_add_ads_params() {
        let request = AddAdsRequest::new([AdAddItem::new(
            42,
            TextAdAdd::new("Title", "Body").with_href("https://example.com"),
        )]);

        assert_eq!(
            request.to_params(),
            json!({"Ads": [{
                "AdGroupId": 42,
                "TextAd": {"Text": "Body", "Title": "Title", "Href": "https://example.com"}
            }]})
        );
    }

    #[test]
    fn test_add_campaigns_params() {
        let request = AddCampaignsRequest::new([
            CampaignAddItem::new("Spring")
                .with_daily_budget(300_000_000)
                .with_start_date("2026-03-01"),
            CampaignAddItem::new("Plain"),
        ]);

        assert_eq!(
            request.to_params(),
            json!({"Campaigns": [
                {"Name": "Spring", "Type": "TEXT", "DailyBudget": {"Amount": 300_000_000}, "StartDate": "2026-03-01"},
                {"Name": "Plain", "Type": "TEXT"}
            ]})
        );
    }

    #[test]
    fn test_update_ads_params() {
        let request = UpdateAdsRequest::new([
            AdUpdateItem::new(7).with_text_ad(TextAdAdd::new("New", "Text")),
            AdUpdateItem::new(8),
        ]);

        assert_eq!(
            request.to_params(),
            json!({"Ads": [
                {"Id": 7, "TextAd": {"Text": "Text", "Title": "New"}},
                {"Id": 8}
            ]})
        );
    }
}
