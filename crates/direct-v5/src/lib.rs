//! # yandex-direct-v5
//!
//! Typed helpers for the most used Yandex Direct API v5 services.
//!
//! ## Features
//!
//! - **Selection criteria** - ads, campaigns, ad groups, keywords
//! - **Request builders** - `get` with default field names and paging,
//!   `add`/`update` payloads
//! - **Field names** - constants for `FieldNames`
//! - **Validation** - local checks before a request leaves the process
//! - **Result decoding** - `AddResults`/`UpdateResults` with per-object errors
//!
//! Every other service stays reachable through
//! [`DirectClient::call`](yandex_direct_client::DirectClient::call).
//!
//! ## Example
//!
//! ```rust,ignore
//! use yandex_direct_v5::{AdsSelectionCriteria, GetAdsRequest, V5Client, ad_fields};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), yandex_direct_v5::Error> {
//!     let client = V5Client::new(DirectCredentials::from_env()?)?;
//!
//!     let request = GetAdsRequest::new(AdsSelectionCriteria::new().with_campaign_ids([123]))
//!         .with_field_names([ad_fields::ID, ad_fields::STATE])
//!         .with_limit(1000);
//!
//!     let ads = client.get_ads(&request).await?;
//!     println!("{ads}");
//!     Ok(())
//! }
//! ```

mod client;
mod criteria;
mod error;
pub mod fields;
mod requests;
mod types;
pub mod validators;

pub use client::V5Client;
pub use criteria::{
    AdGroupsSelectionCriteria, AdsSelectionCriteria, CampaignsSelectionCriteria,
    KeywordsSelectionCriteria,
};
pub use error::{Error, ErrorKind, Result, ValidationError};
pub use fields::{
    ad_fields, ad_group_fields, campaign_fields, keyword_fields, COMMON_ADGROUP_FIELDS,
    COMMON_AD_FIELDS, COMMON_CAMPAIGN_FIELDS,
};
pub use requests::{
    AdAddItem, AdUpdateItem, AddAdsRequest, AddCampaignsRequest, CampaignAddItem, DailyBudget,
    GetAdGroupsRequest, GetAdsRequest, GetCampaignsRequest, GetKeywordsRequest, Page, TextAdAdd,
    UpdateAdsRequest,
};
pub use types::{ActionResult, AddResults, ExceptionNotification, UpdateResults};
pub use validators::RequestValidator;
