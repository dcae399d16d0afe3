//! Field names accepted in `FieldNames` by the typed `get` methods.

/// Fields of `ads.get`.
pub mod ad_fields {
    pub const ID: &str = "Id";
    pub const AD_GROUP_ID: &str = "AdGroupId";
    pub const CAMPAIGN_ID: &str = "CampaignId";
    pub const STATUS: &str = "Status";
    pub const STATE: &str = "State";
    pub const TYPE: &str = "Type";
    pub const AGE_LABEL: &str = "AgeLabel";
    pub const AD_CATEGORIES: &str = "AdCategories";
    pub const SHORT_TITLE: &str = "ShortTitle";
    pub const TITLE: &str = "Title";
    pub const TITLE2: &str = "Title2";
    pub const TEXT: &str = "Text";
    pub const HREF: &str = "Href";
    pub const DISPLAY_DOMAIN: &str = "DisplayDomain";
    pub const VISUAL_VIEW_PROBABILITY: &str = "VisualViewProbability";
}

/// Fields of `campaigns.get`.
pub mod campaign_fields {
    pub const ID: &str = "Id";
    pub const NAME: &str = "Name";
    pub const STATUS: &str = "Status";
    pub const STATE: &str = "State";
    pub const TYPE: &str = "Type";
    pub const START_DATE: &str = "StartDate";
    pub const END_DATE: &str = "EndDate";
    pub const DAILY_BUDGET: &str = "DailyBudget";
    pub const PAYMENT_TYPE: &str = "PaymentType";
    pub const NOTIFICATIONS: &str = "Notifications";
    pub const TIME_TARGETING: &str = "TimeTargeting";
}

/// Fields of `adgroups.get`.
pub mod ad_group_fields {
    pub const ID: &str = "Id";
    pub const CAMPAIGN_ID: &str = "CampaignId";
    pub const NAME: &str = "Name";
    pub const STATUS: &str = "Status";
    pub const STATE: &str = "State";
    pub const TYPE: &str = "Type";
}

/// Fields of `keywords.get`.
pub mod keyword_fields {
    pub const ID: &str = "Id";
    pub const AD_GROUP_ID: &str = "AdGroupId";
    pub const CAMPAIGN_ID: &str = "CampaignId";
    pub const KEYWORD: &str = "Keyword";
    pub const STATUS: &str = "Status";
    pub const STATE: &str = "State";
    pub const BID: &str = "Bid";
    pub const CONTEXT_BID: &str = "ContextBid";
}

pub const COMMON_AD_FIELDS: &[&str] = &[
    ad_fields::ID,
    ad_fields::AD_GROUP_ID,
    ad_fields::CAMPAIGN_ID,
    ad_fields::STATUS,
    ad_fields::STATE,
    ad_fields::TYPE,
    ad_fields::AGE_LABEL,
    ad_fields::AD_CATEGORIES,
];

pub const COMMON_CAMPAIGN_FIELDS: &[&str] = &[
    campaign_fields::ID,
    campaign_fields::NAME,
    campaign_fields::STATUS,
    campaign_fields::STATE,
    campaign_fields::TYPE,
    campaign_fields::START_DATE,
    campaign_fields::END_DATE,
    campaign_fields::DAILY_BUDGET,
    campaign_fields::PAYMENT_TYPE,
];

pub const COMMON_ADGROUP_FIELDS: &[&str] = &[
    ad_group_fields::ID,
    ad_group_fields::CAMPAIGN_ID,
    ad_group_fields::NAME,
    ad_group_fields::STATUS,
    ad_group_fields::STATE,
    ad_group_fields::TYPE,
];
