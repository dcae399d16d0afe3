//! Local validation of request parameters.
//!
//! Checks here run before any network call so obviously malformed requests
//! fail fast with a [`ValidationError`].

use serde_json::Value;

use crate::criteria::{
    AdGroupsSelectionCriteria, AdsSelectionCriteria, CampaignsSelectionCriteria,
    KeywordsSelectionCriteria,
};
use crate::error::ValidationError;

type Result<T> = std::result::Result<T, ValidationError>;

/// Campaign states accepted by `campaigns.get`.
pub const CAMPAIGN_STATES: &[&str] = &["ON", "OFF", "SUSPENDED", "ARCHIVED"];

/// An id must be a positive integer.
pub fn validate_id(id: i64, param_name: &str) -> Result<()> {
    if id <= 0 {
        return Err(ValidationError(format!(
            "{param_name} must be a positive integer, got: {id}"
        )));
    }
    Ok(())
}

/// A list of ids must be non-empty and contain only positive integers.
pub fn validate_ids(ids: &[i64], param_name: &str) -> Result<()> {
    if ids.is_empty() {
        return Err(ValidationError(format!("{param_name} cannot be empty")));
    }
    for (i, id) in ids.iter().enumerate() {
        if *id <= 0 {
            return Err(ValidationError(format!(
                "{param_name}[{i}] must be a positive integer, got: {id}"
            )));
        }
    }
    Ok(())
}

/// Reject null values and empty strings, arrays and objects.
pub fn validate_not_empty(value: &Value, param_name: &str) -> Result<()> {
    let empty = match value {
        Value::Null => return Err(ValidationError(format!("{param_name} cannot be null"))),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    };
    if empty {
        return Err(ValidationError(format!("{param_name} cannot be empty")));
    }
    Ok(())
}

/// Field names must be a non-empty list of non-empty strings.
pub fn validate_field_names<S: AsRef<str>>(field_names: &[S], param_name: &str) -> Result<()> {
    if field_names.is_empty() {
        return Err(ValidationError(format!("{param_name} cannot be empty")));
    }
    for (i, name) in field_names.iter().enumerate() {
        if name.as_ref().trim().is_empty() {
            return Err(ValidationError(format!(
                "{param_name}[{i}] must be a non-empty string"
            )));
        }
    }
    Ok(())
}

/// Selection criteria must be an object containing every `required` key.
pub fn validate_selection_criteria(criteria: &Value, required: &[&str]) -> Result<()> {
    let Value::Object(map) = criteria else {
        return Err(ValidationError(
            "SelectionCriteria must be an object".to_string(),
        ));
    };
    if let Some(missing) = required.iter().find(|field| !map.contains_key(**field)) {
        return Err(ValidationError(format!(
            "SelectionCriteria must contain '{missing}'"
        )));
    }
    Ok(())
}

/// Builds validated selection criteria for the typed `get` methods.
pub struct RequestValidator;

impl RequestValidator {
    /// Criteria for `ads.get`. At least one id list is required.
    pub fn validate_get_ads(
        campaign_ids: Option<&[i64]>,
        ad_group_ids: Option<&[i64]>,
        ids: Option<&[i64]>,
    ) -> Result<AdsSelectionCriteria> {
        let mut criteria = AdsSelectionCriteria::new();

        if let Some(campaign_ids) = campaign_ids {
            validate_ids(campaign_ids, "CampaignIds")?;
            criteria.campaign_ids = campaign_ids.to_vec();
        }
        if let Some(ad_group_ids) = ad_group_ids {
            validate_ids(ad_group_ids, "AdGroupIds")?;
            criteria.ad_group_ids = ad_group_ids.to_vec();
        }
        if let Some(ids) = ids {
            validate_ids(ids, "Ids")?;
            criteria.ids = ids.to_vec();
        }

        if criteria == AdsSelectionCriteria::default() {
            return Err(ValidationError(
                "At least one of campaign_ids, ad_group_ids, or ids must be provided".to_string(),
            ));
        }

        Ok(criteria)
    }

    /// Criteria for `campaigns.get`. Both filters are optional.
    pub fn validate_get_campaigns(
        campaign_ids: Option<&[i64]>,
        states: Option<&[&str]>,
    ) -> Result<CampaignsSelectionCriteria> {
        let mut criteria = CampaignsSelectionCriteria::new();

        if let Some(campaign_ids) = campaign_ids {
            validate_ids(campaign_ids, "Ids")?;
            criteria.ids = campaign_ids.to_vec();
        }

        if let Some(states) = states {
            if let Some(invalid) = states.iter().find(|s| !CAMPAIGN_STATES.contains(*s)) {
                return Err(ValidationError(format!(
                    "Invalid state: {invalid}. Must be one of: {}",
                    CAMPAIGN_STATES.join(", ")
                )));
            }
            criteria.states = states.iter().map(|s| s.to_string()).collect();
        }

        Ok(criteria)
    }

    /// Criteria for `adgroups.get`. At least one id list is required.
    pub fn validate_get_ad_groups(
        campaign_ids: Option<&[i64]>,
        ad_group_ids: Option<&[i64]>,
    ) -> Result<AdGroupsSelectionCriteria> {
        let mut criteria = AdGroupsSelectionCriteria::new();

        if let Some(campaign_ids) = campaign_ids {
            validate_ids(campaign_ids, "CampaignIds")?;
            criteria.campaign_ids = campaign_ids.to_vec();
        }
        if let Some(ad_group_ids) = ad_group_ids {
            validate_ids(ad_group_ids, "Ids")?;
            criteria.ids = ad_group_ids.to_vec();
        }

        if criteria.ids.is_empty() && criteria.campaign_ids.is_empty() {
            return Err(ValidationError(
                "At least one of campaign_ids or ad_group_ids must be provided".to_string(),
            ));
        }

        Ok(criteria)
    }

    /// Criteria for `keywords.get`. At least one id list is required.
    pub fn validate_get_keywords(
        campaign_ids: Option<&[i64]>,
        ad_group_ids: Option<&[i64]>,
        ids: Option<&[i64]>,
    ) -> Result<KeywordsSelectionCriteria> {
        let mut criteria = KeywordsSelectionCriteria::new();

        if let Some(campaign_ids) = campaign_ids {
            validate_ids(campaign_ids, "CampaignIds")?;
            criteria.campaign_ids = campaign_ids.to_vec();
        }
        if let Some(ad_group_ids) = ad_group_ids {
            validate_ids(ad_group_ids, "AdGroupIds")?;
            criteria.ad_group_ids = ad_group_ids.to_vec();
        }
        if let Some(ids) = ids {
            validate_ids(ids, "Ids")?;
            criteria.ids = ids.to_vec();
        }

        if criteria == KeywordsSelectionCriteria::default() {
            return Err(ValidationError(
                "At least one of campaign_ids, ad_group_ids, or ids must be provided".to_string(),
            ));
        }

        Ok(criteria)
    }
}
