//! Service registry and per-service proxies.
//!
//! Every v5 service is a URL path segment under the API base URL, and every
//! method is the `method` member of the request envelope. A [`ServiceProxy`]
//! binds a service name to a [`DirectClient`] so that methods can be called
//! without repeating the name:
//!
//! ```rust,ignore
//! let ads = client.ads().get(json!({"SelectionCriteria": {"Ids": [1]}, "FieldNames": ["Id"]})).await?;
//! let bids = client.service("keywordbids").invoke("set_auto", params).await?;
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::direct_client::DirectClient;
use crate::error::{Error, ErrorKind, Result};

macro_rules! v5_services {
    ($($variant:ident => $accessor:ident($name:literal)),* $(,)?) => {
        /// Names of every v5 service, as used in endpoint URLs.
        pub const V5_SERVICES: &[&str] = &[$($name),*];

        /// A v5 service.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Service {
            $($variant),*
        }

        impl Service {
            /// Every v5 service, in registry order.
            pub const ALL: &'static [Service] = &[$(Service::$variant),*];

            /// The lowercase name used in the endpoint URL.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Service::$variant => $name),*
                }
            }
        }

        impl DirectClient {
            $(
                #[doc = concat!("Proxy for the `", $name, "` service.")]
                pub fn $accessor(&self) -> ServiceProxy<'_> {
                    ServiceProxy::new(self, $name)
                }
            )*
        }
    };
}

v5_services! {
    AdExtensions => adextensions("adextensions"),
    AdGroups => adgroups("adgroups"),
    AdImages => adimages("adimages"),
    Ads => ads("ads"),
    AgencyClients => agencyclients("agencyclients"),
    AudienceTargets => audiencetargets("audiencetargets"),
    BidModifiers => bidmodifiers("bidmodifiers"),
    Bids => bids("bids"),
    Businesses => businesses("businesses"),
    Campaigns => campaigns("campaigns"),
    Changes => changes("changes"),
    Clients => clients("clients"),
    Dictionaries => dictionaries("dictionaries"),
    DynamicTextAdTargets => dynamictextadtargets("dynamictextadtargets"),
    Feeds => feeds("feeds"),
    KeywordBids => keywordbids("keywordbids"),
    Keywords => keywords("keywords"),
    KeywordsResearch => keywordsresearch("keywordsresearch"),
    Leads => leads("leads"),
    NegativeKeywordSharedSets => negativekeywordsharedsets("negativekeywordsharedsets"),
    RetargetingLists => retargetinglists("retargetinglists"),
    Sitelinks => sitelinks("sitelinks"),
    SmartAdTargets => smartadtargets("smartadtargets"),
    Strategies => strategies("strategies"),
    TurboPages => turbopages("turbopages"),
    VCards => vcards("vcards"),
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Service::ALL
            .iter()
            .copied()
            .find(|service| service.as_str() == wanted)
            .ok_or_else(|| Error::new(ErrorKind::UnknownService(s.to_string())))
    }
}

/// Normalize a snake_case method name to the API's spelling.
///
/// `set_auto` becomes `setauto`; names without underscores pass through.
pub fn normalize_method(name: &str) -> String {
    name.replace('_', "")
}

/// A service name bound to a client.
#[derive(Debug, Clone)]
pub struct ServiceProxy<'a> {
    client: &'a DirectClient,
    name: String,
}

impl<'a> ServiceProxy<'a> {
    pub(crate) fn new(client: &'a DirectClient, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
        }
    }

    /// The service name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call `method` on this service.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        self.client.call(&self.name, method, params).await
    }

    /// Call a method given in snake_case (`set_auto` → `setauto`).
    pub async fn invoke(&self, method_name: &str, params: Value) -> Result<Value> {
        self.call(&normalize_method(method_name), params).await
    }

    pub async fn get(&self, params: Value) -> Result<Value> {
        self.call("get", params).await
    }

    pub async fn add(&self, params: Value) -> Result<Value> {
        self.call("add", params).await
    }

    pub async fn update(&self, params: Value) -> Result<Value> {
        self.call("update", params).await
    }

    pub async fn delete(&self, params: Value) -> Result<Value> {
        self.call("delete", params).await
    }

    pub async fn suspend(&self, params: Value) -> Result<Value> {
        self.call("suspend", params).await
    }

    pub async fn resume(&self, params: Value) -> Result<Value> {
        self.call("resume", params).await
    }

    pub async fn archive(&self, params: Value) -> Result<Value> {
        self.call("archive", params).await
    }

    pub async fn unarchive(&self, params: Value) -> Result<Value> {
        self.call("unarchive", params).await
    }

    pub async fn moderate(&self, params: Value) -> Result<Value> {
        self.call("moderate", params).await
    }
}

impl DirectClient {
    /// Proxy for any service name, registered or not.
    pub fn service(&self, name: &str) -> ServiceProxy<'_> {
        ServiceProxy::new(self, name.to_ascii_lowercase())
    }

    /// Proxy for a registered service; unknown names fail with
    /// [`ErrorKind::UnknownService`].
    pub fn try_service(&self, name: &str) -> Result<ServiceProxy<'_>> {
        let service: Service = name.parse()?;
        Ok(ServiceProxy::new(self, service.as_str()))
    }

    /// Proxies for every registered service, keyed by name.
    pub fn services(&self) -> BTreeMap<&'static str, ServiceProxy<'_>> {
        Service::ALL
            .iter()
            .map(|service| (service.as_str(), ServiceProxy::new(self, service.as_str())))
            .collect()
    }
}
