//! Connection settings for the Yandex Direct API.
//!
//! The access token is redacted in Debug output.

use crate::error::{Error, ErrorKind, Result};

/// Production JSON API v5 endpoint.
pub const API_URL: &str = "https://api.direct.yandex.com/json/v5";
/// Production reports endpoint.
pub const REPORTS_URL: &str = "https://api.direct.yandex.com/json/v5/reports";
/// Production v4 Live JSON endpoint.
pub const V4_API_URL: &str = "https://api.direct.yandex.com/v4/json";

/// Sandbox JSON API v5 endpoint.
pub const SANDBOX_API_URL: &str = "https://api-sandbox.direct.yandex.com/json/v5";
/// Sandbox reports endpoint.
pub const SANDBOX_REPORTS_URL: &str = "https://api-sandbox.direct.yandex.com/json/v5/reports";
/// Sandbox v4 Live JSON endpoint.
pub const SANDBOX_V4_API_URL: &str = "https://api-sandbox.direct.yandex.com/v4/json";

/// Access token, advertiser login and endpoints used for every request.
#[derive(Clone)]
pub struct DirectCredentials {
    access_token: String,
    client_login: Option<String>,
    locale: String,
    api_url: String,
    reports_url: String,
    v4_url: String,
}

impl std::fmt::Debug for DirectCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectCredentials")
            .field("access_token", &"[REDACTED]")
            .field("client_login", &self.client_login)
            .field("locale", &self.locale)
            .field("api_url", &self.api_url)
            .field("reports_url", &self.reports_url)
            .field("v4_url", &self.v4_url)
            .finish()
    }
}

impl DirectCredentials {
    /// Create credentials for the production endpoints.
    ///
    /// `client_login` is the advertiser login an agency acts on behalf of;
    /// pass an empty string for direct advertiser accounts.
    pub fn new(access_token: impl Into<String>, client_login: impl Into<String>) -> Self {
        let client_login = client_login.into();
        Self {
            access_token: access_token.into(),
            client_login: (!client_login.is_empty()).then_some(client_login),
            locale: "ru".to_string(),
            api_url: API_URL.to_string(),
            reports_url: REPORTS_URL.to_string(),
            v4_url: V4_API_URL.to_string(),
        }
    }

    /// Set the `Accept-Language` locale used for API messages.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Override the v5 API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the reports URL.
    pub fn with_reports_url(mut self, url: impl Into<String>) -> Self {
        self.reports_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the v4 Live URL.
    pub fn with_v4_url(mut self, url: impl Into<String>) -> Self {
        self.v4_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Point every endpoint at the sandbox.
    pub fn sandbox(self) -> Self {
        self.with_api_url(SANDBOX_API_URL)
            .with_reports_url(SANDBOX_REPORTS_URL)
            .with_v4_url(SANDBOX_V4_API_URL)
    }

    /// Load credentials from environment variables.
    ///
    /// Required:
    /// - `YANDEX_DIRECT_TOKEN`
    ///
    /// Optional:
    /// - `YANDEX_DIRECT_CLIENT_LOGIN`
    /// - `YANDEX_DIRECT_LOCALE` (default: "ru")
    /// - `YANDEX_DIRECT_SANDBOX` (`1` or `true` selects the sandbox endpoints)
    /// - `YANDEX_DIRECT_API_URL`, `YANDEX_DIRECT_REPORTS_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup("YANDEX_DIRECT_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::new(ErrorKind::Config(
                    "Environment variable not set: YANDEX_DIRECT_TOKEN".to_string(),
                ))
            })?;

        let mut creds = Self::new(token, lookup("YANDEX_DIRECT_CLIENT_LOGIN").unwrap_or_default());

        if let Some(locale) = lookup("YANDEX_DIRECT_LOCALE") {
            creds = creds.with_locale(locale);
        }
        if lookup("YANDEX_DIRECT_SANDBOX")
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        {
            creds = creds.sandbox();
        }
        if let Some(url) = lookup("YANDEX_DIRECT_API_URL") {
            creds = creds.with_api_url(url);
        }
        if let Some(url) = lookup("YANDEX_DIRECT_REPORTS_URL") {
            creds = creds.with_reports_url(url);
        }

        Ok(creds)
    }

    /// Get the access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Get the client login, if set.
    pub fn client_login(&self) -> Option<&str> {
        self.client_login.as_deref()
    }

    /// Get the locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Get the v5 API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Get the reports URL.
    pub fn reports_url(&self) -> &str {
        &self.reports_url
    }

    /// Get the v4 Live URL.
    pub fn v4_url(&self) -> &str {
        &self.v4_url
    }

    /// Headers sent with every v5 request.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![(
            "Authorization".to_string(),
            format!("Bearer {}", self.access_token),
        )];
        if let Some(ref login) = self.client_login {
            headers.push(("Client-Login".to_string(), login.clone()));
        }
        headers.push(("Accept-Language".to_string(), self.locale.clone()));
        headers.push((
            "Content-Type".to_string(),
            "application/json; charset=utf-8".to_string(),
        ));
        headers
    }

    /// Returns true if the token is non-empty.
    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let creds = DirectCredentials::new("t", "l");
        assert_eq!(creds.locale(), "ru");
        assert_eq!(creds.api_url(), API_URL);
        assert_eq!(creds.reports_url(), REPORTS_URL);
        assert_eq!(creds.client_login(), Some("l"));
        assert!(creds.is_valid());
    }

    #[test]
    fn test_headers() {
        let headers: HashMap<_, _> = DirectCredentials::new("t", "l")
            .with_locale("en")
            .headers()
            .into_iter()
            .collect();

        assert_eq!(headers["Authorization"], "Bearer t");
        assert_eq!(headers["Client-Login"], "l");
        assert_eq!(headers["Accept-Language"], "en");
        assert_eq!(headers["Content-Type"], "application/json; charset=utf-8");
    }

    #[test]
    fn test_empty_client_login_is_omitted() {
        let creds = DirectCredentials::new("t", "");
        assert!(creds.client_login().is_none());
        assert!(!creds.headers().iter().any(|(name, _)| name == "Client-Login"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let creds = DirectCredentials::new("secret-token-value", "l");
        let debug = format!("{creds:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-token-value"));
    }

    #[test]
    fn test_sandbox_and_trailing_slash() {
        let creds = DirectCredentials::new("t", "l").sandbox();
        assert_eq!(creds.api_url(), SANDBOX_API_URL);
        assert_eq!(creds.v4_url(), SANDBOX_V4_API_URL);

        let creds = DirectCredentials::new("t", "l").with_api_url("http://localhost:1234/json/v5/");
        assert_eq!(creds.api_url(), "http://localhost:1234/json/v5");
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("YANDEX_DIRECT_TOKEN", "tok"),
            ("YANDEX_DIRECT_CLIENT_LOGIN", "client"),
            ("YANDEX_DIRECT_LOCALE", "en"),
            ("YANDEX_DIRECT_SANDBOX", "true"),
        ]
        .into_iter()
        .collect();

        let creds =
            DirectCredentials::from_lookup(|name| env.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(creds.access_token(), "tok");
        assert_eq!(creds.client_login(), Some("client"));
        assert_eq!(creds.locale(), "en");
        assert_eq!(creds.reports_url(), SANDBOX_REPORTS_URL);
    }

    #[test]
    fn test_from_lookup_requires_token() {
        let err = DirectCredentials::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
        assert!(err.to_string().contains("YANDEX_DIRECT_TOKEN"));
    }
}
