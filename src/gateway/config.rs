// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Gateway configuration and runtime environment

use std::time::Duration;

use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::network::TIMESTAMP_HEADER_VALUE;
use crate::ui::NoticeText;

/// Environment variable selecting the build mode
pub const ENV_MODE: &str = "GATEWAY_MODE";
/// Environment variable holding the current page URL
pub const ENV_PAGE_URL: &str = "GATEWAY_PAGE_URL";
/// Environment variable holding the base URL
pub const ENV_BASE_URL: &str = "GATEWAY_BASE_URL";
/// Environment variable holding the timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "GATEWAY_TIMEOUT_SECS";
/// Environment variable holding a proxy URL
pub const ENV_PROXY: &str = "GATEWAY_PROXY";

/// Build mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    #[default]
    Development,
    Production,
}

/// Where the gateway runs: build mode and current page URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub mode: BuildMode,
    pub page_url: Option<String>,
}

impl Environment {
    pub fn new(mode: BuildMode, page_url: Option<String>) -> Self {
        Self { mode, page_url }
    }

    /// Production build serving `page_url`
    pub fn production(page_url: impl Into<String>) -> Self {
        Self::new(BuildMode::Production, Some(page_url.into()))
    }

    /// Read `GATEWAY_MODE` and `GATEWAY_PAGE_URL`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup(ENV_MODE).as_deref() {
            Some(mode) if mode.eq_ignore_ascii_case("production") => BuildMode::Production,
            _ => BuildMode::Development,
        };
        Self {
            mode,
            page_url: lookup(ENV_PAGE_URL).filter(|url| !url.is_empty()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.mode == BuildMode::Production
    }

    /// Whether the current page was loaded over HTTPS
    ///
    /// Matches `https` anywhere in the page URL.
    pub fn page_is_https(&self) -> bool {
        self.page_url
            .as_deref()
            .map(|url| url.contains("https"))
            .unwrap_or(false)
    }
}

/// Upgrade request URLs to HTTPS in production builds served over HTTPS
///
/// Replaces the first `http` in the URL, so an `https://` URL becomes
/// `httpss://`. Callers pass plain `http://` URLs in that setup.
pub fn url_to_https(url: &str, environment: &Environment) -> String {
    if environment.is_production() && environment.page_is_https() {
        return url.replacen("http", "https", 1);
    }
    url.to_string()
}

/// What an envelope-level 401 does to the pending call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionExpiryMode {
    /// The call never completes; the notice drives logout and redirect
    #[default]
    Hold,
    /// The call fails with an unauthorized rejection
    Reject,
}

/// Immutable gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Underlying client settings
    pub http: HttpClientConfig,
    /// Runtime environment for the HTTPS upgrade
    pub environment: Environment,
    /// Fixed notice texts
    pub notices: NoticeText,
    /// Envelope-level 401 behaviour
    pub session_expiry: SessionExpiryMode,
    /// Value of the `timestamp` header on authenticated requests
    pub timestamp: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http: HttpClientConfig::default(),
            environment: Environment::default(),
            notices: NoticeText::default(),
            session_expiry: SessionExpiryMode::default(),
            timestamp: TIMESTAMP_HEADER_VALUE.to_string(),
        }
    }
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read environment, base URL, timeout and proxy from process variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            environment: Environment::from_lookup(&lookup),
            ..Default::default()
        };

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|url| !url.is_empty()) {
            config.http = config.http.base_url(base_url)?;
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::config(format!("{} must be a number of seconds, got '{}'", ENV_TIMEOUT_SECS, secs))
            })?;
            config.http = config.http.timeout(Duration::from_secs(secs));
        }

        if let Some(proxy) = lookup(ENV_PROXY).filter(|proxy| !proxy.is_empty()) {
            config.http = config.http.proxy(proxy);
        }

        Ok(config)
    }

    /// Set environment
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set notice texts
    pub fn notices(mut self, notices: NoticeText) -> Self {
        self.notices = notices;
        self
    }

    /// Set envelope-level 401 behaviour
    pub fn session_expiry(mut self, mode: SessionExpiryMode) -> Self {
        self.session_expiry = mode;
        self
    }

    /// Set client settings
    pub fn http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_https_upgrade_in_production() {
        let env = Environment::production("https://app.example.com/#/orders");
        assert_eq!(url_to_https("http://api.x/y", &env), "https://api.x/y");
    }

    #[test]
    fn test_no_upgrade_outside_production() {
        let env = Environment::new(
            BuildMode::Development,
            Some("https://app.example.com".to_string()),
        );
        assert_eq!(url_to_https("http://api.x/y", &env), "http://api.x/y");
    }

    #[test]
    fn test_no_upgrade_on_plain_http_page() {
        let env = Environment::production("http://app.example.com");
        assert_eq!(url_to_https("http://api.x/y", &env), "http://api.x/y");
        assert_eq!(url_to_https("http://api.x/y", &Environment::default()), "http://api.x/y");
    }

    #[test]
    fn test_upgrade_is_first_substring_only() {
        let env = Environment::production("https://app.example.com");
        assert_eq!(
            url_to_https("http://api.x/http/y", &env),
            "https://api.x/http/y"
        );
        assert_eq!(url_to_https("https://api.x", &env), "httpss://api.x");
        assert_eq!(url_to_https("/relative/path", &env), "/relative/path");
    }

    #[test]
    fn test_environment_from_lookup() {
        let env = Environment::from_lookup(lookup(&[
            (ENV_MODE, "Production"),
            (ENV_PAGE_URL, "https://app.example.com"),
        ]));
        assert!(env.is_production());
        assert!(env.page_is_https());

        let env = Environment::from_lookup(lookup(&[(ENV_MODE, "dev")]));
        assert_eq!(env, Environment::default());
    }

    #[test]
    fn test_config_from_lookup() {
        let config = GatewayConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://api.example.com/"),
            (ENV_TIMEOUT_SECS, "3"),
            (ENV_PROXY, "http://proxy.internal:3128"),
        ]))
        .unwrap();

        assert_eq!(config.http.proxy.as_deref(), Some("http://proxy.internal:3128"));

        assert_eq!(config.http.timeout, Duration::from_secs(3));
        assert_eq!(
            config.http.base_url.as_ref().map(|u| u.as_str()),
            Some("https://api.example.com/")
        );
        assert_eq!(config.session_expiry, SessionExpiryMode::Hold);
        assert_eq!(config.timestamp, "10000");
    }

    #[test]
    fn test_config_rejects_bad_timeout() {
        let err = GatewayConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(GatewayConfig::default().http.timeout, Duration::from_secs(10));
    }
}
