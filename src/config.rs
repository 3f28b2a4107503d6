//! Configuration for a fetch run.

use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://antpeak.com";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_APP_VERSION: &str = "3.7.8";

/// Configuration for a single fetch run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL of the provider API.
    pub api_base: String,
    /// User agent sent on every request.
    pub user_agent: String,
    /// App version reported during registration.
    pub app_version: String,
    /// Protocols probed per location, in order.
    pub protocols: Vec<String>,
    /// Maximum number of locations scanned per run.
    pub max_scan_attempts: usize,
    /// Timeout applied to every outbound request.
    pub request_timeout: Duration,
    /// URL requested through the selected proxy to verify it.
    pub verify_url: String,
}

impl FetchConfig {
    /// Create a new configuration builder.
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::new()
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfigBuilder::new().build()
    }
}

/// Builder for `FetchConfig`.
pub struct FetchConfigBuilder {
    api_base: Option<String>,
    user_agent: Option<String>,
    app_version: Option<String>,
    protocols: Option<Vec<String>>,
    max_scan_attempts: Option<usize>,
    request_timeout: Option<Duration>,
    verify_url: Option<String>,
}

impl FetchConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            api_base: None,
            user_agent: None,
            app_version: None,
            protocols: None,
            max_scan_attempts: None,
            request_timeout: None,
            verify_url: None,
        }
    }

    /// Set the base URL of the provider API.
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set the user agent sent on every request.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set the app version reported during registration.
    pub fn app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = Some(version.into());
        self
    }

    /// Set the protocols probed per location, in order.
    pub fn protocols(mut self, protocols: Vec<impl Into<String>>) -> Self {
        self.protocols = Some(protocols.into_iter().map(Into::into).collect());
        self
    }

    /// Set the maximum number of locations scanned per run.
    pub fn max_scan_attempts(mut self, attempts: usize) -> Self {
        self.max_scan_attempts = Some(attempts);
        self
    }

    /// Set the timeout applied to every outbound request.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the URL requested through the selected proxy to verify it.
    pub fn verify_url(mut self, url: impl Into<String>) -> Self {
        self.verify_url = Some(url.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> FetchConfig {
        FetchConfig {
            api_base: self.api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            user_agent: self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            app_version: self.app_version.unwrap_or_else(|| DEFAULT_APP_VERSION.to_string()),
            protocols: self
                .protocols
                .unwrap_or_else(|| vec!["https".to_string(), "http".to_string()]),
            max_scan_attempts: self.max_scan_attempts.unwrap_or(10),
            request_timeout: self.request_timeout.unwrap_or(Duration::from_secs(10)),
            verify_url: self
                .verify_url
                .unwrap_or_else(|| "https://httpbin.org/ip".to_string()),
        }
    }
}

impl Default for FetchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
