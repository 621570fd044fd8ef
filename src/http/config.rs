//! HTTP client configuration

use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default User-Agent header value
pub const DEFAULT_USER_AGENT: &str = concat!("IPinfoClient/Rust/", env!("CARGO_PKG_VERSION"));

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Timeout applied to each request (default: 5s)
    pub timeout: Duration,
    /// User-Agent sent with each request
    pub user_agent: String,
    /// Caller-supplied client; when set, `timeout` is applied per request
    /// and the client's own settings are otherwise left alone
    pub client: Option<reqwest::Client>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            client: None,
        }
    }
}

impl HttpClientConfig {
    /// Create a new HttpClientConfig builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::new()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout.is_zero() {
            return Err("timeout must be greater than 0".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        Ok(())
    }
}

/// Builder for HttpClientConfig
#[derive(Debug, Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the User-Agent header value
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Use an existing reqwest client instead of building one
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.config.client = Some(client);
        self
    }

    /// Build the configuration, validating it
    pub fn build(self) -> Result<HttpClientConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}
