//! Client entry point and builder

use crate::api::{IpApi, DEFAULT_BASE_URL};
use crate::cache::{IpCache, NoCache};
use crate::error::{ConfigError, LookupError};
use crate::http::{HttpClientConfig, HttpTransport, ReqwestTransport};
use crate::model::IpDetails;
use reqwest::Url;
use std::sync::Arc;

/// ipinfo.io client
///
/// Holds the configured [`IpApi`] resolver. Build one with
/// [`IpinfoClient::builder`] and keep it for the lifetime of the program;
/// clones share the same cache and transport.
///
/// # Examples
///
/// ```no_run
/// use ipinfo::{IpinfoClient, LruCache};
/// use ipinfo::http::HttpClientConfig;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = IpinfoClient::builder()
///         .access_token("my-token")
///         .http_config(
///             HttpClientConfig::builder()
///                 .timeout(Duration::from_secs(2))
///                 .build()?,
///         )
///         .cache(LruCache::default())
///         .build()?;
///
///     let details = client.lookup("1.1.1.1").await?;
///     println!("{:?}", details.org);
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct IpinfoClient {
    api: IpApi,
    http_config: HttpClientConfig,
}

impl IpinfoClient {
    /// Create a new client builder
    pub fn builder() -> IpinfoClientBuilder {
        IpinfoClientBuilder::new()
    }

    /// The address lookup API
    pub fn ip_api(&self) -> &IpApi {
        &self.api
    }

    /// HTTP configuration the client was built with
    pub fn http_config(&self) -> &HttpClientConfig {
        &self.http_config
    }

    /// The cache shared by all lookups on this client
    pub fn cache(&self) -> &Arc<dyn IpCache> {
        self.api.cache()
    }

    /// Look up details for `ip` (empty for the caller's own address)
    pub async fn lookup(&self, ip: &str) -> Result<IpDetails, LookupError> {
        self.api.get_details(ip).await
    }
}

/// Builder for IpinfoClient
pub struct IpinfoClientBuilder {
    access_token: String,
    http_config: HttpClientConfig,
    cache: Arc<dyn IpCache>,
    transport: Option<Arc<dyn HttpTransport>>,
    base_url: String,
}

impl IpinfoClientBuilder {
    /// Create a new builder: no token, default HTTP settings, no cache
    pub fn new() -> Self {
        Self {
            access_token: String::new(),
            http_config: HttpClientConfig::default(),
            cache: Arc::new(NoCache),
            transport: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set the API access token
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = token.into();
        self
    }

    /// Set the HTTP client configuration
    pub fn http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Cache resolved records in `cache`
    pub fn cache(self, cache: impl IpCache + 'static) -> Self {
        self.shared_cache(Arc::new(cache))
    }

    /// Cache resolved records in a cache shared with other owners
    pub fn shared_cache(mut self, cache: Arc<dyn IpCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Disable caching
    pub fn no_cache(self) -> Self {
        self.shared_cache(Arc::new(NoCache))
    }

    /// Send requests through `transport` instead of a reqwest client
    ///
    /// The HTTP configuration's timeout and client are then unused.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Send requests to `base_url` instead of ipinfo.io
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// * `ConfigError::BaseUrl` - the base URL is not an absolute http(s) URL
    /// * `ConfigError::Invalid` - the HTTP configuration is rejected
    /// * `ConfigError::HttpClient` - the reqwest client could not be built
    pub fn build(self) -> Result<IpinfoClient, ConfigError> {
        let base_url = parse_base_url(&self.base_url)?;
        self.http_config.validate().map_err(ConfigError::Invalid)?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.http_config)?),
        };

        let api = IpApi::new(transport)
            .with_cache(self.cache)
            .with_token(self.access_token)
            .with_base_url(base_url)
            .with_user_agent(self.http_config.user_agent.as_str());

        Ok(IpinfoClient {
            api,
            http_config: self.http_config,
        })
    }
}

impl Default for IpinfoClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::BaseUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::test_utils::StubTransport;
    use std::time::Duration;

    #[test]
    fn test_default_build() {
        let client = IpinfoClient::builder().build().unwrap();
        assert_eq!(client.ip_api().base_url().as_str(), "https://ipinfo.io/");
        assert_eq!(client.http_config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_base_url() {
        for url in ["not a url", "ftp://example.com/", "mailto:someone@example.com"] {
            let err = IpinfoClient::builder().base_url(url).build().unwrap_err();
            assert!(
                matches!(err, ConfigError::BaseUrl { .. }),
                "{} gave {:?}",
                url,
                err
            );
        }
    }

    #[test]
    fn test_invalid_http_config() {
        let config = HttpClientConfig {
            timeout: Duration::ZERO,
            ..HttpClientConfig::default()
        };
        let err = IpinfoClient::builder()
            .http_config(config)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_builder_wires_cache_token_and_transport() {
        let stub = Arc::new(StubTransport::always(
            200,
            r#"{"ip":"8.8.8.8","bogon":false,"country":"US"}"#,
        ));
        let cache = MemoryCache::new();
        let client = IpinfoClient::builder()
            .access_token("token123")
            .cache(cache.clone())
            .transport(stub.clone())
            .base_url("http://localhost:9999/")
            .build()
            .unwrap();

        client.lookup("8.8.8.8").await.unwrap();
        client.lookup("8.8.8.8").await.unwrap();

        assert_eq!(stub.count(), 1);
        assert_eq!(cache.len(), 1);
        assert!(client.cache().get("8.8.8.8").is_some());

        let request = &stub.requests()[0];
        assert_eq!(request.url, "http://localhost:9999/8.8.8.8");
        assert_eq!(request.header_value("Authorization"), Some("Bearer token123"));
    }

    #[tokio::test]
    async fn test_no_cache_overrides_cache() {
        let stub = Arc::new(StubTransport::always(200, r#"{"ip":"8.8.8.8"}"#));
        let client = IpinfoClient::builder()
            .cache(MemoryCache::new())
            .no_cache()
            .transport(stub.clone())
            .build()
            .unwrap();

        client.lookup("8.8.8.8").await.unwrap();
        client.lookup("8.8.8.8").await.unwrap();
        assert_eq!(stub.count(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_cache() {
        let stub = Arc::new(StubTransport::always(200, r#"{"ip":"9.9.9.9"}"#));
        let client = IpinfoClient::builder()
            .cache(MemoryCache::new())
            .transport(stub.clone())
            .build()
            .unwrap();
        let other = client.clone();

        client.lookup("9.9.9.9").await.unwrap();
        other.lookup("9.9.9.9").await.unwrap();
        assert_eq!(stub.count(), 1);
    }
}
