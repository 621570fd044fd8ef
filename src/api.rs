//! Address lookup resolver
//!
//! [`IpApi`] runs every query through the same pipeline: cache check, bogon
//! check, a single GET, response validation, decoding, and cache store.

use crate::bogon::is_bogon;
use crate::cache::{IpCache, NoCache};
use crate::error::LookupError;
use crate::http::config::DEFAULT_USER_AGENT;
use crate::http::{validate, HttpExchange, HttpRequest, HttpTransport};
use crate::model::{decode_details, IpDetails};
use reqwest::Url;
use std::fmt;
use std::net::IpAddr;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

/// Base URL of the ipinfo.io API
pub const DEFAULT_BASE_URL: &str = "https://ipinfo.io/";

static DEFAULT_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"));

/// Resolves addresses to [`IpDetails`].
///
/// Cheap to clone; clones share the transport and the cache. Lookups may run
/// concurrently on the same instance.
///
/// # Examples
///
/// ```no_run
/// use ipinfo::IpinfoClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = IpinfoClient::builder().access_token("my-token").build()?;
///
///     let details = client.ip_api().get_details("8.8.8.8").await?;
///     println!("{} is in {:?}", details.ip, details.country);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct IpApi {
    transport: Arc<dyn HttpTransport>,
    cache: Arc<dyn IpCache>,
    base_url: Url,
    token: Option<String>,
    user_agent: String,
}

impl IpApi {
    /// Create a resolver over `transport` with no cache and default settings
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            cache: Arc::new(NoCache),
            base_url: DEFAULT_URL.clone(),
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Use `cache` for storing resolved records
    pub fn with_cache(mut self, cache: Arc<dyn IpCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Send `token` as a bearer token; an empty token sends none
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    /// Send requests to `base_url` instead of ipinfo.io
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the User-Agent header value
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The cache this resolver reads from and writes to
    pub fn cache(&self) -> &Arc<dyn IpCache> {
        &self.cache
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Look up details for `ip`.
    ///
    /// An empty string looks up the caller's own public address. Cached
    /// records are returned without a request; bogon addresses are answered
    /// locally and never cached. A self-lookup still reads the cache, so a
    /// caller may seed it, but its answer is never stored.
    ///
    /// # Errors
    ///
    /// * `LookupError::Transport` - no response was received
    /// * `LookupError::Response` - the service answered with a non-2xx status
    /// * `LookupError::Decode` - a 2xx body was not a valid record
    pub async fn get_details(&self, ip: &str) -> Result<IpDetails, LookupError> {
        let self_lookup = ip.is_empty();

        if let Some(cached) = self.cache.get(ip) {
            debug!(ip, "cache hit");
            return Ok(cached);
        }

        if !self_lookup && is_bogon(ip) {
            debug!(ip, "bogon address, answering locally");
            return Ok(IpDetails::bogon(ip));
        }

        let request = self.build_request(ip);
        debug!(url = %request.url, "sending lookup request");

        let response = match self.transport.execute(request.clone()).await {
            Ok(response) => response,
            Err(e) => {
                warn!(ip, error = %e, "lookup request failed");
                return Err(e.into());
            }
        };

        let exchange = validate(HttpExchange::new(request, response)).map_err(|e| {
            warn!(ip, status = e.status(), reason = %e.reason, "lookup rejected");
            e
        })?;

        let details = decode_details(&exchange.response.body).map_err(|e| {
            warn!(ip, error = %e.message, "unexpected response body");
            e
        })?;

        if !self_lookup {
            self.cache.set(ip, details.clone());
        }
        Ok(details)
    }

    /// Look up details for an already-parsed address
    pub async fn get_details_addr(&self, ip: IpAddr) -> Result<IpDetails, LookupError> {
        self.get_details(&ip.to_string()).await
    }

    /// Look up details for the caller's own public address
    pub async fn get_own_details(&self) -> Result<IpDetails, LookupError> {
        self.get_details("").await
    }

    fn build_request(&self, ip: &str) -> HttpRequest {
        let request = HttpRequest::get(self.lookup_url(ip))
            .header("Accept", "application/json")
            .header("User-Agent", self.user_agent.as_str());
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    fn lookup_url(&self, ip: &str) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(ip);
        }
        url.into()
    }
}

impl fmt::Debug for IpApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IpApi")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}
