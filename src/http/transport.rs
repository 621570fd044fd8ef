//! HTTP transport abstraction and its reqwest implementation

use super::config::HttpClientConfig;
use super::{HttpRequest, HttpResponse, Method};
use crate::error::ConfigError;
use async_trait::async_trait;
use std::time::Duration;

/// Failure that happened before any HTTP response was received
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Could not connect to the server (DNS failure, refused, unreachable)
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Any other failure while sending the request or reading the body
    #[error("HTTP request failed: {0}")]
    Request(String),
}

/// Executes a single HTTP request.
///
/// Implementations make exactly one attempt and never retry. Timeouts are
/// the transport's responsibility and surface as [`TransportError::Timeout`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and return the response status, headers and body
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Transport backed by a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport from configuration
    ///
    /// Uses the configured client when one was supplied, otherwise builds a
    /// new one.
    pub fn new(config: &HttpClientConfig) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;
        let client = match &config.client {
            Some(client) => client.clone(),
            None => reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(|e| ConfigError::HttpClient(e.to_string()))?,
        };
        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
        }
        .timeout(self.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(classify_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await.map_err(classify_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn classify_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(timeout: Duration) -> ReqwestTransport {
        let config = HttpClientConfig::builder()
            .timeout(timeout)
            .build()
            .unwrap();
        ReqwestTransport::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_execute_returns_status_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/8.8.8.8"))
            .and(header("accept", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-test", "yes")
                    .set_body_string(r#"{"ip":"8.8.8.8"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = HttpRequest::get(format!("{}/8.8.8.8", server.uri()))
            .header("Accept", "application/json");
        let response = transport(Duration::from_secs(5))
            .execute(request)
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"ip":"8.8.8.8"}"#);
        assert_eq!(response.header_value("X-Test"), Some("yes"));
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let response = transport(Duration::from_secs(5))
            .execute(HttpRequest::get(server.uri()))
            .await
            .unwrap();
        assert_eq!(response.status, 500);
        assert_eq!(response.body, "boom");
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let result = transport(Duration::from_millis(50))
            .execute(HttpRequest::get(server.uri()))
            .await;
        assert_eq!(result.unwrap_err(), TransportError::Timeout);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop a listener so the port is very likely closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = transport(Duration::from_secs(2))
            .execute(HttpRequest::get(format!("http://{addr}/")))
            .await;
        assert!(
            matches!(result, Err(TransportError::Connect(_))),
            "unexpected result: {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_supplied_client_is_used() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("x-custom", "1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("x-custom", reqwest::header::HeaderValue::from_static("1"));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap();
        let config = HttpClientConfig::builder().client(client).build().unwrap();

        let response = ReqwestTransport::new(&config)
            .unwrap()
            .execute(HttpRequest::get(server.uri()))
            .await
            .unwrap();
        assert_eq!(response.status, 204);
    }
}
