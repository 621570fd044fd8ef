//! Test utilities: a scripted transport that counts requests

use crate::http::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Transport that answers from a fixed table and records every request
#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<HashMap<String, Result<HttpResponse, TransportError>>>,
    fallback: Option<HttpResponse>,
    requests: Mutex<Vec<HttpRequest>>,
    count: AtomicUsize,
}

impl StubTransport {
    /// Stub that answers every URL with `status` and `body`
    pub fn always(status: u16, body: &str) -> Self {
        Self {
            fallback: Some(HttpResponse::new(status, body)),
            ..Self::default()
        }
    }

    /// Answer requests whose URL ends with `suffix`
    pub fn respond(self, suffix: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .expect("mutex poisoned")
            .insert(suffix.to_string(), Ok(HttpResponse::new(status, body)));
        self
    }

    /// Fail requests whose URL ends with `suffix`
    pub fn fail(self, suffix: &str, error: TransportError) -> Self {
        self.responses
            .lock()
            .expect("mutex poisoned")
            .insert(suffix.to_string(), Err(error));
        self
    }

    /// Number of requests executed so far
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// All requests executed so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("mutex poisoned").clone()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("mutex poisoned")
            .push(request.clone());

        let responses = self.responses.lock().expect("mutex poisoned");
        let scripted = responses
            .iter()
            .filter(|(suffix, _)| request.url.ends_with(suffix.as_str()))
            .max_by_key(|(suffix, _)| suffix.len())
            .map(|(_, result)| result.clone());
        match (scripted, &self.fallback) {
            (Some(result), _) => result,
            (None, Some(fallback)) => Ok(fallback.clone()),
            (None, None) => Ok(HttpResponse::new(404, "")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_counts_and_matches_longest_suffix() {
        let stub = StubTransport::default()
            .respond("/", 200, "self")
            .respond("/8.8.8.8", 200, "google")
            .fail("/1.1.1.1", TransportError::Timeout);

        let response = stub
            .execute(HttpRequest::get("https://ipinfo.io/8.8.8.8"))
            .await
            .unwrap();
        assert_eq!(response.body, "google");

        let response = stub
            .execute(HttpRequest::get("https://ipinfo.io/"))
            .await
            .unwrap();
        assert_eq!(response.body, "self");

        let result = stub
            .execute(HttpRequest::get("https://ipinfo.io/1.1.1.1"))
            .await;
        assert_eq!(result.unwrap_err(), TransportError::Timeout);

        let response = stub
            .execute(HttpRequest::get("https://ipinfo.io/9.9.9.9"))
            .await
            .unwrap();
        assert_eq!(response.status, 404);

        assert_eq!(stub.count(), 4);
        assert_eq!(stub.requests().len(), 4);
    }
}
