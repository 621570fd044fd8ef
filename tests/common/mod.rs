//! Shared test transports

#![allow(dead_code)]

use async_trait::async_trait;
use ipinfo::http::{HttpRequest, HttpResponse};
use ipinfo::{HttpTransport, TransportError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Answers from a table keyed by the last path segment and counts requests
#[derive(Default)]
pub struct CountingTransport {
    responses: HashMap<String, (u16, String)>,
    count: AtomicUsize,
}

impl CountingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer lookups of `ip` (use "" for the self-lookup)
    pub fn respond(mut self, ip: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(ip.to_string(), (status, body.to_string()));
        self
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

pub fn last_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or_default()
}

#[async_trait]
impl HttpTransport for CountingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(last_segment(&request.url)) {
            Some((status, body)) => Ok(HttpResponse::new(*status, body.as_str())),
            None => Ok(HttpResponse::new(404, r#"{"error":"no stub"}"#)),
        }
    }
}

/// Holds lookups of one address until released; other addresses answer at once
pub struct GatedTransport {
    pub gated_ip: String,
    pub release: Arc<Notify>,
    pub started: Arc<Notify>,
}

impl GatedTransport {
    pub fn new(gated_ip: &str) -> Self {
        Self {
            gated_ip: gated_ip.to_string(),
            release: Arc::new(Notify::new()),
            started: Arc::new(Notify::new()),
        }
    }
}

#[async_trait]
impl HttpTransport for GatedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let ip = last_segment(&request.url).to_string();
        if ip == self.gated_ip {
            self.started.notify_one();
            self.release.notified().await;
        }
        Ok(HttpResponse::new(
            200,
            format!(r#"{{"ip":"{}","bogon":false}}"#, ip),
        ))
    }
}
