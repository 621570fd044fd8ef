//! Classification of HTTP responses into success or failure

use super::HttpExchange;
use serde_json::Value;

/// The service answered with a non-success status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason} (status {status})", status = .exchange.response.status)]
pub struct ResponseError {
    /// The request and response that failed
    pub exchange: HttpExchange,
    /// Human-readable reason, taken from the body when it carries one
    pub reason: String,
}

impl ResponseError {
    /// Status code of the failed response
    pub fn status(&self) -> u16 {
        self.exchange.response.status
    }

    /// Raw body of the failed response
    pub fn body(&self) -> &str {
        &self.exchange.response.body
    }
}

/// Passes a 2xx exchange through untouched; anything else becomes a
/// [`ResponseError`] carrying the whole exchange.
pub fn validate(exchange: HttpExchange) -> Result<HttpExchange, ResponseError> {
    if exchange.response.is_success() {
        return Ok(exchange);
    }

    let reason = error_message(&exchange.response.body).unwrap_or_else(|| {
        format!(
            "HTTP request failed with status {}",
            exchange.response.status
        )
    });
    Err(ResponseError { exchange, reason })
}

/// Extracts the service's error message from a body such as
/// `{"error": "..."}` or `{"error": {"title": "...", "message": "..."}}`.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        Value::Object(error) => ["message", "title"]
            .iter()
            .filter_map(|key| error.get(*key).and_then(Value::as_str))
            .find(|message| !message.is_empty())
            .map(str::to_string),
        _ => None,
    }
}
