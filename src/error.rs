//! Error types for lookups and client construction

use crate::http::{ResponseError, TransportError};
use crate::model::DecodeError;
use thiserror::Error;

/// Errors that can occur while resolving an address
///
/// Bogon answers and cache hits are successes and never appear here.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No response was received (connection failure, timeout)
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered with a non-success status
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// The service answered with success but the body was not a valid record
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl LookupError {
    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            LookupError::Response(e) => Some(e.status()),
            _ => None,
        }
    }
}

/// Errors that can occur while building a client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A configuration value was rejected
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The base URL could not be parsed
    #[error("Invalid base URL {url}: {reason}")]
    BaseUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The underlying HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}
