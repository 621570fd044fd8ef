//! ipinfo - an async client for the ipinfo.io address lookup service
//!
//! Lookups go through a small pipeline: a pluggable cache is consulted first,
//! reserved (bogon) addresses are answered locally, and everything else costs
//! exactly one HTTP request whose outcome is classified into a typed error.

pub mod api;
pub mod bogon;
pub mod cache;
pub mod client;
pub mod country;
pub mod error;
pub mod http;
pub mod model;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export core types for library users
pub use api::IpApi;
pub use bogon::{is_bogon, is_bogon_addr};
pub use cache::{IpCache, LruCache, MemoryCache, NoCache};
pub use client::{IpinfoClient, IpinfoClientBuilder};
pub use error::{ConfigError, LookupError};
pub use http::{HttpTransport, ResponseError, TransportError};
pub use model::{DecodeError, IpDetails};
