//! Lookup result types and JSON decoding

use crate::country::country_name;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Error returned when a successful response body is not a valid details record
#[derive(Debug, thiserror::Error)]
#[error("Failed to decode response body: {message}")]
pub struct DecodeError {
    /// Description of what went wrong
    pub message: String,
    /// The body that failed to decode
    pub body: String,
}

/// Details about an IP address as returned by the lookup service.
///
/// A record is never modified after it has been built; every new lookup
/// produces a fresh value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpDetails {
    /// The address the details describe
    pub ip: String,
    /// Whether the address is in a reserved, non-routable range
    #[serde(default)]
    pub bogon: bool,
    /// Reverse DNS hostname
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// City name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Region or state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// ISO 3166 country code (e.g., "US")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// English country name; filled from `country` when the service omits it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    /// "latitude,longitude"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<String>,
    /// Organization, usually "AS<number> <name>"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    /// Postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal: Option<String>,
    /// IANA time zone (e.g., "America/Los_Angeles")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Whether the address is anycast
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anycast: Option<bool>,
    /// Whether the address belongs to a known web crawler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_crawler: Option<bool>,
    /// Autonomous system details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asn: Option<AsnDetails>,
    /// Company that owns the address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyDetails>,
    /// Mobile carrier details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<CarrierDetails>,
    /// Privacy detection flags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<PrivacyDetails>,
    /// Abuse contact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abuse: Option<AbuseDetails>,
    /// Hosted domains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<DomainsDetails>,
}

impl IpDetails {
    /// Builds the record for a bogon address: only `ip` and `bogon` are set.
    pub fn bogon(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            bogon: true,
            hostname: None,
            city: None,
            region: None,
            country: None,
            country_name: None,
            loc: None,
            org: None,
            postal: None,
            timezone: None,
            anycast: None,
            is_crawler: None,
            asn: None,
            company: None,
            carrier: None,
            privacy: None,
            abuse: None,
            domains: None,
        }
    }

    /// Parsed form of `ip`, if it is a valid address
    pub fn ip_addr(&self) -> Option<IpAddr> {
        self.ip.parse().ok()
    }

    /// Latitude and longitude parsed from `loc`
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let (lat, lon) = self.loc.as_deref()?.split_once(',')?;
        Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
    }
}

/// Autonomous system details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsnDetails {
    /// AS number, e.g. "AS15169"
    pub asn: String,
    /// AS name
    #[serde(default)]
    pub name: String,
    /// AS domain
    #[serde(default)]
    pub domain: String,
    /// Announced route (CIDR)
    #[serde(default)]
    pub route: String,
    /// Network type (isp, business, hosting, education)
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// Company details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDetails {
    /// Company name
    pub name: String,
    /// Company domain
    #[serde(default)]
    pub domain: String,
    /// Company type
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// Mobile carrier details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierDetails {
    /// Carrier name
    pub name: String,
    /// Mobile country code
    #[serde(default)]
    pub mcc: String,
    /// Mobile network code
    #[serde(default)]
    pub mnc: String,
}

/// Privacy detection flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyDetails {
    /// Address belongs to a VPN
    pub vpn: bool,
    /// Address is an open proxy
    pub proxy: bool,
    /// Address is a Tor exit node
    pub tor: bool,
    /// Address belongs to a relay service
    pub relay: bool,
    /// Address belongs to a hosting provider
    pub hosting: bool,
    /// Name of the privacy service, if known
    pub service: String,
}

/// Abuse contact details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbuseDetails {
    /// Postal address
    pub address: String,
    /// Country code
    pub country: String,
    /// Contact email
    pub email: String,
    /// Contact name
    pub name: String,
    /// Network range
    pub network: String,
    /// Phone number
    pub phone: String,
}

/// Domains hosted on an address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainsDetails {
    /// Address queried
    pub ip: String,
    /// Total number of domains
    pub total: u64,
    /// Sample of hosted domains
    pub domains: Vec<String>,
}

/// Decodes a response body into an [`IpDetails`] record.
///
/// The whole body must decode; a partially populated record is never returned.
pub fn decode_details(body: &str) -> Result<IpDetails, DecodeError> {
    let mut details: IpDetails = serde_json::from_str(body).map_err(|e| DecodeError {
        message: e.to_string(),
        body: body.to_string(),
    })?;
    if details.country_name.is_none() {
        details.country_name = details
            .country
            .as_deref()
            .and_then(country_name)
            .map(str::to_string);
    }
    Ok(details)
}
