//! Bogon (reserved / non-routable) address classification
//!
//! Addresses in these ranges never carry real-world geolocation data, so
//! lookups for them are answered locally without contacting the service.

use ipnet::IpNet;
use std::net::IpAddr;
use std::sync::LazyLock;

/// Reserved IPv4 ranges, checked in order.
const BOGON_V4: &[&str] = &[
    "0.0.0.0/8",          // "this" network
    "10.0.0.0/8",         // private-use
    "100.64.0.0/10",      // shared address space (CGNAT)
    "127.0.0.0/8",        // loopback
    "169.254.0.0/16",     // link-local
    "172.16.0.0/12",      // private-use
    "192.0.0.0/24",       // IETF protocol assignments
    "192.0.2.0/24",       // TEST-NET-1
    "192.168.0.0/16",     // private-use
    "198.18.0.0/15",      // benchmarking
    "198.51.100.0/24",    // TEST-NET-2
    "203.0.113.0/24",     // TEST-NET-3
    "224.0.0.0/4",        // multicast
    "240.0.0.0/4",        // reserved
    "255.255.255.255/32", // limited broadcast
];

/// Reserved IPv6 ranges, checked in order.
const BOGON_V6: &[&str] = &[
    "::/128",                // unspecified
    "::1/128",               // loopback
    "::ffff:0:0/96",         // IPv4-mapped
    "::/96",                 // IPv4-compatible (deprecated)
    "100::/64",              // discard-only
    "2001:10::/28",          // ORCHID
    "2001:db8::/32",         // documentation
    "fc00::/7",              // unique local
    "fe80::/10",             // link-local unicast
    "fec0::/10",             // site-local (deprecated)
    "ff00::/8",              // multicast
    // 6to4 encodings of IPv4 bogons
    "2002::/24",
    "2002:a00::/24",
    "2002:7f00::/24",
    "2002:a9fe::/32",
    "2002:ac10::/28",
    "2002:c000::/40",
    "2002:c000:200::/40",
    "2002:c0a8::/32",
    "2002:c612::/31",
    "2002:c633:6400::/40",
    "2002:cb00:7100::/40",
    "2002:e000::/20",
    "2002:f000::/20",
    "2002:ffff:ffff::/48",
    // Teredo encodings of IPv4 bogons
    "2001::/40",
    "2001:0:a00::/40",
    "2001:0:7f00::/40",
    "2001:0:a9fe::/48",
    "2001:0:ac10::/44",
    "2001:0:c000::/56",
    "2001:0:c000:200::/56",
    "2001:0:c0a8::/48",
    "2001:0:c612::/47",
    "2001:0:c633:6400::/56",
    "2001:0:cb00:7100::/56",
    "2001:0:e000::/36",
    "2001:0:f000::/36",
    "2001:0:ffff:ffff::/64",
];

/// Parsed bogon table: all IPv4 ranges followed by all IPv6 ranges.
static BOGON_NETWORKS: LazyLock<Vec<IpNet>> = LazyLock::new(|| {
    BOGON_V4
        .iter()
        .chain(BOGON_V6.iter())
        .filter_map(|cidr| cidr.parse::<IpNet>().ok())
        .collect()
});

/// Returns the first reserved range containing `ip`, if any.
pub fn bogon_range_for(ip: IpAddr) -> Option<IpNet> {
    BOGON_NETWORKS.iter().find(|net| net.contains(&ip)).copied()
}

/// Returns the first reserved range containing `address`, if it parses.
pub fn bogon_range(address: &str) -> Option<IpNet> {
    address.parse::<IpAddr>().ok().and_then(bogon_range_for)
}

/// Checks whether an already-parsed address is a bogon.
pub fn is_bogon_addr(ip: IpAddr) -> bool {
    bogon_range_for(ip).is_some()
}

/// Checks whether `address` falls in a reserved, non-routable range.
///
/// Strings that do not parse as an IP address are never bogons; the
/// remote service is left to reject them.
pub fn is_bogon(address: &str) -> bool {
    bogon_range(address).is_some()
}
