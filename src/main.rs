//! ipinfo - look up IP address details from the command line.
//!
//! This is the command-line interface for the ipinfo library.

#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::Parser;
use ipinfo::http::HttpClientConfig;
use ipinfo::{IpDetails, IpinfoClient, LookupError, LruCache};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Get the version string for ipinfo
fn get_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(env!("CARGO_PKG_VERSION"), "-UNRELEASED")
    } else {
        env!("CARGO_PKG_VERSION")
    }
}

/// Command-line arguments for the lookup tool.
#[derive(Parser, Debug)]
#[clap(author, version = get_version(), about = "Look up IP address details from ipinfo.io", long_about = None)]
struct Args {
    /// IP addresses to look up (none looks up your own address)
    addresses: Vec<String>,

    /// API access token
    #[clap(long, env = "IPINFO_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in milliseconds
    #[clap(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Disable the result cache
    #[clap(long)]
    no_cache: bool,

    /// Maximum number of cached results
    #[clap(long, default_value_t = ipinfo::cache::lru::DEFAULT_MAX_ENTRIES)]
    cache_size: u64,

    /// Override the API base URL
    #[clap(long)]
    base_url: Option<String>,

    /// Output results in JSON format
    #[clap(long)]
    json: bool,

    /// Enable verbose output (use -vv for trace output)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    // Create single-threaded tokio runtime for lower overhead
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime");

    match runtime.block_on(async_main(args)) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "ipinfo=debug",
        _ => "ipinfo=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs all lookups; returns whether every one succeeded.
async fn async_main(args: Args) -> Result<bool> {
    let http_config = HttpClientConfig::builder()
        .timeout(Duration::from_millis(args.timeout_ms))
        .build()
        .map_err(anyhow::Error::msg)
        .context("Invalid HTTP settings")?;

    let mut builder = IpinfoClient::builder()
        .access_token(args.token.clone().unwrap_or_default())
        .http_config(http_config);
    if let Some(base_url) = &args.base_url {
        builder = builder.base_url(base_url);
    }
    builder = if args.no_cache || args.cache_size == 0 {
        builder.no_cache()
    } else {
        builder.cache(LruCache::with_capacity(args.cache_size))
    };
    let client = builder.build().context("Failed to create client")?;

    let addresses = if args.addresses.is_empty() {
        vec![String::new()]
    } else {
        args.addresses.clone()
    };

    // Lookups are independent; run them concurrently and report in order
    let results = futures::future::join_all(
        addresses
            .iter()
            .map(|address| client.lookup(address.as_str())),
    )
    .await;

    let mut all_ok = true;
    let mut found = Vec::new();
    for (address, result) in addresses.iter().zip(results) {
        match result {
            Ok(details) => found.push(details),
            Err(e) => {
                all_ok = false;
                report_error(address, &e);
            }
        }
    }

    if args.json {
        // Failures are already on stderr; print nothing rather than `[]`
        if !found.is_empty() {
            let output = if args.addresses.len() <= 1 && found.len() == 1 {
                serde_json::to_string_pretty(&found[0])?
            } else {
                serde_json::to_string_pretty(&found)?
            };
            println!("{}", output);
        }
    } else {
        for details in &found {
            print_details(details);
        }
    }

    Ok(all_ok)
}

fn report_error(address: &str, error: &LookupError) {
    let target = if address.is_empty() {
        "own address"
    } else {
        address
    };
    match error {
        LookupError::Response(e) => {
            eprintln!("Error looking up {}: {}", target, e);
            if let Some(retry_after) = e.exchange.response.header_value("retry-after") {
                eprintln!("  Retry after: {}s", retry_after);
            }
        }
        other => eprintln!("Error looking up {}: {}", target, other),
    }
}

fn print_details(details: &IpDetails) {
    println!("{}", details.ip);
    print_field("Bogon", details.bogon);
    if details.bogon {
        println!();
        return;
    }

    let fields = [
        ("Hostname", details.hostname.as_deref()),
        ("City", details.city.as_deref()),
        ("Region", details.region.as_deref()),
        ("Country", details.country.as_deref()),
        ("Country Name", details.country_name.as_deref()),
        ("Location", details.loc.as_deref()),
        ("Org", details.org.as_deref()),
        ("Postal", details.postal.as_deref()),
        ("Timezone", details.timezone.as_deref()),
        ("Company", details.company.as_ref().map(|c| c.name.as_str())),
        ("ASN", details.asn.as_ref().map(|a| a.asn.as_str())),
        ("Carrier", details.carrier.as_ref().map(|c| c.name.as_str())),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            print_field(label, value);
        }
    }
    if details.anycast == Some(true) {
        print_field("Anycast", true);
    }
    if details.is_crawler == Some(true) {
        print_field("Crawler", true);
    }
    println!();
}

fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<13} {}", format!("{}:", label), value);
}
