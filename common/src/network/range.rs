//! # Provider Range Model
//!
//! Published CIDR blocks of the reverse proxy sitting in front of a target.
//! A [`RangeSet`] is built once per scan and only read afterwards, so workers
//! share it through an `Arc` without locking.

use std::net::IpAddr;
use std::sync::{Arc, OnceLock};

use ipnetwork::{Ipv4Network, Ipv6Network};
use tracing::debug;

/// Cloudflare IPv4 blocks used when the live list is unavailable.
pub const CLOUDFLARE_IPV4: &[&str] = &[
    "103.21.244.0/22",
    "103.22.200.0/22",
    "103.31.4.0/22",
    "104.16.0.0/13",
    "104.24.0.0/14",
    "108.162.192.0/18",
    "131.0.72.0/22",
    "141.101.64.0/18",
    "162.158.0.0/15",
    "172.64.0.0/13",
    "173.245.48.0/20",
    "188.114.96.0/20",
    "190.93.240.0/20",
    "197.234.240.0/22",
    "198.41.128.0/17",
];

/// Cloudflare IPv6 blocks used when the live list is unavailable.
pub const CLOUDFLARE_IPV6: &[&str] = &[
    "2400:cb00::/32",
    "2606:4700::/32",
    "2803:f800::/32",
    "2405:b500::/32",
    "2405:8100::/32",
    "2a06:98c0::/29",
    "2c0f:f248::/32",
];

static DEFAULT_RANGES: OnceLock<Arc<RangeSet>> = OnceLock::new();

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    ipv4: Vec<Ipv4Network>,
    ipv6: Vec<Ipv6Network>,
}

impl RangeSet {
    /// Parses both CIDR lists. Entries that fail to parse are skipped.
    pub fn from_cidrs<S: AsRef<str>>(ipv4: &[S], ipv6: &[S]) -> Self {
        Self {
            ipv4: parse_prefixes(ipv4),
            ipv6: parse_prefixes(ipv6),
        }
    }

    /// The embedded Cloudflare table, built on first use and shared afterwards.
    pub fn defaults() -> Arc<RangeSet> {
        DEFAULT_RANGES
            .get_or_init(|| Arc::new(RangeSet::from_cidrs(CLOUDFLARE_IPV4, CLOUDFLARE_IPV6)))
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.ipv4.is_empty() && self.ipv6.is_empty()
    }

    pub fn ipv4(&self) -> &[Ipv4Network] {
        &self.ipv4
    }

    pub fn ipv6(&self) -> &[Ipv6Network] {
        &self.ipv6
    }

    /// Checks the address against the prefix list of its own family.
    pub fn contains(&self, ip: IpAddr) -> bool {
        match ip {
            IpAddr::V4(ipv4_addr) => self.ipv4.iter().any(|net| net.contains(ipv4_addr)),
            IpAddr::V6(ipv6_addr) => self.ipv6.iter().any(|net| net.contains(ipv6_addr)),
        }
    }
}

/// Whether `ip` belongs to the provider.
///
/// An address that does not parse is reported as *not* belonging to the
/// provider, so it still surfaces as a candidate origin.
pub fn is_provider_address(ip: &str, ranges: &RangeSet) -> bool {
    match ip.parse::<IpAddr>() {
        Ok(addr) => ranges.contains(addr),
        Err(e) => {
            debug!(ip, "Unparseable address treated as non-provider: {e}");
            false
        }
    }
}

fn parse_prefixes<N, S>(cidrs: &[S]) -> Vec<N>
where
    N: std::str::FromStr,
    N::Err: std::fmt::Display,
    S: AsRef<str>,
{
    cidrs
        .iter()
        .filter_map(|cidr| {
            let cidr = cidr.as_ref().trim();
            match cidr.parse::<N>() {
                Ok(net) => Some(net),
                Err(e) => {
                    debug!(cidr, "Skipping invalid CIDR: {e}");
                    None
                }
            }
        })
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
