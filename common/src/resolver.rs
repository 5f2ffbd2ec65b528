use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{DEFAULT_BACKOFF, DEFAULT_RETRIES, DEFAULT_TIMEOUT};
use crate::error::LookupError;

/// Raw name resolution, one attempt per call.
///
/// Retries, timeouts and cancellation are layered on top by the resolver
/// client in `cloudrip-core`.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// All A and AAAA addresses of `fqdn`.
    async fn lookup_ip(&self, fqdn: &str) -> Result<Vec<IpAddr>, LookupError>;

    /// Canonical name `fqdn` points to. May carry a trailing root dot.
    async fn lookup_cname(&self, fqdn: &str) -> Result<String, LookupError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Attempts beyond the first. `2` allows up to three attempts.
    pub retries: u32,
    pub backoff: Duration,
    pub timeout: Duration,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            backoff: DEFAULT_BACKOFF,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
