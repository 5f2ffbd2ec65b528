//! # Resolver Client
//!
//! Wraps a raw [`DnsResolver`] with the lookup policy used by every worker:
//!
//! * each attempt is bounded by its own timeout,
//! * failed attempts are retried after an exponential backoff
//!   (`backoff * 2^attempt`, capped at [`MAX_BACKOFF`]),
//! * every wait observes the scan's cancellation token.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use cloudrip_common::error::LookupError;
use cloudrip_common::network::record::ResolvedAddress;
use cloudrip_common::resolver::{DnsResolver, ResolverOptions};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::metrics::MetricsCollector;

mod system;

pub use system::SystemResolver;

/// Upper bound for a single backoff sleep.
pub const MAX_BACKOFF: Duration = Duration::from_secs(30);

pub struct ResolverClient {
    inner: Arc<dyn DnsResolver>,
    opts: ResolverOptions,
    metrics: Option<Arc<MetricsCollector>>,
}

impl ResolverClient {
    pub fn new(inner: Arc<dyn DnsResolver>, opts: ResolverOptions) -> Self {
        Self {
            inner,
            opts,
            metrics: None,
        }
    }

    /// Counts every attempt as a DNS query in `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.opts
    }

    pub async fn lookup_addresses(
        &self,
        cancel: &CancellationToken,
        fqdn: &str,
    ) -> Result<Vec<ResolvedAddress>, LookupError> {
        let inner = &self.inner;
        let ips = self
            .with_retry(cancel, fqdn, move || inner.lookup_ip(fqdn))
            .await?;
        Ok(ips.into_iter().map(ResolvedAddress::from).collect())
    }

    /// Canonical name of `fqdn` without the trailing root dot.
    pub async fn lookup_canonical_name(
        &self,
        cancel: &CancellationToken,
        fqdn: &str,
    ) -> Result<String, LookupError> {
        let inner = &self.inner;
        let target = self
            .with_retry(cancel, fqdn, move || inner.lookup_cname(fqdn))
            .await?;
        Ok(strip_root_dot(&target).to_string())
    }

    async fn with_retry<T, F, Fut>(
        &self,
        cancel: &CancellationToken,
        fqdn: &str,
        mut attempt_fn: F,
    ) -> Result<T, LookupError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LookupError>>,
    {
        let mut last_err: Option<LookupError> = None;

        for attempt in 0..=self.opts.retries {
            if let Some(metrics) = &self.metrics {
                metrics.increment_dns_query();
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(LookupError::Cancelled),
                res = tokio::time::timeout(self.opts.timeout, attempt_fn()) => res,
            };

            let err = match outcome {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) => e,
                Err(_elapsed) => LookupError::Timeout(fqdn.to_string()),
            };
            debug!(fqdn, attempt, "Lookup attempt failed: {err}");
            last_err = Some(err);

            if attempt == self.opts.retries {
                break;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(LookupError::Cancelled),
                _ = tokio::time::sleep(backoff_delay(self.opts.backoff, attempt)) => {}
            }
        }

        Err(last_err.unwrap_or_else(|| LookupError::NoRecords(fqdn.to_string())))
    }
}

/// Sleep taken after the failed attempt with index `attempt`.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor: u32 = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
    base.checked_mul(factor)
        .map_or(MAX_BACKOFF, |delay| delay.min(MAX_BACKOFF))
}

fn strip_root_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
