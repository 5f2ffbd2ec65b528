//! # Provider Ranges
//!
//! Obtains the provider's published CIDR blocks for a scan. The live list is
//! preferred; any failure degrades to the embedded table and never aborts.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cloudrip_common::error::RangeFetchError;
use cloudrip_common::network::range::RangeSet;
use cloudrip_common::provider::RangeSource;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const CLOUDFLARE_IPS_URL: &str = "https://api.cloudflare.com/client/v4/ips";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: ApiRanges,
}

#[derive(Debug, Default, Deserialize)]
struct ApiRanges {
    #[serde(default)]
    ipv4_cidrs: Vec<String>,
    #[serde(default)]
    ipv6_cidrs: Vec<String>,
}

/// Cloudflare's public `ips` endpoint.
pub struct CloudflareApi {
    url: String,
}

impl CloudflareApi {
    pub fn new() -> Self {
        Self::with_url(CLOUDFLARE_IPS_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for CloudflareApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RangeSource for CloudflareApi {
    async fn fetch(&self) -> Result<RangeSet, RangeFetchError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| RangeFetchError::Request(e.to_string()))?;

        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| RangeFetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RangeFetchError::Status(status.as_u16()));
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| RangeFetchError::Request(e.to_string()))?;
        if !body.success {
            return Err(RangeFetchError::Unsuccessful);
        }

        Ok(RangeSet::from_cidrs(
            &body.result.ipv4_cidrs,
            &body.result.ipv6_cidrs,
        ))
    }
}

/// Ranges to classify against for this scan.
///
/// With `no_fetch` the embedded table is returned without touching `source`.
/// Otherwise a non-empty live list wins; errors, empty lists and cancellation
/// fall back to the embedded table.
pub async fn acquire_ranges(
    source: &dyn RangeSource,
    no_fetch: bool,
    cancel: &CancellationToken,
) -> Arc<RangeSet> {
    if no_fetch {
        debug!("Live range fetch disabled, using embedded table");
        return RangeSet::defaults();
    }

    let fetched = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(RangeFetchError::Cancelled),
        res = source.fetch() => res,
    };

    match fetched {
        Ok(ranges) if !ranges.is_empty() => {
            debug!(
                ipv4 = ranges.ipv4().len(),
                ipv6 = ranges.ipv6().len(),
                "Using live provider ranges"
            );
            Arc::new(ranges)
        }
        Ok(_) => {
            warn!("Provider returned no usable ranges, using embedded table");
            RangeSet::defaults()
        }
        Err(e) => {
            warn!("Failed to fetch provider ranges, using embedded table: {e}");
            RangeSet::defaults()
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Reply {
        Ranges(RangeSet),
        Fail,
        Hang,
    }

    struct MockSource {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl MockSource {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RangeSource for MockSource {
        async fn fetch(&self) -> Result<RangeSet, RangeFetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Ranges(r) => Ok(r.clone()),
                Reply::Fail => Err(RangeFetchError::Status(503)),
                Reply::Hang => std::future::pending().await,
            }
        }
    }

    #[tokio::test]
    async fn no_fetch_skips_the_source() {
        let source = MockSource::new(Reply::Fail);
        let ranges = acquire_ranges(&source, true, &CancellationToken::new()).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(Arc::ptr_eq(&ranges, &RangeSet::defaults()));
    }

    #[tokio::test]
    async fn live_ranges_replace_the_defaults() {
        let live = RangeSet::from_cidrs(&["198.51.100.0/24"], &[]);
        let source = MockSource::new(Reply::Ranges(live.clone()));

        let ranges = acquire_ranges(&source, false, &CancellationToken::new()).await;
        assert_eq!(*ranges, live);
    }

    #[tokio::test]
    async fn failure_and_empty_list_fall_back() {
        let failing = MockSource::new(Reply::Fail);
        let ranges = acquire_ranges(&failing, false, &CancellationToken::new()).await;
        assert_eq!(*ranges, *RangeSet::defaults());

        let empty = MockSource::new(Reply::Ranges(RangeSet::default()));
        let ranges = acquire_ranges(&empty, false, &CancellationToken::new()).await;
        assert_eq!(*ranges, *RangeSet::defaults());
    }

    #[tokio::test]
    async fn cancellation_falls_back_without_waiting() {
        let source = MockSource::new(Reply::Hang);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let ranges = tokio::time::timeout(
            Duration::from_secs(1),
            acquire_ranges(&source, false, &cancel),
        )
        .await
        .unwrap();
        assert_eq!(*ranges, *RangeSet::defaults());
    }

    #[test]
    fn api_payload_decodes() {
        let raw = r#"{
            "result": {
                "ipv4_cidrs": ["173.245.48.0/20"],
                "ipv6_cidrs": ["2400:cb00::/32"],
                "etag": "abc"
            },
            "success": true,
            "errors": [],
            "messages": []
        }"#;
        let body: ApiResponse = serde_json::from_str(raw).unwrap();
        assert!(body.success);
        assert_eq!(body.result.ipv4_cidrs, vec!["173.245.48.0/20"]);
        assert_eq!(body.result.ipv6_cidrs, vec!["2400:cb00::/32"]);
    }
}
