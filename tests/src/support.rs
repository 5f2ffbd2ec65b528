//! In-memory stand-ins for the scanner's collaborators.

use std::collections::HashMap;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cloudrip_common::config::ScanConfig;
use cloudrip_common::error::{LookupError, RangeFetchError, WordlistError};
use cloudrip_common::network::range::RangeSet;
use cloudrip_common::provider::RangeSource;
use cloudrip_common::resolver::DnsResolver;
use cloudrip_common::wordlist::WordlistRepository;
use cloudrip_core::scanner::Scanner;

/// Answers from fixed tables and counts every call.
#[derive(Default)]
pub struct MockResolver {
    addresses: HashMap<String, Vec<IpAddr>>,
    aliases: HashMap<String, String>,
    hang: bool,
    calls: AtomicUsize,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every lookup blocks until the caller gives up.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    pub fn with_address(mut self, fqdn: &str, ips: &[&str]) -> Self {
        let ips = ips.iter().map(|ip| ip.parse().unwrap()).collect();
        self.addresses.insert(fqdn.to_string(), ips);
        self
    }

    pub fn with_alias(mut self, fqdn: &str, target: &str) -> Self {
        self.aliases.insert(fqdn.to_string(), format!("{target}."));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsResolver for MockResolver {
    async fn lookup_ip(&self, fqdn: &str) -> Result<Vec<IpAddr>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            return std::future::pending().await;
        }
        self.addresses
            .get(fqdn)
            .cloned()
            .ok_or_else(|| LookupError::NoRecords(fqdn.to_string()))
    }

    async fn lookup_cname(&self, fqdn: &str) -> Result<String, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            return std::future::pending().await;
        }
        self.aliases
            .get(fqdn)
            .cloned()
            .ok_or_else(|| LookupError::NoRecords(fqdn.to_string()))
    }
}

/// Range source that always fails, so the embedded table is used.
pub struct OfflineRanges;

#[async_trait]
impl RangeSource for OfflineRanges {
    async fn fetch(&self) -> Result<RangeSet, RangeFetchError> {
        Err(RangeFetchError::Request("offline".into()))
    }
}

/// Wordlist that never touches the disk.
pub struct MemoryWordlist {
    entries: Option<Vec<String>>,
}

impl MemoryWordlist {
    pub fn new(entries: &[&str]) -> Self {
        Self {
            entries: Some(entries.iter().map(|e| e.to_string()).collect()),
        }
    }

    pub fn unreadable() -> Self {
        Self { entries: None }
    }
}

impl WordlistRepository for MemoryWordlist {
    fn load(&self, path: &Path) -> Result<Vec<String>, WordlistError> {
        self.entries.clone().ok_or_else(|| WordlistError::Read {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such wordlist"),
        })
    }
}

pub fn scanner(resolver: Arc<MockResolver>, wordlist: MemoryWordlist) -> Scanner {
    Scanner::new(resolver, Box::new(OfflineRanges), Box::new(wordlist))
}

/// Fast settings against `example.com` with the embedded ranges.
pub fn config() -> ScanConfig {
    ScanConfig {
        domain: "example.com".to_string(),
        wordlist: PathBuf::from("memory.txt"),
        threads: 4,
        retries: 0,
        backoff: Duration::from_millis(1),
        timeout: Duration::from_millis(200),
        no_fetch_cf: true,
        ..ScanConfig::default()
    }
}
