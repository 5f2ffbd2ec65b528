use std::sync::{Mutex, MutexGuard, PoisonError};

use cloudrip_common::network::record::ResultEntry;
use cloudrip_common::scan::ResultMap;
use tokio::sync::mpsc;

/// Aggregates result entries by FQDN, dropping repeats of the same address.
#[derive(Debug, Default)]
pub struct ResultCollector {
    results: Mutex<ResultMap>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `entry` unless its FQDN already holds the same address and type.
    /// Returns whether the entry was new.
    pub fn collect(&self, entry: ResultEntry) -> bool {
        let line = entry.to_string();
        {
            let mut results = self.lock();
            let entries = results.entry(entry.fqdn.clone()).or_default();
            if entries.iter().any(|known| known.same_address(&entry)) {
                return false;
            }
            entries.push(entry);
        }
        // Logging may block on a slow terminal; keep it outside the lock.
        cloudrip_common::success!("{line}");
        true
    }

    /// Independent copy of everything collected so far.
    pub fn results(&self) -> ResultMap {
        self.lock().clone()
    }

    pub fn reset(&self) {
        self.lock().clear();
    }

    /// Number of FQDNs with at least one entry.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Consumes `rx` until every sender is dropped. Returns the number of new entries.
    pub async fn drain(&self, mut rx: mpsc::Receiver<ResultEntry>) -> usize {
        let mut inserted = 0;
        while let Some(entry) = rx.recv().await {
            if self.collect(entry) {
                inserted += 1;
            }
        }
        inserted
    }

    fn lock(&self) -> MutexGuard<'_, ResultMap> {
        self.results.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
