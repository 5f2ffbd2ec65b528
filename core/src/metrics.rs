//! # Scan Metrics
//!
//! Counters updated concurrently by workers and the resolver client. Readers
//! always get a copy, never a live view.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use cloudrip_common::scan::{Metrics, WorkerStat};

#[derive(Debug, Default)]
pub struct MetricsCollector {
    inner: Mutex<Metrics>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every counter and stamps the start time.
    pub fn start(&self, total_jobs: usize) {
        let mut m = self.lock();
        *m = Metrics {
            start_time: Some(Utc::now()),
            total_jobs,
            ..Metrics::default()
        };
    }

    pub fn stop(&self) {
        self.lock().end_time = Some(Utc::now());
    }

    pub fn increment_success(&self) {
        let mut m = self.lock();
        m.success_count += 1;
        m.completed_jobs += 1;
    }

    pub fn increment_error(&self) {
        let mut m = self.lock();
        m.error_count += 1;
        m.completed_jobs += 1;
    }

    pub fn increment_dns_query(&self) {
        self.lock().dns_queries += 1;
    }

    pub fn record_worker_activity(&self, worker_id: usize, failed: bool) {
        let mut m = self.lock();
        let stat = m.worker_stats.entry(worker_id).or_insert_with(|| WorkerStat {
            worker_id,
            ..WorkerStat::default()
        });
        stat.jobs_done += 1;
        if failed {
            stat.errors += 1;
        }
        stat.last_activity = Some(Utc::now());
    }

    /// Copy of the current counters. While a scan is running the end time is
    /// reported as "now".
    pub fn snapshot(&self) -> Metrics {
        let mut copy = self.lock().clone();
        if copy.start_time.is_some() && copy.end_time.is_none() {
            copy.end_time = Some(Utc::now());
        }
        copy
    }

    fn lock(&self) -> MutexGuard<'_, Metrics> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
