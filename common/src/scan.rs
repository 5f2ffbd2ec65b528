//! # Scan Outcome Models
//!
//! What a finished scan hands back, plus the metrics and health snapshots
//! exposed while it runs.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::network::record::ResultEntry;

/// Results keyed by the FQDN they were found under.
pub type ResultMap = HashMap<String, Vec<ResultEntry>>;

#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Number of distinct names with at least one reported address.
    pub total_found: usize,
    #[serde(serialize_with = "crate::utils::duration::serialize")]
    pub duration: Duration,
    pub results: ResultMap,
}

impl ScanResult {
    /// Total number of reported addresses across all names.
    pub fn entry_count(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkerStat {
    pub worker_id: usize,
    pub jobs_done: usize,
    pub errors: usize,
    pub last_activity: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_jobs: usize,
    pub completed_jobs: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub dns_queries: usize,
    pub worker_stats: HashMap<usize, WorkerStat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: HealthState,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
    pub memory_mb: f64,
    pub metrics: Metrics,
}
