use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use cloudrip_common::scan::{HealthState, HealthStatus};
use sysinfo::{ProcessExt, System, SystemExt};
use tracing::debug;

use crate::metrics::MetricsCollector;

/// Resident memory above which the process reports itself as degraded.
pub const MEMORY_WARNING_MB: f64 = 1024.0;

pub struct HealthChecker {
    started: Instant,
    metrics: Arc<MetricsCollector>,
}

impl HealthChecker {
    pub fn new(metrics: Arc<MetricsCollector>) -> Self {
        Self {
            started: Instant::now(),
            metrics,
        }
    }

    pub fn check(&self) -> HealthStatus {
        let memory_mb = resident_memory_mb();
        let uptime = Duration::from_secs(self.started.elapsed().as_secs());

        HealthStatus {
            status: classify(memory_mb),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime: humantime::format_duration(uptime).to_string(),
            memory_mb,
            metrics: self.metrics.snapshot(),
        }
    }
}

fn classify(memory_mb: f64) -> HealthState {
    if memory_mb > MEMORY_WARNING_MB {
        HealthState::Warning
    } else {
        HealthState::Healthy
    }
}

fn resident_memory_mb() -> f64 {
    let pid = match sysinfo::get_current_pid() {
        Ok(pid) => pid,
        Err(e) => {
            debug!("Cannot determine own pid: {e}");
            return 0.0;
        }
    };

    let mut system = System::new();
    if !system.refresh_process(pid) {
        return 0.0;
    }
    system
        .process(pid)
        .map(|process| process.memory() as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}
