//! # Origin Scanner
//!
//! Implements the core "find origin addresses" use case.
//!
//! A scan fans a wordlist out over a fixed pool of workers and fans the
//! findings back into a single collector:
//!
//! ```text
//! wordlist -> feeder -> [jobs] -> workers -> [results] -> collector
//! ```
//!
//! Both queues are bounded. One [`CancellationToken`] is observed at every
//! point where a task can wait, and the results are only handed back once
//! the collector has drained everything the workers produced.

use std::sync::Arc;
use std::time::Instant;

use cloudrip_common::config::ScanConfig;
use cloudrip_common::error::ScanError;
use cloudrip_common::network::record::{Job, ResultEntry};
use cloudrip_common::progress::ProgressReporter;
use cloudrip_common::provider::RangeSource;
use cloudrip_common::resolver::DnsResolver;
use cloudrip_common::scan::{HealthStatus, Metrics, ResultMap, ScanResult};
use cloudrip_common::wordlist::WordlistRepository;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::health::HealthChecker;
use crate::metrics::MetricsCollector;
use crate::ranges::acquire_ranges;
use crate::resolver::ResolverClient;

mod collector;
mod feeder;
mod worker;

pub use collector::ResultCollector;
pub use feeder::feed;
pub use worker::{Worker, WorkerContext, spawn_pool};

/// Capacity of the result queue between workers and the collector.
const RESULT_QUEUE: usize = 1024;

pub struct Scanner {
    resolver: Arc<dyn DnsResolver>,
    ranges: Box<dyn RangeSource>,
    wordlists: Box<dyn WordlistRepository>,
    progress: Option<Arc<dyn ProgressReporter>>,
    metrics: Arc<MetricsCollector>,
    health: HealthChecker,
}

impl Scanner {
    pub fn new(
        resolver: Arc<dyn DnsResolver>,
        ranges: Box<dyn RangeSource>,
        wordlists: Box<dyn WordlistRepository>,
    ) -> Self {
        let metrics = Arc::new(MetricsCollector::new());
        Self {
            resolver,
            ranges,
            wordlists,
            progress: None,
            health: HealthChecker::new(metrics.clone()),
            metrics,
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Runs a complete scan of `config.domain`.
    ///
    /// Invalid settings and an unreadable wordlist abort before any lookup.
    /// Range acquisition never fails the scan. If `cancel` fires before the
    /// collector has drained, [`ScanError::Cancelled`] is returned instead of
    /// partial results.
    pub async fn scan(
        &self,
        cancel: &CancellationToken,
        config: &ScanConfig,
    ) -> Result<ScanResult, ScanError> {
        config.validate()?;
        let subdomains = self.wordlists.load(&config.wordlist)?;
        let ranges = acquire_ranges(self.ranges.as_ref(), config.no_fetch_cf, cancel).await;

        info!(
            domain = %config.domain,
            entries = subdomains.len(),
            threads = config.threads,
            "Starting scan"
        );
        let started = Instant::now();
        self.metrics.start(subdomains.len());
        if let Some(progress) = &self.progress {
            progress.start(subdomains.len());
        }

        let resolver = ResolverClient::new(self.resolver.clone(), config.resolver_options())
            .with_metrics(self.metrics.clone());
        let ctx = Arc::new(WorkerContext {
            domain: config.domain.trim().to_string(),
            follow_cname: config.follow_cname,
            include_provider: config.include_cf,
            delay: config.delay,
            ranges,
            resolver: Arc::new(resolver),
            metrics: self.metrics.clone(),
            progress: self.progress.clone(),
        });

        let results = self.run_pool(ctx, config.threads, subdomains, cancel).await;

        self.metrics.stop();
        if let Some(progress) = &self.progress {
            progress.stop();
        }

        if cancel.is_cancelled() {
            return Err(ScanError::Cancelled);
        }

        Ok(ScanResult {
            total_found: results.len(),
            duration: started.elapsed(),
            results,
        })
    }

    async fn run_pool(
        &self,
        ctx: Arc<WorkerContext>,
        threads: usize,
        subdomains: Vec<String>,
        cancel: &CancellationToken,
    ) -> ResultMap {
        let (jobs_tx, jobs_rx) = mpsc::channel::<Job>(threads.saturating_mul(2));
        let (results_tx, results_rx) = mpsc::channel::<ResultEntry>(RESULT_QUEUE);

        let collector = Arc::new(ResultCollector::new());
        let drain = tokio::spawn({
            let collector = collector.clone();
            async move { collector.drain(results_rx).await }
        });

        let workers = spawn_pool(threads, ctx, jobs_rx, results_tx, cancel.clone());
        let feeder = tokio::spawn(feed(subdomains, jobs_tx, cancel.clone()));

        for handle in workers {
            if let Err(e) = handle.await {
                error!("Worker task failed: {e}");
            }
        }
        // Workers own the last result senders; the drain ends once they are gone.
        if let Err(e) = feeder.await {
            error!("Feeder task failed: {e}");
        }
        if let Err(e) = drain.await {
            error!("Collector task failed: {e}");
        }

        collector.results()
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    pub fn health_check(&self) -> HealthStatus {
        self.health.check()
    }
}
