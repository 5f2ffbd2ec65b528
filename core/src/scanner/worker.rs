use std::sync::Arc;
use std::time::Duration;

use cloudrip_common::error::LookupError;
use cloudrip_common::network::range::{RangeSet, is_provider_address};
use cloudrip_common::network::record::{Job, ResolvedAddress, ResultEntry};
use cloudrip_common::progress::ProgressReporter;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::metrics::MetricsCollector;
use crate::resolver::ResolverClient;

/// Job queue shared by every worker of a pool.
pub type JobQueue = Arc<Mutex<mpsc::Receiver<Job>>>;

/// Everything a worker needs besides its queues. Shared read-only by the pool.
pub struct WorkerContext {
    pub domain: String,
    pub follow_cname: bool,
    pub include_provider: bool,
    pub delay: Duration,
    pub ranges: Arc<RangeSet>,
    pub resolver: Arc<ResolverClient>,
    pub metrics: Arc<MetricsCollector>,
    pub progress: Option<Arc<dyn ProgressReporter>>,
}

/// Outcome of a single job.
enum JobOutcome {
    /// Resolution yielded addresses, directly or through the alias target.
    Resolved,
    Failed,
    /// Cancellation hit while the job was in flight.
    Aborted,
}

pub struct Worker {
    id: usize,
    ctx: Arc<WorkerContext>,
    jobs: JobQueue,
    results: mpsc::Sender<ResultEntry>,
    cancel: CancellationToken,
}

impl Worker {
    pub fn new(
        id: usize,
        ctx: Arc<WorkerContext>,
        jobs: JobQueue,
        results: mpsc::Sender<ResultEntry>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            id,
            ctx,
            jobs,
            results,
            cancel,
        }
    }

    /// Pulls jobs until the queue closes or the scan is cancelled.
    pub async fn run(self) {
        loop {
            let job = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                job = next_job(&self.jobs) => match job {
                    Some(job) => job,
                    None => break,
                },
            };

            match self.process(&job).await {
                JobOutcome::Resolved => {
                    self.ctx.metrics.increment_success();
                    self.ctx.metrics.record_worker_activity(self.id, false);
                }
                JobOutcome::Failed => {
                    self.ctx.metrics.increment_error();
                    self.ctx.metrics.record_worker_activity(self.id, true);
                }
                JobOutcome::Aborted => break,
            }

            if let Some(progress) = &self.ctx.progress {
                progress.increment();
            }
        }
        debug!(worker = self.id, "Worker finished");
    }

    async fn process(&self, job: &Job) -> JobOutcome {
        if !self.ctx.delay.is_zero() {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return JobOutcome::Aborted,
                _ = tokio::time::sleep(self.ctx.delay) => {}
            }
        }

        let fqdn = job.fqdn(&self.ctx.domain);
        let resolver = &self.ctx.resolver;

        let direct = resolver.lookup_addresses(&self.cancel, &fqdn).await;
        let addresses = match direct {
            Ok(addrs) if !addrs.is_empty() => Some(addrs),
            Ok(_) => None,
            Err(LookupError::Cancelled) => return JobOutcome::Aborted,
            Err(e) => {
                debug!(fqdn = %fqdn, "Address lookup failed: {e}");
                None
            }
        };

        let addresses = match addresses {
            Some(addrs) => addrs,
            None if self.ctx.follow_cname => match self.chase_alias(&fqdn).await {
                Ok(Some(addrs)) => addrs,
                Ok(None) => return JobOutcome::Failed,
                Err(LookupError::Cancelled) => return JobOutcome::Aborted,
                Err(e) => {
                    debug!(fqdn = %fqdn, "Alias lookup failed: {e}");
                    return JobOutcome::Failed;
                }
            },
            None => return JobOutcome::Failed,
        };

        if self.emit(&fqdn, &addresses).await {
            JobOutcome::Resolved
        } else {
            JobOutcome::Aborted
        }
    }

    /// Resolves the canonical name of `fqdn` and then the target's addresses.
    async fn chase_alias(&self, fqdn: &str) -> Result<Option<Vec<ResolvedAddress>>, LookupError> {
        let resolver = &self.ctx.resolver;
        let target = resolver.lookup_canonical_name(&self.cancel, fqdn).await?;
        debug!(fqdn, target = %target, "Following alias");

        let addrs = resolver.lookup_addresses(&self.cancel, &target).await?;
        Ok((!addrs.is_empty()).then_some(addrs))
    }

    /// Sends an entry for every qualifying address under `fqdn`.
    /// Returns `false` when cancellation or a closed result queue stopped it.
    async fn emit(&self, fqdn: &str, addresses: &[ResolvedAddress]) -> bool {
        for addr in addresses {
            let ip = addr.ip.to_string();
            if is_provider_address(&ip, &self.ctx.ranges) && !self.ctx.include_provider {
                debug!(fqdn, ip = %ip, "Skipping provider address");
                continue;
            }

            let entry = ResultEntry::new(fqdn, ip, addr.record_type);
            let sent = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => false,
                res = self.results.send(entry) => res.is_ok(),
            };
            if !sent {
                return false;
            }
        }
        true
    }
}

async fn next_job(jobs: &JobQueue) -> Option<Job> {
    jobs.lock().await.recv().await
}

/// Spawns `threads` workers over one shared job queue.
pub fn spawn_pool(
    threads: usize,
    ctx: Arc<WorkerContext>,
    jobs: mpsc::Receiver<Job>,
    results: mpsc::Sender<ResultEntry>,
    cancel: CancellationToken,
) -> Vec<JoinHandle<()>> {
    let jobs: JobQueue = Arc::new(Mutex::new(jobs));

    (0..threads)
        .map(|id| {
            let worker = Worker::new(
                id,
                ctx.clone(),
                jobs.clone(),
                results.clone(),
                cancel.clone(),
            );
            tokio::spawn(worker.run())
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
