use cloudrip_common::network::record::Job;
use cloudrip_common::wordlist::is_entry;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Sends one job per usable wordlist entry, in order.
///
/// Stops early on cancellation or when every worker is gone. The sender is
/// dropped on return, which closes the queue. Returns the number of jobs sent.
pub async fn feed(
    subdomains: Vec<String>,
    jobs: mpsc::Sender<Job>,
    cancel: CancellationToken,
) -> usize {
    let mut dispatched = 0;

    for subdomain in subdomains {
        let subdomain = subdomain.trim();
        if !is_entry(subdomain) {
            continue;
        }

        let sent = tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            res = jobs.send(Job::new(subdomain)) => res.is_ok(),
        };
        if !sent {
            debug!(dispatched, "Job feed stopped early");
            break;
        }
        dispatched += 1;
    }

    dispatched
}
