/// Receives coarse progress of a running scan.
pub trait ProgressReporter: Send + Sync {
    fn start(&self, total: usize);

    /// Called once for every job a worker finishes, whatever the outcome.
    fn increment(&self);

    fn stop(&self);
}
