/// Submission side of the background export queue.
///
/// `enqueue` must return without waiting for the export to run. Runs are
/// idempotent full snapshots, so implementations may coalesce requests.
pub trait ExportQueue: Send + Sync {
    /// Requests a fresh export snapshot.
    fn enqueue(&self);
}
