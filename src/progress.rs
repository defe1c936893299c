// src/progress.rs
/// Lightweight progress reporting used by long-running operations (reconcile/save).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one candidate produced its records.
    fn item_done(&mut self, _key: &str, _records: usize) {}

    /// Called when one candidate failed and was skipped.
    fn item_failed(&mut self, _key: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
