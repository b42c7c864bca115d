//! Running statistics over processed files.

use serde::Serialize;
use std::sync::Mutex;
use std::time::Duration;

/// Snapshot of the running counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub files_processed: u64,
    pub total_fixes: u64,
    /// Total fixes divided by files processed, times 100. This is a
    /// fixes-per-file ratio (it can exceed 100), not a fraction of
    /// successful files; the historical name is kept deliberately, see
    /// DESIGN.md.
    pub success_rate: f64,
    /// Incremental mean of per-file processing time, in milliseconds.
    pub avg_processing_ms: f64,
}

/// Synchronization-guarded aggregate owned by the processor, not ambient
/// process state: every `SyntaxFixer` gets its own instance, so concurrent
/// completions serialize on the lock and tests can observe isolated counters.
#[derive(Debug, Default)]
pub struct Statistics {
    inner: Mutex<RunStats>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed file: bump the counters, recompute the rate and
    /// fold the sample into the running mean.
    pub fn record(&self, fixes: usize, elapsed: Duration) {
        let mut stats = self.inner.lock().unwrap();
        stats.files_processed += 1;
        stats.total_fixes += fixes as u64;
        stats.success_rate = stats.total_fixes as f64 / stats.files_processed as f64 * 100.0;
        let n = stats.files_processed as f64;
        let sample_ms = elapsed.as_secs_f64() * 1000.0;
        stats.avg_processing_ms = (stats.avg_processing_ms * (n - 1.0) + sample_ms) / n;
    }

    /// Read-only view, safe to call at any time.
    pub fn snapshot(&self) -> RunStats {
        self.inner.lock().unwrap().clone()
    }
}
