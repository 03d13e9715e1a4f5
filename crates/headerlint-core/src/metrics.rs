//! Global atomic counters for headerlint runs.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event at the end of a run.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters, safe to bump from parallel checks.
pub struct Metrics {
    files_checked: AtomicU64,
    files_with_header: AtomicU64,
    fixes_applied: AtomicU64,
    regenerations: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            files_checked: AtomicU64::new(0),
            files_with_header: AtomicU64::new(0),
            fixes_applied: AtomicU64::new(0),
            regenerations: AtomicU64::new(0),
        }
    }

    pub fn inc_files_checked(&self) {
        self.files_checked.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "files_checked", "counter incremented");
    }

    /// Record the per-file "has header block" metric.
    pub fn record_has_header(&self, has_header: bool) {
        if has_header {
            self.files_with_header.fetch_add(1, Ordering::Relaxed);
        }
        tracing::trace!(metric = "has_header", value = has_header, "metric recorded");
    }

    pub fn inc_fixes_applied(&self) {
        self.fixes_applied.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "fixes_applied", "counter incremented");
    }

    pub fn inc_regenerations(&self) {
        self.regenerations.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "regenerations", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            files_checked = self.files_checked(),
            files_with_header = self.files_with_header(),
            fixes_applied = self.fixes_applied(),
            regenerations = self.regenerations(),
        );
    }

    pub fn files_checked(&self) -> u64 {
        self.files_checked.load(Ordering::Relaxed)
    }

    pub fn files_with_header(&self) -> u64 {
        self.files_with_header.load(Ordering::Relaxed)
    }

    pub fn fixes_applied(&self) -> u64 {
        self.fixes_applied.load(Ordering::Relaxed)
    }

    pub fn regenerations(&self) -> u64 {
        self.regenerations.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.files_checked.store(0, Ordering::Relaxed);
        self.files_with_header.store(0, Ordering::Relaxed);
        self.fixes_applied.store(0, Ordering::Relaxed);
        self.regenerations.store(0, Ordering::Relaxed);
    }
}
