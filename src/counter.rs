//! Instance accounting for `CalendarDate` values.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<Arc<InstanceCounter>> = LazyLock::new(|| Arc::new(InstanceCounter::new()));

/// Counts how many dates were ever created and how many are still alive.
///
/// Every successful construction (including clones) bumps both counts; every
/// drop decrements only the alive count. Dates record into the process-wide
/// counter returned by [`InstanceCounter::global`] unless they were built
/// with an explicit counter.
#[derive(Debug, Default)]
pub struct InstanceCounter {
    alive: AtomicUsize,
    total_created: AtomicUsize,
}

impl InstanceCounter {
    /// Creates an isolated counter starting at zero
    pub const fn new() -> Self {
        Self {
            alive: AtomicUsize::new(0),
            total_created: AtomicUsize::new(0),
        }
    }

    /// Returns the process-wide counter
    pub fn global() -> &'static Arc<Self> {
        &GLOBAL
    }

    /// Number of dates currently alive
    pub fn alive(&self) -> usize {
        self.alive.load(Ordering::Relaxed)
    }

    /// Number of dates ever created
    pub fn total_created(&self) -> usize {
        self.total_created.load(Ordering::Relaxed)
    }

    pub(crate) fn record_created(&self) {
        self.alive.fetch_add(1, Ordering::Relaxed);
        self.total_created.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.alive.fetch_sub(1, Ordering::Relaxed);
    }
}
