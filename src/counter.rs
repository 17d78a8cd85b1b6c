//! Lock-free bookkeeping of dispatched tasks.
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts the tasks of one sweep iteration.
///
/// Incremented once per tile processed, from any worker. The count is
/// a single atomic, never a mutex-guarded scalar: contention on a lock
/// here would show up in the very timings the sweep exists to collect.
/// Reads are only meaningful after the iteration's fork-join barrier,
/// so relaxed ordering is enough.
pub struct TaskCounter {
    count: AtomicUsize,
}

impl TaskCounter {
    pub const fn new() -> TaskCounter {
        TaskCounter {
            count: AtomicUsize::new(0),
        }
    }

    /// Reset to zero at the start of a sweep iteration.
    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }

    /// Record one processed tile.
    pub fn bump(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// The current count.
    pub fn value(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl Default for TaskCounter {
    fn default() -> Self {
        Self::new()
    }
}
