//! Wall-clock measurement of one dispatch-and-wait cycle.
use std::time::{Duration, Instant};

/// Run `f` to completion and return how long it took.
///
/// One timestamp before, one after, no retries and no averaging: each
/// sweep iteration is measured exactly once, trading statistical
/// robustness for sweep throughput.
pub fn time<F>(f: F) -> Duration
where
    F: FnOnce(),
{
    let start = Instant::now();
    f();
    start.elapsed()
}
