use log::{error, trace};
use std::thread;

/// A worker thread of the pool.
///
/// The closure starts running as soon as the thread is created. When a
/// pinning position is given, the thread pins itself to that core
/// before running the closure; if the machine does not expose the
/// requested core, the thread runs unpinned.
pub(crate) struct Thread {
    thread: Option<thread::JoinHandle<()>>,
}

impl Thread {
    pub(crate) fn new<F>(id: usize, pin_position: Option<usize>, f: F) -> Thread
    where
        F: FnOnce() + Send + 'static,
    {
        Thread {
            thread: Some(thread::spawn(move || {
                if let Some(position) = pin_position {
                    pin_current(id, position);
                }
                trace!("{:?} started", thread::current().id());
                (f)();
                trace!("{:?} now will end.", thread::current().id());
            })),
        }
    }

    /// Join the thread.
    pub(crate) fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            thread.join().unwrap();
        }
    }
}

/// Pin the calling thread on the core at `position`.
fn pin_current(id: usize, position: usize) {
    match core_affinity::get_core_ids() {
        Some(mut core_ids) => {
            if core_ids.get(position).is_none() {
                error!("Cannot pin thread {} in the chosen position.", id);
            } else {
                let core = core_ids.remove(position);
                if core_affinity::set_for_current(core) {
                    trace!("Thread {} pinned on core {}.", id, core.id);
                } else {
                    error!("Thread pinning on core {} failed!", core.id);
                }
            }
        }
        None => error!("Cannot read core ids, thread {} left unpinned.", id),
    }
}
