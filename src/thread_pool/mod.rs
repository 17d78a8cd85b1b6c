//! Work-stealing based thread pool.
//!
//! This module contains the implementation of the worker pool shared by
//! every iteration of the grain sweep. The pool supports scoped jobs,
//! so tiles borrowed from the sweep driver can be processed without
//! copying them into the tasks. The pool is an explicit value: it is
//! created before the sweep, shared across all iterations, and joins
//! its workers when dropped.
use crossbeam_deque::{Injector, Steal, Stealer, Worker};
use log::trace;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::{hint, mem, thread};

use crate::core::configuration::Configuration;
use crate::core::thread::Thread;

type Func<'a> = Box<dyn FnOnce() + Send + 'a>;

enum Job {
    NewJob(Func<'static>),
    Terminate,
}

/// Struct representing a worker in the thread pool.
struct PoolWorker {
    id: usize,
    worker: Worker<Job>,
    stealers: Option<Vec<Stealer<Job>>>,
    global: Arc<Injector<Job>>,
    pending: Arc<AtomicUsize>,
}

impl PoolWorker {
    fn new(id: usize, global: Arc<Injector<Job>>, pending: Arc<AtomicUsize>) -> Self {
        Self {
            id,
            worker: Worker::new_fifo(),
            stealers: None,
            global,
            pending,
        }
    }

    /// Get stealer.
    fn get_stealer(&self) -> Stealer<Job> {
        self.worker.stealer()
    }

    // Set the stealers vector of the worker.
    fn set_stealers(&mut self, stealers: Vec<Stealer<Job>>) {
        self.stealers = Some(stealers);
    }

    /// Fetch a task. If the local queue is empty, try to steal a batch of tasks from the global queue.
    /// If the global queue is empty, try to steal a task from one of the other threads.
    fn fetch_task(&self) -> Option<Job> {
        if let Some(job) = self.pop() {
            return Some(job);
        } else if let Some(job) = self.steal_from_global() {
            return Some(job);
        } else if let Some(job) = self.steal() {
            return Some(job);
        }
        None
    }

    /// This is the main loop of the thread.
    fn run(&self) {
        trace!("Worker {} started", self.id);
        let mut stop = false;
        loop {
            let res = self.fetch_task();
            match res {
                Some(task) => match task {
                    Job::NewJob(func) => {
                        (func)();
                        self.task_done();
                    }
                    Job::Terminate => stop = true,
                },
                None => {
                    if stop {
                        self.global.push(Job::Terminate);
                        break;
                    } else {
                        thread::yield_now();
                    }
                }
            }
        }
    }

    // Pop a job from the local queue.
    fn pop(&self) -> Option<Job> {
        self.worker.pop()
    }

    // Steal a job from another worker.
    fn steal(&self) -> Option<Job> {
        if let Some(stealers) = &self.stealers {
            for stealer in stealers {
                loop {
                    match stealer.steal() {
                        Steal::Success(job) => return Some(job),
                        Steal::Empty => break,
                        Steal::Retry => continue,
                    }
                }
            }
        }

        None
    }

    // Steal a job from the global queue.
    fn steal_from_global(&self) -> Option<Job> {
        loop {
            match self.global.steal_batch_and_pop(&self.worker) {
                Steal::Success(job) => return Some(job),
                Steal::Empty => return None,
                Steal::Retry => continue,
            };
        }
    }

    // Warn task done.
    fn task_done(&self) {
        self.pending.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Struct representing a thread pool.
pub struct ThreadPool {
    threads: Vec<Thread>,
    num_workers: usize,
    pending: Arc<AtomicUsize>,
    injector: Arc<Injector<Job>>,
}

impl Default for ThreadPool {
    /// Create a new thread pool with all the available threads.
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadPool {
    fn build(num_threads: usize, pinning: bool, mapping: &[usize]) -> Self {
        trace!("Creating new threadpool");
        let mut workers = Vec::with_capacity(num_threads);
        let mut stealers = Vec::with_capacity(num_threads);
        let mut threads = Vec::with_capacity(num_threads);

        let pending = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(num_threads));

        let injector = Arc::new(Injector::new());

        // Create workers.
        for i in 0..num_threads {
            let global = Arc::clone(&injector);
            let pending_cp = Arc::clone(&pending);
            let worker = PoolWorker::new(i, global, pending_cp);
            workers.push(worker);
        }

        // Get stealers.
        for worker in &workers {
            let stealer = worker.get_stealer();
            stealers.push(stealer);
        }

        // For each worker, set the stealers vector.
        // The stealer of the worker itself is removed from the vector.
        (0..num_threads).for_each(|i| {
            let mut stealers_cp = stealers.clone();
            stealers_cp.remove(i);
            workers[i].set_stealers(stealers_cp);
        });

        // Spawn one thread per worker. The barrier makes the workers
        // enter their run loop together.
        for (i, worker) in workers.into_iter().enumerate() {
            let barrier = Arc::clone(&barrier);
            let pin_position = if pinning {
                mapping.get(i).copied()
            } else {
                None
            };
            threads.push(Thread::new(i, pin_position, move || {
                barrier.wait();
                worker.run();
            }));
        }

        Self {
            threads,
            num_workers: num_threads,
            pending,
            injector,
        }
    }

    /// Create a new thread pool using all the threads available.
    ///
    /// # Examples
    ///
    /// ```
    /// use grainbench::thread_pool::ThreadPool;
    ///
    /// let mut pool = ThreadPool::new();
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(num_cpus::get())
    }

    /// Create a new thread pool with `num_threads` threads.
    ///
    /// # Examples
    ///
    /// ```
    /// use grainbench::thread_pool::ThreadPool;
    ///
    /// let mut pool = ThreadPool::with_capacity(8);
    /// ```
    pub fn with_capacity(num_threads: usize) -> Self {
        Self::build(num_threads, false, &[])
    }

    /// Create a new thread pool sized and pinned as the configuration says.
    pub fn with_configuration(configuration: &Configuration) -> Self {
        Self::build(
            configuration.get_max_cores(),
            configuration.get_pinning(),
            configuration.get_thread_mapping(),
        )
    }

    /// Number of worker threads in the pool.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Execute a function `task` on a thread in the thread pool.
    /// This method is non-blocking, so the developer must call `wait` to wait for the task to finish.
    pub fn execute<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pending.fetch_add(1, Ordering::AcqRel);
        self.injector.push(Job::NewJob(Box::new(task)));
    }

    /// Check if there are jobs in the thread pool.
    pub fn is_empty(&self) -> bool {
        self.pending.load(Ordering::Acquire) == 0
    }

    /// Block until all current jobs in the thread pool are finished.
    pub fn wait(&self) {
        while !self.is_empty() {
            hint::spin_loop();
        }
    }

    /// Create a new scope to execute jobs on other threads.
    /// The function passed to this method will be provided with a [`Scope`] object,
    /// which can be used to spawn new jobs through the [`Scope::execute`] method.
    /// The scope will block the current thread until all jobs spawned from this scope
    /// have completed: this is the fork-join barrier of one sweep iteration.
    ///
    /// # Examples
    ///
    /// ```
    /// use grainbench::thread_pool::ThreadPool;
    ///
    /// let mut pool = ThreadPool::new();
    ///
    /// let mut vec = vec![0; 100];
    ///
    /// pool.scope(|scope| {
    ///    for el in &mut vec {
    ///       scope.execute(move || {
    ///          *el += 1;
    ///      });
    ///   }
    /// });
    ///
    /// assert_eq!(vec.iter().sum::<i32>(), 100);
    /// ```
    pub fn scope<'pool, 'scope, F, R>(&'pool mut self, f: F) -> R
    where
        F: FnOnce(&Scope<'pool, 'scope>) -> R,
    {
        let scope = Scope {
            pool: self,
            _marker: PhantomData,
        };
        let res = f(&scope);
        scope.pool.wait();
        res
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.injector.push(Job::Terminate);

        for thread in &mut self.threads {
            thread.join();
        }
    }
}

/// A scope to execute jobs on other threads.
pub struct Scope<'pool, 'scope> {
    pool: &'pool mut ThreadPool,
    _marker: PhantomData<::std::cell::Cell<&'scope mut ()>>,
}

impl<'pool, 'scope> Scope<'pool, 'scope> {
    /// Execute a function `task` on a thread in the thread pool.
    /// At the end of the scope, all the jobs will be terminated.
    pub fn execute<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'scope,
    {
        let task = unsafe { mem::transmute::<Func<'scope>, Func<'static>>(Box::new(task)) };
        self.pool.execute(task);
    }
}
