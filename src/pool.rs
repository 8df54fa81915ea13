//! A small persistent worker pool used to parallelize per-slice work.
//!
//! Mirrors the FIFO-queue-plus-condvar pool the filters were originally
//! built around: a fixed set of threads block on a shared queue, and the
//! pool's `Drop` signals shutdown and waits for every worker to drain its
//! last job before returning.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;

type Job = Box<dyn FnOnce() + Send>;

struct Shared {
    queue: Mutex<State>,
    condvar: Condvar,
}

struct State {
    jobs: VecDeque<Job>,
    shutdown: bool,
    in_flight: usize,
}

/// A fixed-size pool of worker threads that run `'scope`-bounded closures.
pub struct WorkerPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `threads.max(1)` persistent worker threads.
    pub fn new(threads: usize) -> Self {
        let threads = threads.max(1);
        let shared = Arc::new(Shared {
            queue: Mutex::new(State {
                jobs: VecDeque::new(),
                shutdown: false,
                in_flight: 0,
            }),
            condvar: Condvar::new(),
        });

        let mut workers = Vec::with_capacity(threads);
        for id in 0..threads {
            let shared = Arc::clone(&shared);
            workers.push(
                std::thread::Builder::new()
                    .name(format!("vdtk-worker-{id}"))
                    .spawn(move || Self::worker_loop(shared))
                    .expect("failed to spawn worker thread"),
            );
        }

        log::debug!("worker pool started with {threads} threads");
        Self { shared, workers }
    }

    fn worker_loop(shared: Arc<Shared>) {
        loop {
            let job = {
                let mut state = shared.queue.lock().unwrap();
                loop {
                    if let Some(job) = state.jobs.pop_front() {
                        break Some(job);
                    }
                    if state.shutdown {
                        break None;
                    }
                    state = shared.condvar.wait(state).unwrap();
                }
            };
            match job {
                Some(job) => {
                    job();
                    let mut state = shared.queue.lock().unwrap();
                    state.in_flight -= 1;
                    shared.condvar.notify_all();
                }
                None => return,
            }
        }
    }

    /// Enqueues a job borrowing data that outlives this call, and returns
    /// immediately without waiting for it to run.
    ///
    /// # Safety
    ///
    /// The closure's lifetime `'scope` is erased to `'static` so it can live
    /// in the shared queue. This is sound only because every public entry
    /// point that calls `enqueue` also calls [`WorkerPool::join`] (directly,
    /// or via `Drop`) before the borrowed data goes out of scope: no job
    /// outlives the borrow it captured, and no `enqueue` caller returns while
    /// jobs referencing its stack frame are still outstanding.
    pub fn enqueue<'scope, F>(&'scope self, job: F)
    where
        F: FnOnce() + Send + 'scope,
    {
        let job: Job = unsafe {
            std::mem::transmute::<Box<dyn FnOnce() + Send + 'scope>, Box<dyn FnOnce() + Send + 'static>>(
                Box::new(job),
            )
        };
        let mut state = self.shared.queue.lock().unwrap();
        state.in_flight += 1;
        state.jobs.push_back(job);
        self.shared.condvar.notify_one();
    }

    /// Blocks until every enqueued job so far has completed.
    pub fn join(&self) {
        let mut state = self.shared.queue.lock().unwrap();
        while state.in_flight > 0 {
            state = self.shared.condvar.wait(state).unwrap();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        {
            let mut state = self.shared.queue.lock().unwrap();
            while state.in_flight > 0 {
                state = self.shared.condvar.wait(state).unwrap();
            }
            state.shutdown = true;
            self.shared.condvar.notify_all();
        }
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
        log::debug!("worker pool shut down");
    }
}
