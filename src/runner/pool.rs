//! Fixed-size worker thread pool.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Sender};

use crate::error::Result;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A fixed set of threads pulling jobs from a shared queue.
///
/// Dropping the pool closes the queue and waits for queued and running
/// jobs to finish.
pub struct WorkerPool {
    jobs: Option<Sender<Job>>,
    threads: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn a pool of `size` threads (at least one).
    pub fn new(size: usize) -> Result<Self> {
        let size = size.max(1);
        let (tx, rx) = unbounded::<Job>();

        let mut threads = Vec::with_capacity(size);
        for index in 0..size {
            let rx = rx.clone();
            let handle = thread::Builder::new()
                .name(format!("conductor-worker-{}", index))
                .spawn(move || {
                    for job in rx {
                        job();
                    }
                })?;
            threads.push(handle);
        }

        tracing::debug!("Started worker pool with {} thread(s)", size);

        Ok(Self {
            jobs: Some(tx),
            threads,
        })
    }

    /// Queue a job for execution on the next free thread.
    pub fn submit(&self, job: impl FnOnce() + Send + 'static) {
        if let Some(jobs) = &self.jobs {
            // Receivers live as long as the threads, which outlive `jobs`.
            let _ = jobs.send(Box::new(job));
        }
    }

    /// Number of threads in the pool.
    pub fn size(&self) -> usize {
        self.threads.len()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.jobs.take();
        for handle in self.threads.drain(..) {
            if handle.join().is_err() {
                tracing::warn!("A worker thread panicked");
            }
        }
    }
}

/// Number of workers to use when none is configured.
pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};

    #[test]
    fn zero_size_gets_one_thread() {
        let pool = WorkerPool::new(0).unwrap();
        assert_eq!(pool.size(), 1);
    }

    #[test]
    fn runs_every_submitted_job() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let pool = WorkerPool::new(3).unwrap();
            for _ in 0..20 {
                let counter = Arc::clone(&counter);
                pool.submit(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
            }
        }
        assert_eq!(counter.load(Ordering::SeqCst), 20);
    }

    #[test]
    fn jobs_run_concurrently() {
        // Both jobs must be running at once for the barrier to release.
        let barrier = Arc::new(Barrier::new(2));
        let pool = WorkerPool::new(2).unwrap();
        let (tx, rx) = crossbeam_channel::unbounded();

        for _ in 0..2 {
            let barrier = Arc::clone(&barrier);
            let tx = tx.clone();
            pool.submit(move || {
                barrier.wait();
                tx.send(()).unwrap();
            });
        }

        rx.recv().unwrap();
        rx.recv().unwrap();
    }

    #[test]
    fn default_worker_count_is_positive() {
        assert!(default_worker_count() >= 1);
    }
}
