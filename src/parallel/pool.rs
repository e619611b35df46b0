//! Rayon thread pool bounding how many outbound requests run at once.
//!
//! Fetch tasks block on network I/O, so the pool size is the fan-out limit rather than
//! the CPU count. Nested parallel calls made inside [WorkerPool::install] share the
//! same threads.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

#[derive(Debug, Clone)]
pub struct WorkerPool {
    workers: usize,
    pool: Arc<ThreadPool>,
}

impl WorkerPool {
    /// Use exactly `n` worker threads (at least one).
    pub fn with_workers(n: usize) -> Result<Self, ThreadPoolBuildError> {
        let workers = n.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("genderscope-fetch-{index}"))
            .build()?;
        Ok(Self {
            workers,
            pool: Arc::new(pool),
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run a closure on this pool; `rayon::join` and parallel iterators inside it use the
    /// pool's threads.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn zero_workers_is_clamped_to_one() {
        let pool = WorkerPool::with_workers(0).expect("pool should build");
        assert_eq!(pool.workers(), 1);
    }

    #[test]
    fn concurrency_never_exceeds_worker_count() {
        let pool = WorkerPool::with_workers(3).expect("pool should build");
        let running = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        pool.install(|| {
            (0..24).into_par_iter().for_each(|_| {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(5));
                running.fetch_sub(1, Ordering::SeqCst);
            });
        });

        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert!(peak.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn nested_joins_complete() {
        let pool = WorkerPool::with_workers(2).expect("pool should build");
        let ((a, b), (c, d)) = pool.install(|| {
            rayon::join(
                || rayon::join(|| 1, || (0..10).into_par_iter().sum::<i32>()),
                || rayon::join(|| 3, || 4),
            )
        });
        assert_eq!((a, b, c, d), (1, 45, 3, 4));
    }
}
