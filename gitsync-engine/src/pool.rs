//! Bounded worker pool for per-repository sync tasks.
//!
//! A fixed number of workers pull boxed futures off one bounded queue.
//! [`WorkerPool::submit`] awaits queue capacity, so a full queue exerts
//! backpressure on the submitting enumeration pass instead of growing
//! without bound. [`WorkerPool::drain`] consumes the pool, which closes the
//! queue and makes post-drain submission unrepresentable.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::EngineError;

/// Max sync tasks executing simultaneously. Small, to stay within the
/// provider's practical rate limits and bound subprocess fan-out.
pub const CONCURRENCY: usize = 7;

/// Max sync tasks waiting in the queue. Large enough to buffer a full
/// repository list while the workers catch up.
pub const QUEUE_DEPTH: usize = 1000;

type PoolTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Fixed-capacity concurrent task executor with a bounded backlog queue.
pub struct WorkerPool {
    queue: mpsc::Sender<PoolTask>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Start `concurrency` workers sharing a queue of `queue_depth` slots.
    ///
    /// `concurrency` and `queue_depth` must both be at least 1.
    pub fn new(concurrency: usize, queue_depth: usize) -> Self {
        debug_assert!(concurrency > 0);
        debug_assert!(queue_depth > 0);
        let (queue, rx) = mpsc::channel::<PoolTask>(queue_depth);
        let rx = Arc::new(Mutex::new(rx));
        let workers = (0..concurrency)
            .map(|index| tokio::spawn(worker_loop(index, Arc::clone(&rx))))
            .collect();
        Self { queue, workers }
    }

    /// Enqueue one unit of work. Awaits until a queue slot is free.
    ///
    /// Tasks execute on independent concurrent workers; no ordering between
    /// them is guaranteed.
    pub async fn submit(
        &self,
        task: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), EngineError> {
        self.queue
            .send(Box::pin(task))
            .await
            .map_err(|_| EngineError::Pool("task queue closed"))
    }

    /// Close the queue and block until every submitted task has completed.
    ///
    /// Taking `self` by value means no further [`submit`](Self::submit) can
    /// be expressed once a drain has begun.
    pub async fn drain(self) {
        let WorkerPool { queue, workers } = self;
        drop(queue);
        for worker in workers {
            if let Err(err) = worker.await {
                error!(error = %err, "pool worker panicked");
            }
        }
    }
}

async fn worker_loop(index: usize, rx: Arc<Mutex<mpsc::Receiver<PoolTask>>>) {
    loop {
        // Hold the receiver lock only while dequeuing; the task itself runs
        // with the lock released so other workers keep pumping the queue.
        let task = { rx.lock().await.recv().await };
        let Some(task) = task else { break };
        // Spawning keeps a panicking task from taking its worker down with it.
        if let Err(err) = tokio::spawn(task).await {
            error!(worker = index, error = %err, "pool task panicked");
        }
    }
    debug!(worker = index, "worker drained");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn all_submitted_tasks_complete() {
        let completed = Arc::new(AtomicUsize::new(0));
        let pool = WorkerPool::new(4, 8);
        for _ in 0..40 {
            let completed = Arc::clone(&completed);
            pool.submit(async move {
                completed.fetch_add(1, Ordering::SeqCst);
            })
            .await
            .expect("submit");
        }
        pool.drain().await;
        assert_eq!(completed.load(Ordering::SeqCst), 40);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrency_never_exceeds_the_bound() {
        let bound = 3;
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let pool = WorkerPool::new(bound, 100);
        // A burst of ten times the bound.
        for _ in 0..bound * 10 {
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            pool.submit(async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            })
            .await
            .expect("submit");
        }
        pool.drain().await;
        assert!(peak.load(Ordering::SeqCst) <= bound);
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn drain_with_nothing_submitted_returns() {
        WorkerPool::new(2, 4).drain().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn tiny_queue_applies_backpressure_without_deadlock() {
        let completed = Arc::new(AtomicUsize::new(0));
        let pool = WorkerPool::new(1, 1);
        for _ in 0..5 {
            let completed = Arc::clone(&completed);
            pool.submit(async move {
                completed.fetch_add(1, Ordering::SeqCst);
            })
            .await
            .expect("submit");
        }
        pool.drain().await;
        assert_eq!(completed.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn panicking_task_does_not_stall_the_drain() {
        let completed = Arc::new(AtomicUsize::new(0));
        let pool = WorkerPool::new(2, 10);
        pool.submit(async { panic!("boom") }).await.expect("submit");
        for _ in 0..6 {
            let completed = Arc::clone(&completed);
            pool.submit(async move {
                completed.fetch_add(1, Ordering::SeqCst);
            })
            .await
            .expect("submit");
        }
        pool.drain().await;
        assert_eq!(completed.load(Ordering::SeqCst), 6);
    }
}
