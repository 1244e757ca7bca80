//! Worker pool draining the course work queue
//!
//! This module handles:
//! - The shared FIFO work queue of course codes
//! - The results and skip sinks workers report into
//! - Spawning a fixed number of workers and joining them
//!
//! Completion is decided by joining every worker task and then checking
//! that each dequeued course was acknowledged, never by looking at the sinks.

use crate::crawler::retry::{Outcome, RetryController};
use crate::records::{CourseCode, ScrapedCourse, SkippedCourse};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinSet;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared FIFO queue of course codes with dispatch accounting
#[derive(Debug, Default)]
pub struct WorkQueue {
    items: Mutex<VecDeque<CourseCode>>,
    dispatched: AtomicUsize,
    acknowledged: AtomicUsize,
}

impl WorkQueue {
    pub fn new(codes: impl IntoIterator<Item = CourseCode>) -> Self {
        Self {
            items: Mutex::new(codes.into_iter().collect()),
            dispatched: AtomicUsize::new(0),
            acknowledged: AtomicUsize::new(0),
        }
    }

    /// Takes the next course; every dequeued course must be acknowledged
    pub fn dequeue(&self) -> Option<CourseCode> {
        let code = lock(&self.items).pop_front()?;
        self.dispatched.fetch_add(1, Ordering::SeqCst);
        Some(code)
    }

    /// Marks one dequeued course as fully processed
    pub fn acknowledge(&self) {
        self.acknowledged.fetch_add(1, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        lock(&self.items).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dispatched(&self) -> usize {
        self.dispatched.load(Ordering::SeqCst)
    }

    pub fn acknowledged(&self) -> usize {
        self.acknowledged.load(Ordering::SeqCst)
    }

    /// True once the queue is drained and every dispatched course acknowledged
    pub fn is_settled(&self) -> bool {
        self.is_empty() && self.dispatched() == self.acknowledged()
    }
}

/// Append-only collection shared between workers
#[derive(Debug)]
pub struct Sink<T> {
    items: Mutex<Vec<T>>,
}

impl<T> Default for Sink<T> {
    fn default() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Sink<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, item: T) {
        lock(&self.items).push(item);
    }

    pub fn len(&self) -> usize {
        lock(&self.items).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns everything collected so far
    pub fn drain(&self) -> Vec<T> {
        std::mem::take(&mut *lock(&self.items))
    }
}

impl<T: Clone> Sink<T> {
    /// Copies the current contents without removing them
    pub fn snapshot(&self) -> Vec<T> {
        lock(&self.items).clone()
    }
}

/// Sink for successfully scraped courses
pub type ResultsSink = Sink<ScrapedCourse>;

/// Sink for courses routed to the skip list
pub type SkipSink = Sink<SkippedCourse>;

/// Everything the pool produced in one run
#[derive(Debug, Default)]
pub struct PoolReport {
    /// Successful courses in completion order
    pub results: Vec<ScrapedCourse>,

    /// Skipped courses in completion order
    pub skipped: Vec<SkippedCourse>,

    /// Courses handed to workers
    pub dispatched: usize,

    /// Courses whose outcome reached a sink
    pub acknowledged: usize,
}

/// Fixed-size pool of workers sharing one work queue
pub struct WorkerPool {
    workers: usize,
    controller: Arc<RetryController>,
}

impl WorkerPool {
    /// Creates a pool; a worker count of zero is raised to one
    pub fn new(workers: usize, controller: Arc<RetryController>) -> Self {
        Self {
            workers: workers.max(1),
            controller,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Processes every course exactly once and waits for all workers
    ///
    /// Returns only after every worker task has finished, so the report
    /// always reflects the complete run.
    pub async fn run(&self, codes: Vec<CourseCode>) -> PoolReport {
        let queue = Arc::new(WorkQueue::new(codes));
        let results = Arc::new(ResultsSink::new());
        let skipped = Arc::new(SkipSink::new());

        tracing::info!(
            "Starting {} workers for {} courses",
            self.workers,
            queue.len()
        );

        let mut workers = JoinSet::new();
        for id in 1..=self.workers {
            workers.spawn(run_worker(
                format!("worker-{}", id),
                Arc::clone(&queue),
                Arc::clone(&self.controller),
                Arc::clone(&results),
                Arc::clone(&skipped),
            ));
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Worker terminated abnormally: {}", e);
            }
        }

        if !queue.is_settled() {
            tracing::error!(
                "{} of {} dispatched courses were never acknowledged, {} left in queue",
                queue.dispatched() - queue.acknowledged(),
                queue.dispatched(),
                queue.len()
            );
        }

        PoolReport {
            results: results.drain(),
            skipped: skipped.drain(),
            dispatched: queue.dispatched(),
            acknowledged: queue.acknowledged(),
        }
    }
}

/// Worker loop: dequeue, process, route, acknowledge, until the queue is empty
async fn run_worker(
    name: String,
    queue: Arc<WorkQueue>,
    controller: Arc<RetryController>,
    results: Arc<ResultsSink>,
    skipped: Arc<SkipSink>,
) {
    while let Some(code) = queue.dequeue() {
        match controller.process(&code, &name).await {
            Outcome::Success(scraped) => results.push(scraped),
            Outcome::Skipped(skip) => skipped.push(skip),
        }

        tracing::info!("[{}][Course: {}]", name, code);
        queue.acknowledge();
    }

    tracing::debug!("{} finished, queue empty", name);
}
