use std::collections::VecDeque;

use tokio::sync::{Mutex, MutexGuard};

use crate::error::QueueError;
use crate::job::{Job, JobId};

/// Fixed-capacity FIFO queue with per-instance exclusion.
///
/// Every queue in the system is one of these; there is no global lock.
/// Capacity is sized generously and acts as a safety net, not a throttle:
/// oversubscription fails fast with [`QueueError::CapacityExceeded`] instead
/// of blocking the producer.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    name: &'static str,
    capacity: usize,
    inner: Mutex<VecDeque<T>>,
}

impl<T> BoundedQueue<T> {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            capacity,
            inner: Mutex::new(VecDeque::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Acquire this queue's lock for a multi-operation sequence.
    ///
    /// Callers that compare and then act (the tower's fairness check and
    /// load-balance comparison, the pad's check-before-dequeue) must hold
    /// the guard across the whole sequence so the decision cannot go stale.
    pub async fn lock(&self) -> QueueGuard<'_, T> {
        QueueGuard {
            name: self.name,
            capacity: self.capacity,
            items: self.inner.lock().await,
        }
    }

    /// Append an item, failing fast if the queue is at capacity.
    pub async fn enqueue(&self, item: T) -> Result<(), QueueError> {
        self.lock().await.enqueue(item)
    }

    /// Remove and return the head of the queue.
    pub async fn dequeue(&self) -> Result<T, QueueError> {
        self.lock().await.dequeue()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

impl BoundedQueue<Job> {
    /// Service duration of the head job, if any.
    ///
    /// This is the tower's load proxy: only the head job's nominal duration
    /// is visible, not a true remaining-time estimate.
    pub async fn peek_head_duration(&self) -> Option<u64> {
        self.inner.lock().await.front().map(|job| job.service_ticks)
    }

    /// Identifiers of all queued jobs, head first. Read-only; used by the
    /// monitor's snapshot.
    pub async fn job_ids(&self) -> Vec<JobId> {
        self.inner.lock().await.iter().map(|job| job.id).collect()
    }
}

/// Held lock over a [`BoundedQueue`], exposing the same operations without
/// re-locking.
pub struct QueueGuard<'a, T> {
    name: &'static str,
    capacity: usize,
    items: MutexGuard<'a, VecDeque<T>>,
}

impl<T> QueueGuard<'_, T> {
    pub fn enqueue(&mut self, item: T) -> Result<(), QueueError> {
        if self.items.len() >= self.capacity {
            return Err(QueueError::CapacityExceeded {
                name: self.name,
                capacity: self.capacity,
            });
        }
        self.items.push_back(item);
        Ok(())
    }

    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        self.items.pop_front().ok_or(QueueError::Empty(self.name))
    }

    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl QueueGuard<'_, Job> {
    /// Head-of-queue service duration, with an empty queue reading as zero
    /// so an idle pad always wins the load-balance comparison.
    pub fn head_duration_or_zero(&self) -> u64 {
        self.front().map(|job| job.service_ticks).unwrap_or(0)
    }
}

/// The eight queue instances of a simulation run.
///
/// Four upstream class queues feed the tower; each pad has a normal and an
/// emergency downstream queue. All are created at simulation start and do
/// not outlive the run. Multi-queue lock acquisition follows a single global
/// order: emergency, pad A emergency, pad B emergency, launch, assembly,
/// pad A, pad B, landing.
#[derive(Debug)]
pub struct AirfieldQueues {
    pub landing: BoundedQueue<Job>,
    pub launch: BoundedQueue<Job>,
    pub assembly: BoundedQueue<Job>,
    pub emergency: BoundedQueue<Job>,
    pub pad_a: BoundedQueue<Job>,
    pub pad_b: BoundedQueue<Job>,
    pub pad_a_emergency: BoundedQueue<Job>,
    pub pad_b_emergency: BoundedQueue<Job>,
}

impl AirfieldQueues {
    pub fn new(capacity: usize) -> Self {
        Self {
            landing: BoundedQueue::new("landing", capacity),
            launch: BoundedQueue::new("launch", capacity),
            assembly: BoundedQueue::new("assembly", capacity),
            emergency: BoundedQueue::new("emergency", capacity),
            pad_a: BoundedQueue::new("pad-a", capacity),
            pad_b: BoundedQueue::new("pad-b", capacity),
            pad_a_emergency: BoundedQueue::new("pad-a-emergency", capacity),
            pad_b_emergency: BoundedQueue::new("pad-b-emergency", capacity),
        }
    }
}
