use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clock::SimClock;
use crate::job::JobId;
use crate::queue::{AirfieldQueues, BoundedQueue};
use crate::Job;

/// Point-in-time view of every queue's contents.
#[derive(Clone, Debug, Serialize)]
pub struct QueueSnapshot {
    /// Wall-clock timestamp when the snapshot was taken.
    pub sampled_at: DateTime<Utc>,
    /// Simulation-relative timestamp, in ticks.
    pub sampled_at_ticks: u64,
    pub queues: Vec<QueueSnapshotEntry>,
}

/// Contents of a single queue at snapshot time.
#[derive(Clone, Debug, Serialize)]
pub struct QueueSnapshotEntry {
    pub name: &'static str,
    pub depth: usize,
    pub job_ids: Vec<JobId>,
}

/// Read-only observer that periodically reports queue contents.
///
/// Emission is suppressed until the quiet period has elapsed. Queues are
/// visited in the tower's lock-acquisition order, one lock at a time; a
/// snapshot never mutates a queue.
pub struct QueueMonitor {
    queues: Arc<AirfieldQueues>,
    clock: SimClock,
    quiet_period_ticks: u64,
}

impl QueueMonitor {
    pub fn new(queues: Arc<AirfieldQueues>, clock: SimClock, quiet_period_ticks: u64) -> Self {
        Self {
            queues,
            clock,
            quiet_period_ticks,
        }
    }

    /// Run until the shared deadline, sampling once per tick.
    pub async fn run(self) {
        while !self.clock.is_expired() {
            self.clock.sleep_ticks(1).await;
            if self.clock.now_ticks() < self.quiet_period_ticks {
                continue;
            }
            let snapshot = self.snapshot().await;
            for entry in &snapshot.queues {
                tracing::info!(
                    at = snapshot.sampled_at_ticks,
                    queue = entry.name,
                    depth = entry.depth,
                    jobs = ?entry.job_ids,
                    "queue snapshot"
                );
            }
        }
    }

    /// Capture the current contents of every queue.
    pub async fn snapshot(&self) -> QueueSnapshot {
        let order: [&BoundedQueue<Job>; 8] = [
            &self.queues.emergency,
            &self.queues.pad_a_emergency,
            &self.queues.pad_b_emergency,
            &self.queues.launch,
            &self.queues.assembly,
            &self.queues.pad_a,
            &self.queues.pad_b,
            &self.queues.landing,
        ];

        let mut entries = Vec::with_capacity(order.len());
        for queue in order {
            let job_ids = queue.job_ids().await;
            entries.push(QueueSnapshotEntry {
                name: queue.name(),
                depth: job_ids.len(),
                job_ids,
            });
        }

        QueueSnapshot {
            sampled_at: Utc::now(),
            sampled_at_ticks: self.clock.now_ticks(),
            queues: entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobClass;
    use std::time::Duration;

    #[tokio::test]
    async fn snapshot_lists_ids_without_mutating() {
        let queues = Arc::new(AirfieldQueues::new(100));
        for id in 0..3 {
            queues
                .landing
                .enqueue(Job::new(JobId(id), JobClass::Landing, 0))
                .await
                .unwrap();
        }
        queues
            .emergency
            .enqueue(Job::new(JobId(9), JobClass::Emergency, 0))
            .await
            .unwrap();

        let clock = SimClock::start(100, Duration::from_millis(10));
        let monitor = QueueMonitor::new(Arc::clone(&queues), clock, 0);

        let snapshot = monitor.snapshot().await;
        let landing = snapshot
            .queues
            .iter()
            .find(|entry| entry.name == "landing")
            .unwrap();
        assert_eq!(landing.depth, 3);
        assert_eq!(landing.job_ids, vec![JobId(0), JobId(1), JobId(2)]);

        let emergency = snapshot
            .queues
            .iter()
            .find(|entry| entry.name == "emergency")
            .unwrap();
        assert_eq!(emergency.job_ids, vec![JobId(9)]);

        // Observation must leave the queues untouched.
        assert_eq!(queues.landing.len().await, 3);
        assert_eq!(queues.emergency.len().await, 1);
    }
}
