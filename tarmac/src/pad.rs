use std::fmt::Display;
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::clock::SimClock;
use crate::queue::{AirfieldQueues, BoundedQueue};
use crate::sink::{CompletionRecord, LogSink};
use crate::Job;

/// Identifier for one of the two service pads.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PadId {
    A,
    B,
}

impl Display for PadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PadId::A => f.write_str("A"),
            PadId::B => f.write_str("B"),
        }
    }
}

/// Service loop for one pad.
///
/// Emergency jobs are serviced to completion before any normal job is
/// considered. Preemption happens at the queue boundary only: a normal job
/// already being serviced runs to completion before the emergency queue is
/// checked again.
///
/// A job is removed from its queue only after service finishes, so queue
/// size reads as "not yet started or in service", matching what the tower's
/// head-duration comparison expects.
pub struct PadServer {
    id: PadId,
    queues: Arc<AirfieldQueues>,
    clock: SimClock,
    sink: Arc<dyn LogSink>,
    unit_interval_ticks: u64,
}

impl PadServer {
    pub fn new(
        id: PadId,
        queues: Arc<AirfieldQueues>,
        clock: SimClock,
        sink: Arc<dyn LogSink>,
        unit_interval_ticks: u64,
    ) -> Self {
        Self {
            id,
            queues,
            clock,
            sink,
            unit_interval_ticks,
        }
    }

    fn normal(&self) -> &BoundedQueue<Job> {
        match self.id {
            PadId::A => &self.queues.pad_a,
            PadId::B => &self.queues.pad_b,
        }
    }

    fn emergency(&self) -> &BoundedQueue<Job> {
        match self.id {
            PadId::A => &self.queues.pad_a_emergency,
            PadId::B => &self.queues.pad_b_emergency,
        }
    }

    /// Run until the shared deadline. A service already in progress at the
    /// deadline finishes and is logged before the loop exits.
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::debug!(pad = %self.id, "pad server started");
        while !self.clock.is_expired() {
            if let Some(service_ticks) = self.emergency().peek_head_duration().await {
                self.clock.sleep_ticks(service_ticks).await;
                let job = self
                    .emergency()
                    .dequeue()
                    .await
                    .context("emergency job vanished mid-service")?;
                self.complete(job).await?;
                continue;
            }

            match self.normal().peek_head_duration().await {
                None => self.clock.sleep_ticks(self.unit_interval_ticks).await,
                Some(service_ticks) => {
                    self.clock.sleep_ticks(service_ticks).await;
                    // Dequeue-confirm: this server is the queue's only
                    // consumer, so the head is still the job just serviced.
                    let job = self
                        .normal()
                        .dequeue()
                        .await
                        .context("serviced job vanished from pad queue")?;
                    self.complete(job).await?;
                }
            }
        }
        tracing::debug!(pad = %self.id, "pad server finished");
        Ok(())
    }

    async fn complete(&self, job: Job) -> anyhow::Result<()> {
        let completed_at_ticks = self.clock.now_ticks();
        tracing::info!(
            pad = %self.id,
            job_id = %job.id,
            class = %job.class,
            arrival = job.arrival_ticks,
            completion = completed_at_ticks,
            "job serviced"
        );
        self.sink
            .append(CompletionRecord {
                job,
                completed_at_ticks,
                pad: self.id,
            })
            .await
            .with_context(|| format!("log sink append failed on pad {}", self.id))
    }
}
