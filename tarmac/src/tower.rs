use std::sync::Arc;

use crate::clock::SimClock;
use crate::config::SimulationConfig;
use crate::error::QueueError;
use crate::job::Job;
use crate::pad::PadId;
use crate::queue::{AirfieldQueues, QueueGuard};

/// The control tower: the single arbitration loop that drains the upstream
/// class queues into the pad queues.
///
/// Each cycle runs three steps in order: an unconditional emergency drain,
/// a fairness check on the ground-traffic queues, and the branch the check
/// selects. The branch is decided once per cycle, not per job.
///
/// Multi-queue lock acquisition follows the global order documented on
/// [`AirfieldQueues`]; the fairness-size read and the dequeues it gates
/// happen under the same held guards, so the decision cannot go stale.
pub struct ControlTower {
    queues: Arc<AirfieldQueues>,
    clock: SimClock,
    unit_interval_ticks: u64,
    fairness_threshold: usize,
}

impl ControlTower {
    pub fn new(queues: Arc<AirfieldQueues>, clock: SimClock, config: &SimulationConfig) -> Self {
        Self {
            queues,
            clock,
            unit_interval_ticks: config.unit_interval_ticks,
            fairness_threshold: config.fairness_threshold,
        }
    }

    /// Run one cycle per unit interval until the shared deadline.
    pub async fn run(self) -> Result<(), QueueError> {
        tracing::debug!("control tower started");
        while !self.clock.is_expired() {
            self.cycle().await?;
            self.clock.sleep_ticks(self.unit_interval_ticks).await;
        }
        tracing::debug!("control tower finished");
        Ok(())
    }

    /// Execute a single arbitration cycle.
    ///
    /// Emptiness of any source queue is a normal condition and skips that
    /// action; a full pad queue is a configuration error and propagates.
    pub async fn cycle(&self) -> Result<(), QueueError> {
        self.drain_emergencies().await?;

        let mut launch = self.queues.launch.lock().await;
        let mut assembly = self.queues.assembly.lock().await;
        let under_pressure = launch.len() < self.fairness_threshold
            && assembly.len() < self.fairness_threshold;

        let mut pad_a = self.queues.pad_a.lock().await;
        let mut pad_b = self.queues.pad_b.lock().await;
        let mut landing = self.queues.landing.lock().await;

        if under_pressure {
            // Ground traffic is quiet: flush all waiting landings onto the
            // less-loaded pad, then give each ground class its slot.
            while !landing.is_empty() {
                let job = landing.dequeue()?;
                Self::balance(job, &mut pad_a, &mut pad_b)?;
            }
            if !launch.is_empty() {
                pad_a.enqueue(launch.dequeue()?)?;
            }
            if !assembly.is_empty() {
                pad_b.enqueue(assembly.dequeue()?)?;
            }
        } else {
            // Ground traffic is backing up: one job per ground class first,
            // then at most one landing opportunistically.
            if !launch.is_empty() {
                pad_a.enqueue(launch.dequeue()?)?;
            }
            if !assembly.is_empty() {
                pad_b.enqueue(assembly.dequeue()?)?;
            }
            if !landing.is_empty() {
                let job = landing.dequeue()?;
                Self::balance(job, &mut pad_a, &mut pad_b)?;
            }
        }
        Ok(())
    }

    /// Step 1: move up to two waiting emergencies, first to pad A, second to
    /// pad B. Never consults fairness, never skipped.
    async fn drain_emergencies(&self) -> Result<(), QueueError> {
        let mut emergency = self.queues.emergency.lock().await;
        if !emergency.is_empty() {
            let job = emergency.dequeue()?;
            tracing::debug!(job_id = %job.id, pad = %PadId::A, "emergency dispatched");
            self.queues.pad_a_emergency.lock().await.enqueue(job)?;
        }
        if !emergency.is_empty() {
            let job = emergency.dequeue()?;
            tracing::debug!(job_id = %job.id, pad = %PadId::B, "emergency dispatched");
            self.queues.pad_b_emergency.lock().await.enqueue(job)?;
        }
        Ok(())
    }

    /// Send a landing job to whichever pad reports the shorter head-of-queue
    /// service duration, tie broken in favor of pad A.
    fn balance(
        job: Job,
        pad_a: &mut QueueGuard<'_, Job>,
        pad_b: &mut QueueGuard<'_, Job>,
    ) -> Result<PadId, QueueError> {
        let pad = if pad_a.head_duration_or_zero() <= pad_b.head_duration_or_zero() {
            pad_a.enqueue(job)?;
            PadId::A
        } else {
            pad_b.enqueue(job)?;
            PadId::B
        };
        Ok(pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{JobClass, JobId};
    use std::time::Duration;

    fn tower() -> (ControlTower, Arc<AirfieldQueues>) {
        let config = SimulationConfig::default();
        let queues = Arc::new(AirfieldQueues::new(config.queue_capacity));
        let clock = SimClock::start(
            config.simulation_duration_ticks,
            Duration::from_millis(10),
        );
        let tower = ControlTower::new(Arc::clone(&queues), clock, &config);
        (tower, queues)
    }

    fn job(id: u32, class: JobClass) -> Job {
        Job::new(JobId(id), class, 0)
    }

    #[tokio::test]
    async fn under_pressure_drains_whole_landing_queue() {
        let (tower, queues) = tower();
        for id in 0..4 {
            queues.landing.enqueue(job(id, JobClass::Landing)).await.unwrap();
        }

        tower.cycle().await.unwrap();

        assert!(queues.landing.is_empty().await);
        let assigned = queues.pad_a.len().await + queues.pad_b.len().await;
        assert_eq!(assigned, 4);
    }

    #[tokio::test]
    async fn contention_moves_one_job_per_class() {
        let (tower, queues) = tower();
        for id in 0..3 {
            queues.launch.enqueue(job(id, JobClass::Launch)).await.unwrap();
            queues.assembly.enqueue(job(10 + id, JobClass::Assembly)).await.unwrap();
        }
        for id in 0..2 {
            queues.landing.enqueue(job(20 + id, JobClass::Landing)).await.unwrap();
        }

        tower.cycle().await.unwrap();

        // One launch to pad A, one assembly to pad B, then one landing.
        assert_eq!(queues.launch.len().await, 2);
        assert_eq!(queues.assembly.len().await, 2);
        assert_eq!(queues.landing.len().await, 1);
        assert_eq!(queues.pad_a.len().await + queues.pad_b.len().await, 3);

        let head_a = queues.pad_a.dequeue().await.unwrap();
        assert_eq!(head_a.class, JobClass::Launch);
        let head_b = queues.pad_b.dequeue().await.unwrap();
        assert_eq!(head_b.class, JobClass::Assembly);
    }

    #[tokio::test]
    async fn landing_tie_breaks_to_pad_a() {
        let (tower, queues) = tower();
        // Equal head durations on both pads.
        queues
            .pad_a
            .enqueue(job(1, JobClass::Landing).with_service_ticks(4))
            .await
            .unwrap();
        queues
            .pad_b
            .enqueue(job(2, JobClass::Landing).with_service_ticks(4))
            .await
            .unwrap();
        queues.landing.enqueue(job(3, JobClass::Landing)).await.unwrap();

        tower.cycle().await.unwrap();

        assert_eq!(queues.pad_a.len().await, 2);
        assert_eq!(queues.pad_b.len().await, 1);
    }

    #[tokio::test]
    async fn landing_goes_to_less_loaded_pad() {
        let (tower, queues) = tower();
        queues
            .pad_a
            .enqueue(job(1, JobClass::Assembly))
            .await
            .unwrap();
        queues
            .pad_b
            .enqueue(job(2, JobClass::Landing))
            .await
            .unwrap();
        queues.landing.enqueue(job(3, JobClass::Landing)).await.unwrap();

        tower.cycle().await.unwrap();

        // Pad A's head reads 12 ticks, pad B's 2; the landing picks B.
        assert_eq!(queues.pad_b.len().await, 2);
        assert_eq!(queues.pad_a.len().await, 1);
    }

    #[tokio::test]
    async fn emergencies_drain_two_per_cycle_a_then_b() {
        let (tower, queues) = tower();
        for id in 0..3 {
            queues
                .emergency
                .enqueue(job(id, JobClass::Emergency))
                .await
                .unwrap();
        }

        tower.cycle().await.unwrap();

        assert_eq!(queues.pad_a_emergency.len().await, 1);
        assert_eq!(queues.pad_b_emergency.len().await, 1);
        assert_eq!(queues.emergency.len().await, 1);
        assert_eq!(
            queues.pad_a_emergency.dequeue().await.unwrap().id,
            JobId(0)
        );
        assert_eq!(
            queues.pad_b_emergency.dequeue().await.unwrap().id,
            JobId(1)
        );

        tower.cycle().await.unwrap();
        assert!(queues.emergency.is_empty().await);
    }

    #[tokio::test]
    async fn emergency_drain_ignores_fairness_pressure() {
        let (tower, queues) = tower();
        for id in 0..5 {
            queues.launch.enqueue(job(id, JobClass::Launch)).await.unwrap();
            queues.assembly.enqueue(job(10 + id, JobClass::Assembly)).await.unwrap();
        }
        queues
            .emergency
            .enqueue(job(99, JobClass::Emergency))
            .await
            .unwrap();

        tower.cycle().await.unwrap();

        assert!(queues.emergency.is_empty().await);
        assert_eq!(queues.pad_a_emergency.len().await, 1);
    }

    #[tokio::test]
    async fn empty_sources_are_a_no_op() {
        let (tower, queues) = tower();
        tower.cycle().await.unwrap();
        assert!(queues.pad_a.is_empty().await);
        assert!(queues.pad_b.is_empty().await);
        assert!(queues.pad_a_emergency.is_empty().await);
        assert!(queues.pad_b_emergency.is_empty().await);
    }
}
