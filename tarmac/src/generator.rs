use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::SimClock;
use crate::config::SimulationConfig;
use crate::error::QueueError;
use crate::job::{Job, JobClass, JobId};
use crate::queue::{AirfieldQueues, BoundedQueue};

/// Periodic producer for one traffic class.
///
/// Landing fires with probability `1 - p`, Launch and Assembly each with
/// `p / 2`, and Emergency fires deterministically every
/// `emergency_frequency_units` unit intervals, producing two jobs per
/// firing. A fire appends to this class's upstream queue under that queue's
/// lock only; generators never touch any other queue.
///
/// Each generator owns its own seeded RNG, derived from the configured seed
/// and a per-class offset, so runs are reproducible without a process-wide
/// RNG.
pub struct TrafficGenerator {
    class: JobClass,
    queues: Arc<AirfieldQueues>,
    clock: SimClock,
    rng: StdRng,
    ground_probability: f64,
    interval_ticks: u64,
}

impl TrafficGenerator {
    pub fn new(
        class: JobClass,
        queues: Arc<AirfieldQueues>,
        clock: SimClock,
        config: &SimulationConfig,
    ) -> Self {
        let offset = match class {
            JobClass::Landing => 0,
            JobClass::Launch => 1,
            JobClass::Assembly => 2,
            JobClass::Emergency => 3,
        };
        let interval_ticks = match class {
            JobClass::Emergency => {
                config.emergency_frequency_units * config.unit_interval_ticks
            }
            _ => config.unit_interval_ticks,
        };
        Self {
            class,
            queues,
            clock,
            rng: StdRng::seed_from_u64(config.random_seed.wrapping_add(offset)),
            ground_probability: config.ground_job_probability,
            interval_ticks,
        }
    }

    fn upstream(&self) -> &BoundedQueue<Job> {
        match self.class {
            JobClass::Landing => &self.queues.landing,
            JobClass::Launch => &self.queues.launch,
            JobClass::Assembly => &self.queues.assembly,
            JobClass::Emergency => &self.queues.emergency,
        }
    }

    fn should_fire(&mut self) -> bool {
        match self.class {
            JobClass::Landing => self.rng.gen_bool(1.0 - self.ground_probability),
            JobClass::Launch | JobClass::Assembly => {
                self.rng.gen_bool(self.ground_probability / 2.0)
            }
            JobClass::Emergency => true,
        }
    }

    fn jobs_per_fire(&self) -> usize {
        match self.class {
            JobClass::Emergency => 2,
            _ => 1,
        }
    }

    /// Run until the shared deadline. The sleep-then-maybe-enqueue step in
    /// flight when the deadline passes still finishes; the deadline is only
    /// checked between iterations.
    pub async fn run(mut self) -> Result<(), QueueError> {
        tracing::debug!(class = %self.class, "generator started");
        while !self.clock.is_expired() {
            self.clock.sleep_ticks(self.interval_ticks).await;
            if !self.should_fire() {
                continue;
            }
            for _ in 0..self.jobs_per_fire() {
                let job = Job::new(
                    JobId(self.rng.gen_range(0..1000)),
                    self.class,
                    self.clock.now_ticks(),
                );
                tracing::debug!(
                    class = %self.class,
                    job_id = %job.id,
                    arrival = job.arrival_ticks,
                    "job generated"
                );
                self.upstream().enqueue(job).await?;
            }
        }
        tracing::debug!(class = %self.class, "generator finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn setup(class: JobClass, p: f64) -> TrafficGenerator {
        let config = SimulationConfig::default()
            .with_ground_probability(p)
            .with_tick(Duration::from_millis(5));
        let queues = Arc::new(AirfieldQueues::new(config.queue_capacity));
        let clock = SimClock::start(6, config.tick);
        TrafficGenerator::new(class, queues, clock, &config)
    }

    #[test]
    fn landing_always_fires_when_p_is_zero() {
        let mut gen = setup(JobClass::Landing, 0.0);
        for _ in 0..100 {
            assert!(gen.should_fire());
        }
    }

    #[test]
    fn ground_classes_never_fire_when_p_is_zero() {
        let mut launch = setup(JobClass::Launch, 0.0);
        let mut assembly = setup(JobClass::Assembly, 0.0);
        for _ in 0..100 {
            assert!(!launch.should_fire());
            assert!(!assembly.should_fire());
        }
    }

    #[test]
    fn emergency_fires_deterministically_in_pairs() {
        let mut gen = setup(JobClass::Emergency, 0.2);
        assert!(gen.should_fire());
        assert_eq!(gen.jobs_per_fire(), 2);
        // Interval stretches by the emergency frequency.
        let config = SimulationConfig::default();
        assert_eq!(
            gen.interval_ticks,
            config.emergency_frequency_units * config.unit_interval_ticks
        );
    }

    #[tokio::test]
    async fn generator_appends_to_its_own_queue_only() {
        let config = SimulationConfig::default()
            .with_ground_probability(0.0)
            .with_tick(Duration::from_millis(5));
        let queues = Arc::new(AirfieldQueues::new(config.queue_capacity));
        let clock = SimClock::start(8, config.tick);
        let gen = TrafficGenerator::new(
            JobClass::Landing,
            Arc::clone(&queues),
            clock,
            &config,
        );

        gen.run().await.unwrap();

        assert!(queues.landing.len().await >= 1);
        assert!(queues.launch.is_empty().await);
        assert!(queues.assembly.is_empty().await);
        assert!(queues.emergency.is_empty().await);
    }
}
