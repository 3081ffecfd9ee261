use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a simulation run.
///
/// Defaults match the reference simulation: one-second ticks, a two-tick
/// unit interval, a two-minute run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Probability `p` of ground traffic. Landing fires with probability
    /// `1 - p`; Launch and Assembly each fire with `p / 2`. Must be in
    /// `[0, 1]`.
    pub ground_job_probability: f64,
    /// Total simulation length, in ticks.
    pub simulation_duration_ticks: u64,
    /// Seed for the generators' RNGs; runs with equal seeds are
    /// reproducible.
    pub random_seed: u64,
    /// Snapshot emission is suppressed before this many ticks have elapsed.
    pub quiet_period_ticks: u64,
    /// The emergency generator fires every this many unit intervals.
    pub emergency_frequency_units: u64,
    /// Length of one unit interval, in ticks.
    pub unit_interval_ticks: u64,
    /// Queue-size cutoff below which landing traffic is fully drained.
    pub fairness_threshold: usize,
    /// Capacity of every queue. Sized generously; hitting it is a
    /// configuration error, not backpressure.
    pub queue_capacity: usize,
    /// Real-time length of one tick.
    pub tick: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ground_job_probability: 0.2,
            simulation_duration_ticks: 120,
            random_seed: 10,
            quiet_period_ticks: 30,
            emergency_frequency_units: 5,
            unit_interval_ticks: 2,
            fairness_threshold: 3,
            queue_capacity: 1000,
            tick: Duration::from_secs(1),
        }
    }
}

impl SimulationConfig {
    /// Set the ground-traffic probability.
    pub fn with_ground_probability(mut self, p: f64) -> Self {
        self.ground_job_probability = p;
        self
    }

    /// Set the simulation duration in ticks.
    pub fn with_duration_ticks(mut self, ticks: u64) -> Self {
        self.simulation_duration_ticks = ticks;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Set the real-time tick length.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Set the quiet period before snapshots are emitted.
    pub fn with_quiet_period_ticks(mut self, ticks: u64) -> Self {
        self.quiet_period_ticks = ticks;
        self
    }

    /// Validate parameter ranges.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.ground_job_probability) {
            anyhow::bail!(
                "ground_job_probability must be in [0, 1], got {}",
                self.ground_job_probability
            );
        }
        if self.tick.is_zero() {
            anyhow::bail!("tick must be non-zero");
        }
        if self.unit_interval_ticks == 0 {
            anyhow::bail!("unit_interval_ticks must be non-zero");
        }
        if self.emergency_frequency_units == 0 {
            anyhow::bail!("emergency_frequency_units must be non-zero");
        }
        if self.queue_capacity == 0 {
            anyhow::bail!("queue_capacity must be non-zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_configuration() {
        let config = SimulationConfig::default();
        assert_eq!(config.ground_job_probability, 0.2);
        assert_eq!(config.simulation_duration_ticks, 120);
        assert_eq!(config.random_seed, 10);
        assert_eq!(config.quiet_period_ticks, 30);
        assert_eq!(config.emergency_frequency_units, 5);
        assert_eq!(config.fairness_threshold, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let config = SimulationConfig::default().with_ground_probability(1.5);
        assert!(config.validate().is_err());

        let config = SimulationConfig::default().with_ground_probability(-0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_tick_is_rejected() {
        let config = SimulationConfig::default().with_tick(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
