use std::sync::Arc;

use crate::clock::SimClock;
use crate::config::SimulationConfig;
use crate::queue::AirfieldQueues;
use crate::sink::LogSink;

use super::supervisor::Simulation;

/// Builder for a [`Simulation`] with explicit dependencies.
///
/// The sink is required; the generator and monitor tasks can be disabled so
/// tests can inject jobs directly and run the scheduling core headless.
pub struct SimulationBuilder {
    config: SimulationConfig,
    sink: Option<Arc<dyn LogSink>>,
    generators_enabled: bool,
    monitor_enabled: bool,
}

impl SimulationBuilder {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            sink: None,
            generators_enabled: true,
            monitor_enabled: true,
        }
    }

    /// Set the completion-record sink.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Enable or disable the traffic generators.
    pub fn with_generators(mut self, enabled: bool) -> Self {
        self.generators_enabled = enabled;
        self
    }

    /// Enable or disable the queue monitor.
    pub fn with_monitor(mut self, enabled: bool) -> Self {
        self.monitor_enabled = enabled;
        self
    }

    /// Build the simulation, validating the configuration and starting the
    /// deadline clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the sink is
    /// missing.
    pub fn build(self) -> anyhow::Result<Simulation> {
        self.config.validate()?;
        let sink = self
            .sink
            .ok_or_else(|| anyhow::anyhow!("sink dependency missing"))?;

        let clock = SimClock::start(self.config.simulation_duration_ticks, self.config.tick);
        let queues = Arc::new(AirfieldQueues::new(self.config.queue_capacity));

        Ok(Simulation::new(
            self.config,
            clock,
            queues,
            sink,
            self.generators_enabled,
            self.monitor_enabled,
        ))
    }
}
