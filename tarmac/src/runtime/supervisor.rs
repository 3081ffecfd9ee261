use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::clock::SimClock;
use crate::config::SimulationConfig;
use crate::generator::TrafficGenerator;
use crate::job::JobClass;
use crate::monitor::QueueMonitor;
use crate::pad::{PadId, PadServer};
use crate::queue::AirfieldQueues;
use crate::sink::LogSink;
use crate::tower::ControlTower;

use super::builder::SimulationBuilder;

/// A fully wired simulation run.
///
/// Owns the shared clock, the eight queues, and the sink. `run` spawns the
/// fixed task set and returns once every task has reached the deadline and
/// returned; no tasks are created after startup and none are cancelled
/// explicitly.
pub struct Simulation {
    config: SimulationConfig,
    clock: SimClock,
    queues: Arc<AirfieldQueues>,
    sink: Arc<dyn LogSink>,
    generators_enabled: bool,
    monitor_enabled: bool,
}

impl Simulation {
    pub(super) fn new(
        config: SimulationConfig,
        clock: SimClock,
        queues: Arc<AirfieldQueues>,
        sink: Arc<dyn LogSink>,
        generators_enabled: bool,
        monitor_enabled: bool,
    ) -> Self {
        Self {
            config,
            clock,
            queues,
            sink,
            generators_enabled,
            monitor_enabled,
        }
    }

    pub fn builder(config: SimulationConfig) -> SimulationBuilder {
        SimulationBuilder::new(config)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Shared clock for this run. Useful for stamping injected jobs.
    pub fn clock(&self) -> SimClock {
        self.clock.clone()
    }

    /// The run's queues. Tests inject jobs through this handle before
    /// calling [`run`](Self::run).
    pub fn queues(&self) -> Arc<AirfieldQueues> {
        Arc::clone(&self.queues)
    }

    /// Run the simulation to its deadline.
    ///
    /// Spawns the generators (unless disabled), the control tower, both pad
    /// servers, and the monitor (unless disabled), then awaits them all.
    /// The first task error is surfaced after every task has been joined.
    pub async fn run(&self) -> anyhow::Result<()> {
        tracing::info!(
            duration_ticks = self.config.simulation_duration_ticks,
            ground_probability = self.config.ground_job_probability,
            seed = self.config.random_seed,
            "simulation starting"
        );

        let mut handles: Vec<(&'static str, JoinHandle<anyhow::Result<()>>)> = Vec::new();

        if self.generators_enabled {
            for class in [
                JobClass::Landing,
                JobClass::Launch,
                JobClass::Assembly,
                JobClass::Emergency,
            ] {
                let generator = TrafficGenerator::new(
                    class,
                    self.queues(),
                    self.clock(),
                    &self.config,
                );
                handles.push((
                    class.as_str(),
                    tokio::spawn(async move { Ok(generator.run().await?) }),
                ));
            }
        }

        let tower = ControlTower::new(self.queues(), self.clock(), &self.config);
        handles.push((
            "tower",
            tokio::spawn(async move { Ok(tower.run().await?) }),
        ));

        for pad_id in [PadId::A, PadId::B] {
            let pad = PadServer::new(
                pad_id,
                self.queues(),
                self.clock(),
                Arc::clone(&self.sink),
                self.config.unit_interval_ticks,
            );
            let name = match pad_id {
                PadId::A => "pad-a",
                PadId::B => "pad-b",
            };
            handles.push((name, tokio::spawn(pad.run())));
        }

        if self.monitor_enabled {
            let monitor = QueueMonitor::new(
                self.queues(),
                self.clock(),
                self.config.quiet_period_ticks,
            );
            handles.push((
                "monitor",
                tokio::spawn(async move {
                    monitor.run().await;
                    Ok(())
                }),
            ));
        }

        let mut first_error: Option<anyhow::Error> = None;
        for (name, handle) in handles {
            let outcome = match handle.await {
                Ok(result) => result,
                Err(join_error) => {
                    Err(anyhow::anyhow!("task '{name}' panicked: {join_error}"))
                }
            };
            if let Err(err) = outcome {
                tracing::error!(task = name, error = %err, "simulation task failed");
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => {
                tracing::info!("simulation complete");
                Ok(())
            }
        }
    }
}
