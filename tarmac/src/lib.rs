//! Tarmac - a two-pad runway-allocation simulator.
//!
//! Four independent traffic generators (landing, launch, assembly, and
//! emergency) feed bounded FIFO queues. A single control tower drains those
//! queues onto two service pads under a fairness/priority policy, and each
//! pad services jobs for their nominal duration before appending a
//! completion record to a durable log.
//!
//! # Core Concepts
//!
//! - **Job**: An immutable unit of work with a class, a nominal service
//!   duration, and an arrival timestamp. See [`Job`] and [`JobClass`].
//!
//! - **Queue**: Every queue is a [`BoundedQueue`] with its own lock; there
//!   is no global lock. [`AirfieldQueues`] holds the eight instances of a
//!   run.
//!
//! - **Tower**: The [`ControlTower`] arbitration loop: an unconditional
//!   emergency drain, then a fairness-gated dispatch of ground and landing
//!   traffic, once per unit interval.
//!
//! - **Pads**: Two [`PadServer`] loops that service emergency jobs first,
//!   block for each job's duration, and emit [`CompletionRecord`]s.
//!
//! - **Sink**: The [`LogSink`] trait abstracts the append-only completion
//!   log; [`FileLogSink`] is the durable file implementation.
//!
//! - **Runtime**: [`Simulation`] ties the components together and runs them
//!   to a shared, time-driven deadline.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tarmac::{FileLogSink, Simulation, SimulationConfig};
//!
//! let sink = Arc::new(FileLogSink::create("log.txt").await?);
//! let simulation = Simulation::builder(SimulationConfig::default())
//!     .with_sink(sink)
//!     .build()?;
//! simulation.run().await?;
//! ```

/// Shared simulation clock and deadline.
pub mod clock;

/// Simulation configuration and validation.
pub mod config;

/// Queue error taxonomy.
pub mod error;

/// Traffic generators, one per job class.
pub mod generator;

/// Job identifiers, classes, and the job record itself.
pub mod job;

/// Read-only periodic queue snapshots.
pub mod monitor;

/// Pad identifiers and the pad service loop.
pub mod pad;

/// Bounded FIFO queues and the airfield's queue set.
pub mod queue;

/// Simulation wiring and lifecycle.
pub mod runtime;

/// Completion records and log sinks.
pub mod sink;

/// The control-tower arbitration policy.
pub mod tower;

pub use clock::SimClock;
pub use config::SimulationConfig;
pub use error::QueueError;
pub use generator::TrafficGenerator;
pub use job::{Job, JobClass, JobId};
pub use monitor::{QueueMonitor, QueueSnapshot, QueueSnapshotEntry};
pub use pad::{PadId, PadServer};
pub use queue::{AirfieldQueues, BoundedQueue, QueueGuard};
pub use runtime::{Simulation, SimulationBuilder};
pub use sink::{CompletionRecord, FileLogSink, LogSink};
pub use tower::ControlTower;
