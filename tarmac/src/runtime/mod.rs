//! Simulation wiring and lifecycle.
//!
//! [`SimulationBuilder`] assembles a [`Simulation`] from a validated
//! configuration and a log sink; [`Simulation::run`] spawns the fixed task
//! set (four generators, the control tower, two pad servers, the monitor)
//! and awaits the shared deadline.

mod builder;
mod supervisor;

pub use builder::SimulationBuilder;
pub use supervisor::Simulation;
