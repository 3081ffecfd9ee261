use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::pad::PadId;

/// Opaque job identifier.
///
/// Identifiers are small integers drawn by the generators and are not
/// required to be unique; the completion log is keyed by position, not id.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct JobId(pub u32);

impl Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of traffic classes moving through the airfield.
///
/// Each class carries a fixed nominal service duration and, for the ground
/// classes, a fixed pad affinity. Adding a class means extending these
/// tables; the tower's control flow does not change.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum JobClass {
    Landing,
    Launch,
    Assembly,
    Emergency,
}

impl JobClass {
    /// Nominal service duration for this class, in ticks.
    pub fn service_ticks(&self) -> u64 {
        match self {
            JobClass::Landing => 2,
            JobClass::Launch => 4,
            JobClass::Assembly => 12,
            JobClass::Emergency => 2,
        }
    }

    /// Fixed pad affinity for ground traffic. Landing and emergency jobs
    /// have no affinity; they are balanced or drained by the tower.
    pub fn affinity(&self) -> Option<PadId> {
        match self {
            JobClass::Launch => Some(PadId::A),
            JobClass::Assembly => Some(PadId::B),
            JobClass::Landing | JobClass::Emergency => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobClass::Landing => "landing",
            JobClass::Launch => "launch",
            JobClass::Assembly => "assembly",
            JobClass::Emergency => "emergency",
        }
    }
}

impl Display for JobClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work flowing through the system.
///
/// Jobs are immutable once created. Completion time is computed by the pad
/// server when service finishes and travels in the completion record; it is
/// never written back onto the job.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub class: JobClass,
    /// Service duration in ticks, stamped from the class table at creation.
    pub service_ticks: u64,
    /// Simulation-relative arrival timestamp, in ticks.
    pub arrival_ticks: u64,
}

impl Job {
    /// Create a job with the nominal service duration for its class.
    pub fn new(id: JobId, class: JobClass, arrival_ticks: u64) -> Self {
        Self {
            id,
            class,
            service_ticks: class.service_ticks(),
            arrival_ticks,
        }
    }

    /// Override the service duration. Used by scenario tests that need
    /// equal-length jobs across classes.
    pub fn with_service_ticks(mut self, ticks: u64) -> Self {
        self.service_ticks = ticks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_durations_match_reference_table() {
        assert_eq!(JobClass::Landing.service_ticks(), 2);
        assert_eq!(JobClass::Launch.service_ticks(), 4);
        assert_eq!(JobClass::Assembly.service_ticks(), 12);
        assert_eq!(JobClass::Emergency.service_ticks(), 2);
    }

    #[test]
    fn ground_classes_have_fixed_affinity() {
        assert_eq!(JobClass::Launch.affinity(), Some(PadId::A));
        assert_eq!(JobClass::Assembly.affinity(), Some(PadId::B));
        assert_eq!(JobClass::Landing.affinity(), None);
        assert_eq!(JobClass::Emergency.affinity(), None);
    }

    #[test]
    fn new_job_stamps_class_duration() {
        let job = Job::new(JobId(7), JobClass::Launch, 3);
        assert_eq!(job.service_ticks, 4);
        assert_eq!(job.arrival_ticks, 3);

        let job = job.with_service_ticks(2);
        assert_eq!(job.service_ticks, 2);
    }
}
