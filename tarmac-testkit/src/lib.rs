//! In-memory test doubles for tarmac integration tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use tarmac::{CompletionRecord, Job, JobClass, JobId, LogSink, PadId};

/// Log sink that keeps completion records in memory for assertions.
#[derive(Clone, Default)]
pub struct MemoryLogSink {
    records: Arc<Mutex<Vec<CompletionRecord>>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records appended so far, in append order.
    pub fn records(&self) -> Vec<CompletionRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Records serviced by the given pad, in append order.
    pub fn records_for_pad(&self, pad: PadId) -> Vec<CompletionRecord> {
        self.records
            .lock()
            .iter()
            .filter(|record| record.pad == pad)
            .cloned()
            .collect()
    }

    /// The record for the given job id, if exactly one exists.
    pub fn record_for(&self, id: JobId) -> Option<CompletionRecord> {
        let records = self.records.lock();
        let mut matches = records.iter().filter(|record| record.job.id == id);
        let found = matches.next().cloned();
        match matches.next() {
            Some(_) => None,
            None => found,
        }
    }
}

#[async_trait]
impl LogSink for MemoryLogSink {
    async fn append(&self, record: CompletionRecord) -> anyhow::Result<()> {
        self.records.lock().push(record);
        Ok(())
    }
}

/// Sink that fails every append, for error-propagation tests.
#[derive(Clone, Default)]
pub struct FailingLogSink;

#[async_trait]
impl LogSink for FailingLogSink {
    async fn append(&self, _record: CompletionRecord) -> anyhow::Result<()> {
        anyhow::bail!("sink unavailable")
    }
}

/// A job with the class's nominal duration, arriving at tick zero.
pub fn job(id: u32, class: JobClass) -> Job {
    Job::new(JobId(id), class, 0)
}

/// A job with an overridden service duration, arriving at tick zero.
pub fn job_with_duration(id: u32, class: JobClass, service_ticks: u64) -> Job {
    Job::new(JobId(id), class, 0).with_service_ticks(service_ticks)
}
