use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::job::Job;
use crate::pad::PadId;

/// Terminal record for one serviced job, emitted by a pad server.
///
/// Turnaround is derived here rather than stored by the server; the job
/// itself never carries a completion time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub job: Job,
    /// Simulation-relative completion timestamp, in ticks.
    pub completed_at_ticks: u64,
    pub pad: PadId,
}

impl CompletionRecord {
    pub fn turnaround_ticks(&self) -> u64 {
        self.completed_at_ticks
            .saturating_sub(self.job.arrival_ticks)
    }
}

/// Durable append-only sink for completion records.
///
/// Implementations must append records whole; concurrent writers never
/// interleave partial records. A failed append propagates to the pad server
/// that triggered it rather than being dropped silently.
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn append(&self, record: CompletionRecord) -> anyhow::Result<()>;
}

/// File-backed log sink.
///
/// Creates (or truncates) the file and writes a human-readable header line
/// before any record. Appends are serialized on an internal mutex and each
/// one is a single formatted line followed by a flush.
pub struct FileLogSink {
    file: Mutex<File>,
}

impl FileLogSink {
    pub async fn create(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path.as_ref())
            .await?;
        let header = format!(
            "# tarmac simulation log, started {}\n{:<6} {:>9} {:>8} {:>10} {:>10} {:>4}\n",
            Utc::now().to_rfc3339(),
            "JobID",
            "Class",
            "Arrival",
            "Completion",
            "Turnaround",
            "Pad",
        );
        file.write_all(header.as_bytes()).await?;
        file.flush().await?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

#[async_trait]
impl LogSink for FileLogSink {
    async fn append(&self, record: CompletionRecord) -> anyhow::Result<()> {
        let line = format!(
            "{:<6} {:>9} {:>8} {:>10} {:>10} {:>4}\n",
            record.job.id,
            record.job.class,
            record.job.arrival_ticks,
            record.completed_at_ticks,
            record.turnaround_ticks(),
            record.pad,
        );
        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{JobClass, JobId};

    #[test]
    fn turnaround_is_completion_minus_arrival() {
        let record = CompletionRecord {
            job: Job::new(JobId(1), JobClass::Landing, 4),
            completed_at_ticks: 9,
            pad: PadId::A,
        };
        assert_eq!(record.turnaround_ticks(), 5);
    }

    #[tokio::test]
    async fn file_sink_writes_header_then_records() {
        let path = std::env::temp_dir().join(format!(
            "tarmac-sink-test-{}.log",
            std::process::id()
        ));

        let sink = FileLogSink::create(&path).await.unwrap();
        sink.append(CompletionRecord {
            job: Job::new(JobId(42), JobClass::Launch, 2),
            completed_at_ticks: 6,
            pad: PadId::A,
        })
        .await
        .unwrap();
        sink.append(CompletionRecord {
            job: Job::new(JobId(7), JobClass::Assembly, 2),
            completed_at_ticks: 14,
            pad: PadId::B,
        })
        .await
        .unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();

        let lines: Vec<&str> = contents.lines().collect();
        assert!(lines[0].starts_with("# tarmac simulation log"));
        assert!(lines[1].contains("JobID"));
        assert!(lines[2].contains("42"));
        assert!(lines[2].contains("launch"));
        assert!(lines[3].contains("assembly"));
        assert!(lines[3].ends_with("B"));
    }
}
