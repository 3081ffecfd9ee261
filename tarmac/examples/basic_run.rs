//! Basic simulation example with an in-memory log sink.
//!
//! This example disables the random traffic generators and injects a small
//! hand-picked batch of jobs, so the output is easy to follow. For a full
//! randomized run writing to a log file, use the `tarmac` binary instead.

use std::sync::Arc;
use std::time::Duration;

use tarmac::{JobClass, Simulation, SimulationConfig};
use tarmac_testkit::{job, MemoryLogSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== Tarmac Basic Example ===\n");

    // Run fast: 50ms per simulated tick instead of the default 1s.
    let config = SimulationConfig::default()
        .with_duration_ticks(30)
        .with_tick(Duration::from_millis(50));

    let sink = Arc::new(MemoryLogSink::new());
    let simulation = Simulation::builder(config)
        .with_sink(sink.clone())
        .with_generators(false)
        .with_monitor(false)
        .build()?;

    println!("1. Injecting jobs...");
    let queues = simulation.queues();
    queues.landing.enqueue(job(1, JobClass::Landing)).await?;
    queues.landing.enqueue(job(2, JobClass::Landing)).await?;
    queues.launch.enqueue(job(3, JobClass::Launch)).await?;
    queues.assembly.enqueue(job(4, JobClass::Assembly)).await?;
    queues.emergency.enqueue(job(5, JobClass::Emergency)).await?;
    println!("   2 landings, 1 launch, 1 assembly, 1 emergency\n");

    println!("2. Running the simulation...");
    simulation.run().await?;

    println!("\n3. Completion log:");
    println!("   {:<6} {:>9} {:>10} {:>4}", "JobID", "Class", "Completion", "Pad");
    for record in sink.records() {
        println!(
            "   {:<6} {:>9} {:>10} {:>4}",
            record.job.id, record.job.class, record.completed_at_ticks, record.pad
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
