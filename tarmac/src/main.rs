use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tarmac::{FileLogSink, Simulation, SimulationConfig};

#[derive(Parser, Debug)]
#[command(name = "tarmac")]
#[command(version)]
#[command(about = "Two-pad runway-allocation simulator")]
struct Args {
    /// Probability of ground traffic (launch & assembly), in [0, 1]
    #[arg(short = 'p', long = "ground-probability", default_value_t = 0.2)]
    ground_probability: f64,

    /// Simulation duration in seconds
    #[arg(short = 't', long = "duration", default_value_t = 120)]
    duration_secs: u64,

    /// Random seed for the traffic generators
    #[arg(short = 's', long = "seed", default_value_t = 10)]
    seed: u64,

    /// Quiet period in seconds before queue snapshots are emitted
    #[arg(short = 'n', long = "quiet-period", default_value_t = 30)]
    quiet_period_secs: u64,

    /// Emergency firing frequency, in unit intervals
    #[arg(short = 'e', long = "emergency-frequency", default_value_t = 5)]
    emergency_frequency: u64,

    /// Path of the completion log
    #[arg(long = "log-path", default_value = "log.txt")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = SimulationConfig::default()
        .with_ground_probability(args.ground_probability)
        .with_duration_ticks(args.duration_secs)
        .with_seed(args.seed)
        .with_quiet_period_ticks(args.quiet_period_secs)
        .with_tick(Duration::from_secs(1));
    config.emergency_frequency_units = args.emergency_frequency;

    let sink = Arc::new(FileLogSink::create(&args.log_path).await?);

    let simulation = Simulation::builder(config).with_sink(sink).build()?;
    simulation.run().await
}
