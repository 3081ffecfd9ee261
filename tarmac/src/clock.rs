use std::time::{Duration, Instant};

/// Shared simulation clock and deadline.
///
/// All components share one deadline computed once at start; termination is
/// cooperative and time-driven, with no explicit cancellation. Timestamps
/// are simulation-relative integer ticks; the tick length is configurable so
/// tests can run in milliseconds while the reference configuration uses one
/// second per tick.
#[derive(Clone, Debug)]
pub struct SimClock {
    started_at: Instant,
    deadline: Instant,
    tick: Duration,
}

impl SimClock {
    /// Start the clock now, with the deadline `duration_ticks` ticks away.
    pub fn start(duration_ticks: u64, tick: Duration) -> Self {
        let started_at = Instant::now();
        Self {
            started_at,
            deadline: started_at + tick * duration_ticks as u32,
            tick,
        }
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Ticks elapsed since simulation start, rounded down.
    pub fn now_ticks(&self) -> u64 {
        let elapsed = self.started_at.elapsed();
        (elapsed.as_nanos() / self.tick.as_nanos()) as u64
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Block for `n` ticks. This is a true timed wait, never busy-polling.
    pub async fn sleep_ticks(&self, n: u64) {
        tokio::time::sleep(self.tick * n as u32).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clock_expires_after_its_duration() {
        let clock = SimClock::start(2, Duration::from_millis(10));
        assert!(!clock.is_expired());
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(clock.is_expired());
    }

    #[tokio::test]
    async fn now_ticks_advances_with_sleeps() {
        let clock = SimClock::start(100, Duration::from_millis(10));
        assert_eq!(clock.now_ticks(), 0);
        clock.sleep_ticks(3).await;
        let now = clock.now_ticks();
        assert!((3..=4).contains(&now), "expected ~3 ticks, got {now}");
    }
}
