use std::time::Duration;

use tokio::time::Instant;

/// One running phase. Progress is always measured from the captured start
/// instant, never by adding up sleeps.
#[derive(Debug, Clone, Copy)]
pub struct PhaseTimer {
    duration: Duration,
    started: Instant,
}

impl PhaseTimer {
    pub fn start(duration: Duration) -> Self {
        Self {
            duration,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Fraction of the phase that has passed, capped at 1.0.
    pub fn elapsed_fraction(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed().as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed())
    }

    pub fn is_done(&self) -> bool {
        self.elapsed() >= self.duration
    }
}

/// Minutes as a `Duration`. Values too large to represent saturate.
pub fn minutes(minutes: f64) -> Duration {
    Duration::try_from_secs_f64(minutes * 60.0).unwrap_or(Duration::MAX)
}
