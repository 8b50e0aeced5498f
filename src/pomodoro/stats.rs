use chrono::{DateTime, Local};

use super::pomodoro::{Phase, Session};

/// Counters for the current run. Kept in memory only.
#[derive(Debug, Clone)]
pub struct SessionStats {
    pub started: DateTime<Local>,
    pub pomodoros: u32,
    pub cycles: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            started: Local::now(),
            pomodoros: 0,
            cycles: 0,
        }
    }

    /// Count the phase `finished` that moved the session to `next`.
    pub fn record(&mut self, finished: Session, next: Session) {
        match finished.phase {
            Phase::Work => self.pomodoros += 1,
            Phase::LongBreak if next.completed == 0 => self.cycles += 1,
            _ => {}
        }
    }

    pub fn summary(&self) -> String {
        let minutes = (Local::now() - self.started).num_minutes();
        format!(
            "Ran {} minutes since {}: {} pomodoros, {} full cycles",
            minutes,
            self.started.format("%H:%M:%S"),
            self.pomodoros,
            self.cycles
        )
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
