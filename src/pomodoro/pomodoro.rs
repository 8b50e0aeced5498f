pub const POLL_INTERVAL_MS: u64 = 500; // Redraw the clock twice a second
pub const POMODOROS_PER_CYCLE: u8 = 4; // Work phases before the long break

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            Phase::Work => "WORK",
            Phase::ShortBreak => "SHORT BREAK",
            Phase::LongBreak => "LONG BREAK",
        }
    }

    pub(crate) fn emoji(&self) -> &str {
        match self {
            Phase::Work => "💼",
            Phase::ShortBreak => "☕",
            Phase::LongBreak => "🌴",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Phase::Work)
    }
}

/// Where the user is in the work/break cycle.
///
/// `completed` counts work phases finished in the current cycle. It reaches
/// four only during the long break and drops back to zero when that ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub phase: Phase,
    pub completed: u8,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Work,
            completed: 0,
        }
    }

    /// The session after the current phase runs to completion.
    pub fn advance(self) -> Self {
        match self.phase {
            Phase::Work => {
                let completed = self.completed + 1;
                let phase = if completed == POMODOROS_PER_CYCLE {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                };
                Self { phase, completed }
            }
            Phase::ShortBreak => Self {
                phase: Phase::Work,
                completed: self.completed,
            },
            Phase::LongBreak => Self::new(),
        }
    }
}
