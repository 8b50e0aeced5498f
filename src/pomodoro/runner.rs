use std::future::Future;
use std::time::Duration;

use chrono::{Local, TimeDelta};
use tracing::{debug, info, trace};

use super::pomodoro::{POLL_INTERVAL_MS, Phase, Session};
use super::stats::SessionStats;
use super::timer::PhaseTimer;
use crate::clock::clock;
use crate::config::config::Config;
use crate::display::matrix::LedMatrix;
use crate::shutdown::{Shutdown, ShutdownReason};

/// The current phase was cut short by a shutdown request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted(pub ShutdownReason);

/// Drives the work/break cycle on a display until shutdown is requested.
///
/// The runner owns the display, so the final clear on shutdown is the last
/// write it ever sees.
pub struct Pomodoro<D: LedMatrix> {
    display: D,
    config: Config,
    shutdown: Shutdown,
    stats: SessionStats,
}

impl<D: LedMatrix> Pomodoro<D> {
    pub fn new(mut display: D, config: Config, shutdown: Shutdown) -> Self {
        display.set_low_light(config.low_light);
        display.set_rotation(config.rotation);
        display.clear();

        Self {
            display,
            config,
            shutdown,
            stats: SessionStats::new(),
        }
    }

    #[cfg(test)]
    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Cycle through work and breaks forever, returning once shutdown fires.
    pub async fn run(&mut self) -> ShutdownReason {
        let mut session = Session::new();

        let reason = loop {
            match self.step(session).await {
                Ok(next) => session = next,
                Err(Interrupted(reason)) => break reason,
            }
        };

        self.display.clear();
        info!("Stopped: {}", reason);
        reason
    }

    /// Run the phase `session` is in and return the session that follows it.
    pub async fn step(&mut self, session: Session) -> Result<Session, Interrupted> {
        let phase = session.phase;
        let next = session.advance();

        let opening = match phase {
            Phase::Work => "Work!",
            Phase::ShortBreak => "Take a short break.",
            Phase::LongBreak => "Take a long break.",
        };
        self.announce(opening).await?;

        self.log_phase_start(session);
        clock::render_checks(&mut self.display, session.completed, self.config.colors.check);
        clock::render_face(&mut self.display, self.config.colors.face(phase));
        clock::clear_ring(&mut self.display);

        self.run_timer(phase).await?;
        self.stats.record(session, next);

        match phase {
            Phase::Work => self.announce("Stop working!").await?,
            Phase::ShortBreak => self.announce("Break over!").await?,
            Phase::LongBreak => {
                // New cycle: drop the checkmarks and the old ring
                self.display.clear();
                self.announce("Break over!").await?;
            }
        }

        debug!(
            "Finished {} with {} checkmarks, next up {}",
            phase.as_str(),
            next.completed,
            next.phase.as_str()
        );
        Ok(next)
    }

    async fn announce(&mut self, text: &str) -> Result<(), Interrupted> {
        let speed = self.config.scroll_speed();
        until_shutdown(&mut self.shutdown, self.display.show_message(text, speed)).await
    }

    async fn run_timer(&mut self, phase: Phase) -> Result<(), Interrupted> {
        let tick = self.config.colors.tick(phase);
        let timer = PhaseTimer::start(self.config.duration(phase));
        let poll = Duration::from_millis(POLL_INTERVAL_MS);

        loop {
            let done = timer.is_done();
            let fraction = if done { 1.0 } else { timer.elapsed_fraction() };
            trace!(
                "{} {:.2} minutes in",
                phase.as_str(),
                timer.elapsed().as_secs_f64() / 60.0
            );
            clock::render_ring(&mut self.display, fraction, tick);

            if done {
                return Ok(());
            }
            let nap = poll.min(timer.remaining());
            until_shutdown(&mut self.shutdown, tokio::time::sleep(nap)).await?;
        }
    }

    fn log_phase_start(&self, session: Session) {
        let phase = session.phase;
        let minutes = self.config.minutes(phase);
        let until = TimeDelta::from_std(self.config.duration(phase))
            .ok()
            .and_then(|length| Local::now().checked_add_signed(length));

        match until {
            Some(until) => info!(
                "{} {} for {} minutes, until {} ({} checkmarks)",
                phase.emoji(),
                phase.as_str(),
                minutes,
                until.format("%H:%M:%S"),
                session.completed
            ),
            None => info!(
                "{} {} for {} minutes ({} checkmarks)",
                phase.emoji(),
                phase.as_str(),
                minutes,
                session.completed
            ),
        }
    }
}

/// Await `work` unless shutdown fires first. Shutdown wins a tie.
async fn until_shutdown<F>(shutdown: &mut Shutdown, work: F) -> Result<F::Output, Interrupted>
where
    F: Future,
{
    tokio::select! {
        biased;
        reason = shutdown.triggered() => Err(Interrupted(reason)),
        output = work => Ok(output),
    }
}
