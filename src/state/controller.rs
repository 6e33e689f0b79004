//! Timer state machine
//!
//! `Idle -> Running <-> Paused -> Idle`, where the way back to idle is either a
//! reset or the timer reaching its duration on a tick. Every operation takes the
//! current instant so callers decide which clock drives the timer.

use std::time::{Duration, Instant};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::services::Notifier;
use super::timer_state::{Phase, TimerState};

/// Title of the expiry notification
pub const EXPIRY_TITLE: &str = "Time's up!";

/// What an operation did to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Started,
    Reset,
    Paused,
    Resumed,
    Ticked,
    Expired,
    Ignored,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Started => "started",
            Transition::Reset => "reset",
            Transition::Paused => "paused",
            Transition::Resumed => "resumed",
            Transition::Ticked => "ticked",
            Transition::Expired => "expired",
            Transition::Ignored => "ignored",
        }
    }

    /// Whether observers need a fresh snapshot
    pub fn changed_state(&self) -> bool {
        !matches!(self, Transition::Ignored)
    }
}

/// Body text of the expiry notification for a given duration
pub fn expiry_body(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (amount, unit) = if secs >= 60 && secs % 60 == 0 {
        (secs / 60, "minute")
    } else {
        (secs, "second")
    };
    format!("Your {}-{} session has finished.", amount, unit)
}

/// Owns the timer state and fires the expiry notification
#[derive(Debug)]
pub struct TimerController<N> {
    state: TimerState,
    notifier: N,
    body: String,
    expirations: u64,
}

impl<N: Notifier> TimerController<N> {
    pub fn new(duration: Duration, notifier: N) -> Self {
        Self {
            state: TimerState::new(duration),
            notifier,
            body: expiry_body(duration),
            expirations: 0,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn expirations(&self) -> u64 {
        self.expirations
    }

    /// Start from idle, or reset a running or paused timer back to idle
    pub fn start_or_reset(&mut self, now: Instant) -> Transition {
        match self.state.phase() {
            Phase::Idle => {
                self.state.running = true;
                self.state.paused = false;
                self.state.start_reference = Some(now);
                self.state.elapsed = Duration::ZERO;
                info!("Timer started for {:?}", self.state.duration);
                Transition::Started
            }
            Phase::Running | Phase::Paused => {
                self.reset();
                info!("Timer reset");
                Transition::Reset
            }
        }
    }

    /// Pause a running timer or resume a paused one; ignored while idle
    pub fn pause_or_resume(&mut self, now: Instant) -> Transition {
        match self.state.phase() {
            Phase::Idle => {
                debug!("Pause/resume ignored while idle");
                Transition::Ignored
            }
            Phase::Running => {
                self.state.paused = true;
                info!("Timer paused at {:?}", self.state.elapsed);
                Transition::Paused
            }
            Phase::Paused => {
                // Back-date the reference so the next tick continues from the frozen value
                let reference = match now.checked_sub(self.state.elapsed) {
                    Some(reference) => reference,
                    None => {
                        warn!("Clock cannot be back-dated by {:?}, resuming from now", self.state.elapsed);
                        self.state.elapsed = Duration::ZERO;
                        now
                    }
                };
                self.state.start_reference = Some(reference);
                self.state.paused = false;
                info!("Timer resumed at {:?}", self.state.elapsed);
                Transition::Resumed
            }
        }
    }

    /// Advance the timer to `now`, firing the notification once on expiry
    pub fn on_tick(&mut self, now: Instant) -> Transition {
        if self.state.phase() != Phase::Running {
            return Transition::Ignored;
        }
        let Some(start) = self.state.start_reference else {
            return Transition::Ignored;
        };

        let candidate = now.saturating_duration_since(start);
        self.state.elapsed = candidate.min(self.state.duration);

        if self.state.elapsed >= self.state.duration {
            // Go idle before notifying so any later tick is a no-op
            self.state.running = false;
            self.state.paused = false;
            self.state.start_reference = None;
            self.expirations += 1;
            info!("Timer expired after {:?}", self.state.duration);
            self.notifier.notify(EXPIRY_TITLE, &self.body);
            return Transition::Expired;
        }

        Transition::Ticked
    }

    fn reset(&mut self) {
        self.state.running = false;
        self.state.paused = false;
        self.state.start_reference = None;
        self.state.elapsed = Duration::ZERO;
    }
}
