//! Countdown state machine
//!
//! One tagged union holds the whole per-session state, so phase, remaining
//! seconds, and total can never drift apart the way independent flags can.
//! The machine is driven from outside by a tick source; it performs no
//! scheduling of its own.

use thiserror::Error;

/// Countdown session state.
///
/// `Running` holds the invariant `1 <= remaining <= total`: `start` rejects
/// zero durations and the tick that would reach zero transitions to
/// `Expired` instead of staying in `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Countdown {
    #[default]
    Idle,
    Running {
        remaining: u32,
        total: u32,
    },
    Paused {
        remaining: u32,
        total: u32,
    },
    Expired {
        total: u32,
    },
}

/// Discriminant of [`Countdown`], for display and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Expired,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Expired => "expired",
        };
        f.write_str(name)
    }
}

/// What a delivered tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Decremented and still running.
    Ticked { remaining: u32 },
    /// This tick reached zero; the countdown is now expired.
    Expired,
    /// The countdown was not running; the tick was discarded.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CountdownError {
    /// `start` is only valid from `Idle`; reset first.
    #[error("countdown already started")]
    AlreadyStarted,
    /// Zero-length sessions cannot start.
    #[error("duration must be at least one second")]
    ZeroDuration,
}

impl Countdown {
    pub fn new() -> Self {
        Self::Idle
    }

    pub fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::Running { .. } => Phase::Running,
            Self::Paused { .. } => Phase::Paused,
            Self::Expired { .. } => Phase::Expired,
        }
    }

    /// Seconds left. Zero outside `Running`/`Paused`.
    pub fn remaining(&self) -> u32 {
        match self {
            Self::Running { remaining, .. } | Self::Paused { remaining, .. } => *remaining,
            Self::Idle | Self::Expired { .. } => 0,
        }
    }

    /// Session length. Zero when `Idle`.
    pub fn total(&self) -> u32 {
        match self {
            Self::Running { total, .. } | Self::Paused { total, .. } | Self::Expired { total } => {
                *total
            }
            Self::Idle => 0,
        }
    }

    /// Begin a session of `duration_seconds`. Valid only from `Idle`.
    pub fn start(&mut self, duration_seconds: u32) -> Result<(), CountdownError> {
        if !matches!(self, Self::Idle) {
            return Err(CountdownError::AlreadyStarted);
        }
        if duration_seconds == 0 {
            return Err(CountdownError::ZeroDuration);
        }
        *self = Self::Running {
            remaining: duration_seconds,
            total: duration_seconds,
        };
        Ok(())
    }

    /// Apply one tick.
    ///
    /// Outside `Running` this is a no-op returning
    /// [`TickOutcome::Ignored`]: a tick already in flight when the session
    /// pauses, resets, or expires must not decrement anything.
    pub fn tick(&mut self) -> TickOutcome {
        match self {
            Self::Running { remaining, total } => {
                *remaining -= 1;
                if *remaining == 0 {
                    let total = *total;
                    *self = Self::Expired { total };
                    TickOutcome::Expired
                } else {
                    TickOutcome::Ticked {
                        remaining: *remaining,
                    }
                }
            }
            _ => TickOutcome::Ignored,
        }
    }

    /// Pause a running countdown. Returns whether a transition happened.
    pub fn pause(&mut self) -> bool {
        match *self {
            Self::Running { remaining, total } => {
                *self = Self::Paused { remaining, total };
                true
            }
            _ => false,
        }
    }

    /// Resume a paused countdown. Returns whether a transition happened.
    pub fn resume(&mut self) -> bool {
        match *self {
            Self::Paused { remaining, total } => {
                *self = Self::Running { remaining, total };
                true
            }
            _ => false,
        }
    }

    /// Return to `Idle`, clearing all fields.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_second_session_expires_on_fifth_tick() {
        let mut countdown = Countdown::new();
        countdown.start(5).unwrap();

        for expected in [4u32, 3, 2, 1] {
            assert_eq!(
                countdown.tick(),
                TickOutcome::Ticked {
                    remaining: expected
                }
            );
            assert_eq!(countdown.phase(), Phase::Running);
        }

        assert_eq!(countdown.tick(), TickOutcome::Expired);
        assert_eq!(countdown.phase(), Phase::Expired);
        assert_eq!(countdown.remaining(), 0);
        assert_eq!(countdown.total(), 5);
    }

    #[test]
    fn one_second_session_expires_immediately() {
        let mut countdown = Countdown::new();
        countdown.start(1).unwrap();
        assert_eq!(countdown.tick(), TickOutcome::Expired);
        assert_eq!(countdown.phase(), Phase::Expired);
    }

    #[test]
    fn start_rejects_zero_duration() {
        let mut countdown = Countdown::new();
        assert_eq!(countdown.start(0), Err(CountdownError::ZeroDuration));
        assert_eq!(countdown.phase(), Phase::Idle);
    }

    #[test]
    fn start_rejects_non_idle_phases() {
        let mut countdown = Countdown::new();
        countdown.start(10).unwrap();
        assert_eq!(countdown.start(5), Err(CountdownError::AlreadyStarted));

        countdown.pause();
        assert_eq!(countdown.start(5), Err(CountdownError::AlreadyStarted));

        countdown.resume();
        for _ in 0..10 {
            countdown.tick();
        }
        assert_eq!(countdown.phase(), Phase::Expired);
        assert_eq!(countdown.start(5), Err(CountdownError::AlreadyStarted));
    }

    #[test]
    fn pause_and_resume_preserve_remaining() {
        let mut countdown = Countdown::new();
        countdown.start(10).unwrap();
        countdown.tick();
        countdown.tick();
        assert_eq!(countdown.remaining(), 8);

        assert!(countdown.pause());
        assert_eq!(countdown.phase(), Phase::Paused);

        // Ticks delivered while paused change nothing.
        assert_eq!(countdown.tick(), TickOutcome::Ignored);
        assert_eq!(countdown.tick(), TickOutcome::Ignored);
        assert_eq!(countdown.remaining(), 8);

        assert!(countdown.resume());
        assert_eq!(countdown.tick(), TickOutcome::Ticked { remaining: 7 });
    }

    #[test]
    fn pause_and_resume_require_matching_phase() {
        let mut countdown = Countdown::new();
        assert!(!countdown.pause());
        assert!(!countdown.resume());

        countdown.start(5).unwrap();
        assert!(!countdown.resume());
        assert!(countdown.pause());
        assert!(!countdown.pause());
    }

    #[test]
    fn ticks_outside_running_are_ignored() {
        let mut countdown = Countdown::new();
        assert_eq!(countdown.tick(), TickOutcome::Ignored);

        countdown.start(1).unwrap();
        countdown.tick();
        assert_eq!(countdown.phase(), Phase::Expired);
        // Late ticks after expiry are harmless.
        assert_eq!(countdown.tick(), TickOutcome::Ignored);
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn reset_clears_every_phase() {
        let mut countdown = Countdown::new();

        countdown.start(5).unwrap();
        countdown.reset();
        assert_eq!(countdown, Countdown::Idle);
        assert_eq!(countdown.remaining(), 0);
        assert_eq!(countdown.total(), 0);

        countdown.start(5).unwrap();
        countdown.pause();
        countdown.reset();
        assert_eq!(countdown, Countdown::Idle);

        countdown.start(1).unwrap();
        countdown.tick();
        countdown.reset();
        assert_eq!(countdown, Countdown::Idle);

        // A fresh start works after any reset.
        countdown.start(3).unwrap();
        assert_eq!(countdown.phase(), Phase::Running);
        assert_eq!(countdown.remaining(), 3);
    }

    #[test]
    fn phase_display_names() {
        assert_eq!(Phase::Idle.to_string(), "idle");
        assert_eq!(Phase::Running.to_string(), "running");
        assert_eq!(Phase::Paused.to_string(), "paused");
        assert_eq!(Phase::Expired.to_string(), "expired");
    }
}
