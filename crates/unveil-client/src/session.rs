//! Timer session
//!
//! [`TimerSession`] wires the countdown, tick source, reveal, and alarm into
//! one unit with the lifecycle rules between them: the ticker exists exactly
//! while the countdown runs, expiry fires the alarm, reset fetches the next
//! image. The caller owns the tick receiver and pumps each received tick
//! back in through [`apply_tick`](TimerSession::apply_tick).

use tokio::sync::mpsc;

use crate::alarm::{AlarmController, AudioSink};
use crate::countdown::{Countdown, CountdownError, Phase, TickOutcome};
use crate::reveal::{revealed_fraction, ImageSource, RevealCoordinator};
use crate::ticker::{Tick, TickSource};

pub struct TimerSession<I, A> {
    countdown: Countdown,
    reveal: RevealCoordinator<I>,
    alarm: AlarmController<A>,
    ticker: Option<TickSource>,
}

impl<I: ImageSource, A: AudioSink> TimerSession<I, A> {
    /// Create a session and fetch its first obscuring image.
    pub async fn new(image_source: I, audio_sink: A, sound_enabled: bool) -> Self {
        let mut reveal = RevealCoordinator::new(image_source);
        reveal.refresh().await;
        Self {
            countdown: Countdown::new(),
            reveal,
            alarm: AlarmController::new(audio_sink, sound_enabled),
            ticker: None,
        }
    }

    /// Start the countdown and return the tick stream to pump.
    ///
    /// Call only after the server authorized the start; the session itself
    /// does no gating.
    pub fn start(&mut self, duration_seconds: u32) -> Result<mpsc::Receiver<Tick>, CountdownError> {
        self.countdown.start(duration_seconds)?;
        self.alarm.arm();
        let (source, rx) = TickSource::spawn();
        self.ticker = Some(source);
        Ok(rx)
    }

    /// Apply one received tick.
    ///
    /// On expiry the ticker is dropped and the alarm triggered. Stale ticks
    /// received after pause, reset, or expiry come back [`TickOutcome::Ignored`].
    pub fn apply_tick(&mut self) -> TickOutcome {
        let outcome = self.countdown.tick();
        if outcome == TickOutcome::Expired {
            self.ticker = None;
            self.alarm.trigger();
        }
        outcome
    }

    /// Pause, cancelling the ticker. Returns whether anything changed.
    pub fn pause(&mut self) -> bool {
        if self.countdown.pause() {
            self.ticker = None;
            true
        } else {
            false
        }
    }

    /// Resume a paused countdown with a fresh ticker.
    pub fn resume(&mut self) -> Option<mpsc::Receiver<Tick>> {
        if self.countdown.resume() {
            let (source, rx) = TickSource::spawn();
            self.ticker = Some(source);
            Some(rx)
        } else {
            None
        }
    }

    /// Return to idle: cancel the ticker, quiet the alarm, clear the
    /// countdown, and fetch the next session's image.
    pub async fn reset(&mut self) {
        self.ticker = None;
        self.alarm.stop();
        self.countdown.reset();
        self.reveal.refresh().await;
    }

    /// Stop a ringing alarm.
    pub fn stop_alarm(&mut self) {
        self.alarm.stop();
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.alarm.set_sound_enabled(enabled);
    }

    pub fn sound_enabled(&self) -> bool {
        self.alarm.sound_enabled()
    }

    pub fn phase(&self) -> Phase {
        self.countdown.phase()
    }

    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn total(&self) -> u32 {
        self.countdown.total()
    }

    /// Fraction of the obscuring image revealed so far.
    pub fn revealed_fraction(&self) -> f64 {
        revealed_fraction(self.countdown.remaining(), self.countdown.total())
    }

    pub fn image_url(&self) -> Option<&str> {
        self.reveal.image_url()
    }

    pub fn alarm_ringing(&self) -> bool {
        self.alarm.is_ringing()
    }

    pub fn alarm_stopped(&self) -> bool {
        self.alarm.is_stopped()
    }

    /// Whether a tick source is currently live.
    pub fn ticking(&self) -> bool {
        self.ticker.is_some()
    }
}
