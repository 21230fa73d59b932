//! Expiry alarm
//!
//! The controller owns the latch logic around a dumb audio sink: ring on
//! expiry when sound is on, stop exactly once, and re-arm when the next
//! session starts. With sound off, expiry presents as already stopped so
//! the caller never shows a stop control with nothing to stop.

/// Fire-and-forget playback primitive.
pub trait AudioSink {
    /// Begin playback; `looped` repeats until [`stop`](Self::stop).
    fn play(&mut self, looped: bool);
    /// Halt playback.
    fn stop(&mut self);
}

/// Alarm latch over an [`AudioSink`].
#[derive(Debug)]
pub struct AlarmController<A> {
    sink: A,
    sound_enabled: bool,
    active: bool,
    stopped: bool,
}

impl<A: AudioSink> AlarmController<A> {
    pub fn new(sink: A, sound_enabled: bool) -> Self {
        Self {
            sink,
            sound_enabled,
            active: false,
            stopped: false,
        }
    }

    /// Clear the latch for a new session.
    pub fn arm(&mut self) {
        self.active = false;
        self.stopped = false;
    }

    /// React to the countdown expiring.
    pub fn trigger(&mut self) {
        if self.sound_enabled {
            self.sink.play(true);
            self.active = true;
            self.stopped = false;
        } else {
            // Nothing is ringing, so there is nothing left to stop.
            self.active = false;
            self.stopped = true;
        }
    }

    /// Stop a ringing alarm. Idempotent: once stopped, further calls do
    /// nothing, and playback is never halted twice.
    pub fn stop(&mut self) {
        if self.active {
            self.sink.stop();
            self.active = false;
            self.stopped = true;
        }
    }

    /// Toggle the sound preference. Disabling while ringing stops playback.
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
        if !enabled && self.active {
            self.stop();
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Whether the alarm is ringing right now.
    pub fn is_ringing(&self) -> bool {
        self.active
    }

    /// Whether this session's alarm has been stopped (or expired silently).
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}
