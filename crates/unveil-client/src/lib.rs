//! # unveil-client
//!
//! Client-side timer machinery and the HTTP client for the timer API.
//!
//! The countdown never runs server-side: the API only gates and records
//! session starts. Everything that happens between "start" and "expired"
//! lives here:
//!
//! - [`countdown`]: the tick-driven countdown state machine.
//! - [`ticker`]: the one-second tick source, cancelled on drop.
//! - [`reveal`]: progressive image reveal derived from the countdown.
//! - [`alarm`]: the expiry alarm latch over an audio sink.
//! - [`session`]: [`TimerSession`] wiring the four together.
//! - [`api`]: [`ApiClient`] for account, usage, and session-start calls.

pub mod alarm;
pub mod api;
pub mod config;
pub mod countdown;
pub mod error;
pub mod reveal;
pub mod session;
pub mod ticker;

pub use alarm::{AlarmController, AudioSink};
pub use api::{ApiClient, StartOutcome};
pub use config::ClientConfig;
pub use countdown::{Countdown, CountdownError, Phase, TickOutcome};
pub use error::ClientError;
pub use reveal::{ImageSource, PicsumImageSource, RevealCoordinator};
pub use session::TimerSession;
pub use ticker::{Tick, TickSource};
