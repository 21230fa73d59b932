//! # unveil-trial
//!
//! Trial gating for timer sessions.
//!
//! [`UsageLedger`] records every started timer against the account and flips
//! the trial flag once the limit is reached. [`SessionGate`] is the pure
//! policy decision: given a usage snapshot and a requested duration, may this
//! session start? Gating and recording are deliberately separate operations;
//! the API service composes them.

pub mod config;
pub mod error;
pub mod gate;
pub mod ledger;

pub use config::TrialPolicy;
pub use error::TrialError;
pub use gate::{GateDecision, SessionGate};
pub use ledger::UsageLedger;
