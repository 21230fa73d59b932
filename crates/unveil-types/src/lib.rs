//! Unveil Types - Shared domain types
//!
//! This crate contains types used across the unveil service and its clients:
//! - User identity
//! - Usage snapshots (the trial-gating state that crosses the wire)
//! - Request/response wire types

pub mod api;
pub mod email;
pub mod usage;
pub mod user;

pub use api::*;
pub use email::is_valid_email;
pub use usage::*;
pub use user::*;
