//! HTTP handlers, grouped by resource

pub mod accounts;
pub mod health;
pub mod sessions;
pub mod shared;
pub mod usage;

pub use accounts::*;
pub use health::*;
pub use sessions::*;
pub use usage::*;
