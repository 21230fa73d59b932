//! # unveil-store
//!
//! Persistence layer for user accounts and usage counters.
//!
//! The [`UserStore`] trait is the seam the rest of the workspace programs
//! against. Two backends implement it:
//!
//! - [`MemoryUserStore`]: a `DashMap`-backed store for tests and for running
//!   the API without a database.
//! - [`PgUserStore`]: the Postgres backend used in deployments.

pub mod error;
pub mod memory;
pub mod model;
pub mod pg;
pub mod pool;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryUserStore;
pub use model::{CreateUser, ProfileUpdate, UserRecord};
pub use pg::PgUserStore;
pub use pool::{create_pool, DbPool};
pub use store::UserStore;
