//! # unveil-auth-core
//!
//! Account and token logic shared by the API service.
//!
//! - [`crypto`]: HMAC-SHA256 key handling and constant-time comparison.
//! - [`token`]: signed bearer tokens carrying user id and expiry.
//! - [`password`]: Argon2 password hashing and verification.
//! - [`service`]: the [`AuthService`] facade over a [`UserStore`](unveil_store::UserStore).

pub mod config;
pub mod crypto;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, NewAccount};
pub use token::{TokenClaims, TokenSigner};
