//! Signer configuration

use std::time::Duration;

/// Settings for token issuance.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for token signing (at least 32 bytes)
    pub token_secret: String,
    /// How long issued tokens stay valid
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Default token lifetime: one hour.
    pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

    pub fn new(token_secret: impl Into<String>) -> Self {
        Self {
            token_secret: token_secret.into(),
            token_ttl: Self::DEFAULT_TOKEN_TTL,
        }
    }

    /// Set token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}
