//! Configuration for the Timer API service.

use std::time::Duration;

use unveil_auth_core::crypto::HmacKey;
use unveil_trial::TrialPolicy;

/// Timer API configuration
#[derive(Clone)]
pub struct Config {
    /// Port the HTTP listener binds
    pub http_port: u16,
    /// Database URL; absent means the in-memory store
    pub database_url: Option<String>,
    /// Token signing secret
    pub token_secret: String,
    /// Token validity window
    pub token_ttl: Duration,
    /// Trial policy (limit and restricted-mode cap)
    pub trial: TrialPolicy,
    /// Per-request deadline
    pub request_timeout: Duration,
    /// Expose the Prometheus endpoint
    pub metrics_enabled: bool,
}

impl Config {
    /// Read the full configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Token secret; length is also enforced by the signer, but failing
        // here names the variable instead of the key
        let token_secret =
            std::env::var("TOKEN_SECRET").map_err(|_| ConfigError::Missing("TOKEN_SECRET"))?;
        if token_secret.len() < HmacKey::MIN_KEY_LENGTH {
            return Err(ConfigError::Invalid("TOKEN_SECRET"));
        }

        // Database is optional: without it the service runs on the
        // in-memory store and loses everything on restart
        let database_url = std::env::var("DATABASE_URL").ok();

        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        let token_ttl_secs: u64 = std::env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("TOKEN_TTL_SECS"))?;

        let trial_limit: i64 = std::env::var("TRIAL_LIMIT")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("TRIAL_LIMIT"))?;
        if trial_limit < 0 {
            return Err(ConfigError::Invalid("TRIAL_LIMIT"));
        }

        let restricted_max_secs: i64 = std::env::var("RESTRICTED_MAX_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("RESTRICTED_MAX_SECS"))?;
        if restricted_max_secs <= 0 {
            return Err(ConfigError::Invalid("RESTRICTED_MAX_SECS"));
        }

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        let metrics_enabled = std::env::var("METRICS_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        Ok(Self {
            http_port,
            database_url,
            token_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            trial: TrialPolicy::new(trial_limit, restricted_max_secs),
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
        })
    }
}

// Keeps the signing secret out of logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("http_port", &self.http_port)
            .field("database_url_set", &self.database_url.is_some())
            .field("token_ttl", &self.token_ttl)
            .field("trial", &self.trial)
            .field("request_timeout", &self.request_timeout)
            .field("metrics_enabled", &self.metrics_enabled)
            .finish_non_exhaustive()
    }
}

/// Environment loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
