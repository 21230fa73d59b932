//! Application state for the Timer API service.

use std::sync::Arc;

use unveil_auth_core::AuthService;
use unveil_store::UserStore;
use unveil_trial::{SessionGate, UsageLedger};

use crate::config::Config;

/// Application state shared across all handlers.
///
/// Generic over the store so the same handlers serve the Postgres deployment
/// and the in-memory dev mode (which is also what the router tests run on).
pub struct AppState<S: UserStore> {
    /// Auth service (accounts, tokens, passwords)
    pub auth: Arc<AuthService<S>>,
    /// Usage ledger (timer-start counting, trial flag)
    pub ledger: Arc<UsageLedger<S>>,
    /// Session gate (pure decision over a snapshot)
    pub gate: SessionGate,
    /// Store handle for readiness checks
    pub store: Arc<S>,
    /// Configuration
    pub config: Arc<Config>,
}

impl<S: UserStore> AppState<S> {
    /// Create new application state
    pub fn new(
        auth: AuthService<S>,
        ledger: UsageLedger<S>,
        gate: SessionGate,
        store: Arc<S>,
        config: Config,
    ) -> Self {
        Self {
            auth: Arc::new(auth),
            ledger: Arc::new(ledger),
            gate,
            store,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

// Not derived: a derive would also demand S: Clone, and the store is only
// ever handed around behind Arc
impl<S: UserStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
            ledger: Arc::clone(&self.ledger),
            gate: self.gate,
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: UserStore> std::fmt::Debug for AppState<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
