//! Unveil Timer API
//!
//! HTTP service for accounts, trial gating, and the usage ledger.
//!
//! ## Routes
//!
//! - `POST /api/v1/accounts/register` - Create an account, issue a token
//! - `POST /api/v1/accounts/login` - Issue a token
//! - `GET /api/v1/accounts/profile` - Profile plus usage snapshot
//! - `PUT /api/v1/accounts/profile` - Partial profile update
//! - `DELETE /api/v1/accounts` - Delete the account
//! - `POST /api/v1/sessions/start` - Gate and record a timer start
//! - `GET /api/v1/usage/status` - Usage snapshot
//!
//! ## Probes
//!
//! - `GET /health` - Process liveness
//! - `GET /ready` - Store-backed readiness
//! - `GET /metrics` - Prometheus exposition, when enabled

mod config;
mod error;
mod extractors;
mod handlers;
mod router;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use unveil_auth_core::{AuthConfig, AuthService};
use unveil_store::{MemoryUserStore, PgUserStore, UserStore};
use unveil_trial::{SessionGate, UsageLedger};

use crate::config::Config;
use crate::router::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("timer_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Unveil Timer API");

    let config = Config::from_env()?;
    tracing::info!(http_port = config.http_port, "Configuration loaded");

    let metrics_handle = if config.metrics_enabled {
        Some(setup_metrics()?)
    } else {
        None
    };

    // Pick the store: Postgres when configured, in-memory otherwise
    match config.database_url.clone() {
        Some(database_url) => {
            let pool = unveil_store::create_pool(&database_url).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database pool created, migrations applied");
            serve(Arc::new(PgUserStore::new(pool)), config, metrics_handle).await
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set; running on the in-memory store, \
                 accounts will not survive a restart"
            );
            serve(Arc::new(MemoryUserStore::new()), config, metrics_handle).await
        }
    }
}

/// Assemble the service over the chosen store and run it to shutdown.
async fn serve<S>(
    store: Arc<S>,
    config: Config,
    metrics_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()>
where
    S: UserStore + 'static,
{
    let auth_config =
        AuthConfig::new(config.token_secret.clone()).with_token_ttl(config.token_ttl);
    let auth = AuthService::new(&auth_config, Arc::clone(&store))?;
    let ledger = UsageLedger::new(Arc::clone(&store), config.trial);
    let gate = SessionGate::new(config.trial);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = AppState::new(auth, ledger, gate, store, config);
    let app = build_router(state, metrics_handle);

    tracing::info!(%addr, "timer-api listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    // Gate check plus a single-statement ledger update; normal requests sit
    // well under 100ms
    let latency_buckets = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.2, 0.5, 1.0, 2.5];

    let builder = PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full("timer_operation_duration_seconds".to_string()),
        latency_buckets,
    )?;

    let handle = builder.install_recorder()?;

    metrics::describe_counter!(
        "timer_accounts_registered_total",
        "Total accounts registered"
    );
    metrics::describe_counter!(
        "timer_sessions_authorized_total",
        "Total session starts approved by the gate"
    );
    metrics::describe_counter!(
        "timer_sessions_denied_total",
        "Total session starts denied by the gate"
    );
    metrics::describe_histogram!(
        "timer_operation_duration_seconds",
        "Operation latency in seconds by operation and result"
    );

    Ok(handle)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests");
}
