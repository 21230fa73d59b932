//! Terminal client for the unveil timer API.
//!
//! Drives the whole flow from a shell: account signup and login, usage
//! inspection, and the countdown itself, rendered as a progress line that
//! uncovers the obscuring image tick by tick.
//!
//! The bearer token comes from `--token` or the `UNVEIL_TOKEN` environment
//! variable; `register` and `login` print an export line to paste.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use unveil_client::{ApiClient, ClientConfig};

#[derive(Parser, Debug)]
#[command(name = "unveil")]
#[command(version, about = "Trial-gated visual countdown timer", long_about = None)]
struct Cli {
    /// Timer API base URL
    #[arg(long, default_value = "http://localhost:8080")]
    server: String,

    /// Random-image service base URL
    #[arg(long, default_value = unveil_client::config::DEFAULT_IMAGE_BASE_URL)]
    image_server: String,

    /// Bearer token (falls back to $UNVEIL_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an account and print its bearer token
    Register {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Email address
        #[arg(long)]
        email: String,
    },
    /// Log in and print a fresh bearer token
    Login {
        /// Email address
        #[arg(long)]
        email: String,
    },
    /// Show the signed-in profile and usage counters
    Profile,
    /// Update profile fields
    UpdateProfile {
        /// New first name
        #[arg(long)]
        first_name: Option<String>,

        /// New last name
        #[arg(long)]
        last_name: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete the signed-in account
    DeleteAccount {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show the usage counters
    Status,
    /// Start a countdown session
    Run {
        /// Duration in seconds
        duration: u32,

        /// Silence the expiry alarm
        #[arg(long)]
        no_sound: bool,
    },
}

/// Environment variable consulted when `--token` is absent.
const TOKEN_ENV: &str = "UNVEIL_TOKEN";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config =
        ClientConfig::new(cli.server.as_str()).with_image_base_url(cli.image_server.as_str());
    let mut api = ApiClient::new(config.clone())?;
    if let Some(token) = cli.token.or_else(|| std::env::var(TOKEN_ENV).ok()) {
        api.set_token(token);
    }

    match cli.command {
        Commands::Register {
            first_name,
            last_name,
            email,
        } => commands::account::register(&mut api, &first_name, &last_name, &email).await,
        Commands::Login { email } => commands::account::login(&mut api, &email).await,
        Commands::Profile => commands::account::profile(&api).await,
        Commands::UpdateProfile {
            first_name,
            last_name,
            email,
        } => commands::account::update_profile(&api, first_name, last_name, email).await,
        Commands::DeleteAccount { yes } => commands::account::delete(&mut api, yes).await,
        Commands::Status => commands::account::status(&api).await,
        Commands::Run { duration, no_sound } => {
            commands::run::run(&api, &config, duration, no_sound).await
        }
    }
}
