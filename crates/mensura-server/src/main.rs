//! mensura-server - HTTP service for server-side formula validation.
//!
//! Loads the predefined-constants configuration, builds the shared
//! validator, and serves the REST API.

use clap::Parser;
use mensura_server::config;
use mensura_server::state::AppState;
use mensura_validate::{default_constants, Validator};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "mensura-server")]
#[command(about = "Formula validation service")]
struct Cli {
    /// TCP address to bind the HTTP server
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// Path to a predefined-constants JSON file (array of {id, name, value})
    #[arg(long)]
    constants: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mensura_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let constants = match &cli.constants {
        Some(path) => match config::load_constants(path) {
            Ok(constants) => {
                info!(
                    "Loaded {} predefined constants from {}",
                    constants.len(),
                    path.display()
                );
                constants
            }
            Err(err) => {
                error!("Failed to load constants from {}: {}", path.display(), err);
                std::process::exit(1);
            }
        },
        None => {
            info!("No constants file given, using built-in defaults");
            default_constants()
        }
    };

    let state = AppState::new(Validator::new(constants));
    let app = mensura_server::router(state);

    info!("Listening on {}", cli.bind);

    let listener = match TcpListener::bind(cli.bind).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind {}: {}", cli.bind, err);
            std::process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {}", err);
        std::process::exit(1);
    }
}
