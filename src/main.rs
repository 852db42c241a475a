use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pairly_bff::{app, config, state::AppState};

#[derive(Parser)]
#[command(name = "pairly-bff")]
#[command(about = "Backend-for-frontend for the Pairly dating app")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides PAIRLY_BFF_PORT / PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Load environment variables from this file instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Environment must be loaded before the config singleton is touched
    match &args.env_file {
        Some(path) => {
            dotenvy::from_path(path).with_context(|| format!("failed to load {}", path.display()))?;
        }
        None => {
            let _ = dotenvy::dotenv();
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = config::config().clone();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate().map_err(anyhow::Error::msg)?;

    tracing::info!(
        environment = ?config.environment,
        upstream = %config.upstream.base_url,
        "Starting Pairly BFF"
    );

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::new(config)?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("Pairly BFF listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
