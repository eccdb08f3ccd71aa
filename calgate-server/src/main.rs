use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use calgate_core::GatewayConfig;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use calgate_server::state::AppState;

#[derive(Parser)]
#[command(name = "calgate-server", version, about = "Calendar API gateway")]
struct Args {
    /// Config file (defaults to <config dir>/calgate/config.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the config file
    #[arg(long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calgate_server=info,calgate_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config =
        GatewayConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(listen) = args.listen {
        config.listen = listen;
    }

    for store in calgate_core::Store::ALL {
        tracing::info!(%store, url = config.stores.get(store), "store configured");
    }

    let state = AppState::new(&config)?;
    let app = calgate_server::app(state);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;
    tracing::info!(addr = %config.listen, "calgate-server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
