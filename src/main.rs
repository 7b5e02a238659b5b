use std::net::SocketAddr;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use icsift_server::config::ServerConfig;
use icsift_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = ServerConfig::load()?;
    let addr = SocketAddr::new(config.host.parse()?, config.port);

    let state = AppState::new(config)?;
    let app = icsift_server::app(state);

    tracing::info!("icsift-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
