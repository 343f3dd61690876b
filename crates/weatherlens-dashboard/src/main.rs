//! Dashboard server binary.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use weatherlens_core::Config;
use weatherlens_dashboard::{server, DashboardState};
use weatherlens_store::MongoStore;

#[tokio::main]
async fn main() -> Result<()> {
    weatherlens_core::init()?;

    let (config, _) = Config::load_validated().context("Failed to load configuration")?;

    let addr: SocketAddr = config
        .dashboard
        .bind
        .parse()
        .with_context(|| format!("Invalid dashboard bind address: {}", config.dashboard.bind))?;

    let store = MongoStore::connect(&config.store)
        .await
        .context("Failed to connect to MongoDB")?;

    let state = DashboardState::new(store, &config.store);

    tracing::info!(%addr, "Weather dashboard listening");
    server::serve(state, addr).await;

    Ok(())
}
