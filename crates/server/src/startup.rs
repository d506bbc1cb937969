use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use models::RecordKind;
use service::{runtime, RegistryContract};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Open the configured store, optionally seed it, and wire the contract into a router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let kind: RecordKind = cfg
        .registry
        .kind
        .parse()
        .map_err(|e: models::errors::ModelError| StartupError::InvalidConfig(e.to_string()))?;
    let contract = RegistryContract::new(kind);
    let store = runtime::open_state_store(&cfg.registry).await?;

    if cfg.registry.seed_on_start {
        contract.initialize_ledger(store.as_ref()).await?;
        info!(%kind, "ledger seeded at startup");
    }

    let state = AppState::new(contract, Arc::clone(&store));
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP host
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, kind = %cfg.registry.kind, store = ?cfg.registry.store, "starting registry host");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
