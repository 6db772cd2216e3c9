use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use models::db::ConnectionManager;
use service::section::{JsonFileSectionBackend, SeaOrmSectionBackend, SectionBackend, SectionRepository};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{errors::StartupError, routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Pick the configured section backend.
///
/// The database backend never connects here; the first request does.
pub async fn build_backend(cfg: &AppConfig) -> Result<Arc<dyn SectionBackend>, StartupError> {
    match cfg.storage.backend {
        StorageBackend::Database => {
            let manager = Arc::new(ConnectionManager::new(cfg.database.clone()));
            info!(db = %manager.target(), "using database section store");
            Ok(Arc::new(SeaOrmSectionBackend::new(manager)))
        }
        StorageBackend::File => {
            let backend = JsonFileSectionBackend::open(&cfg.storage.file_path).await?;
            info!(path = %backend.path().display(), "using JSON file section store");
            Ok(Arc::new(backend))
        }
    }
}

/// Repository and state shared by all handlers.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let backend = build_backend(cfg).await?;
    let sections = Arc::new(SectionRepository::new(backend, cfg.cache.ttl()));
    if cfg.admin.api_key.is_none() {
        warn!("no admin key configured; section writes are open");
    }
    Ok(ServerState::new(sections, cfg.admin.api_key.clone()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and serve until ctrl-c.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let data_dir = match cfg.storage.backend {
        StorageBackend::File => cfg.storage.file_path.parent().filter(|p| !p.as_os_str().is_empty()),
        StorageBackend::Database => None,
    };
    common::env::ensure_env(&cfg.frontend.dir, data_dir).await?;

    let state = build_state(&cfg).await?;

    // Touch the store once in the background so schema setup and connection
    // errors show up in the log before the first visitor does.
    let warm = Arc::clone(&state.sections);
    tokio::spawn(async move {
        match warm.list().await {
            Ok(list) => info!(stored = list.len(), "section store ready"),
            Err(e) => warn!(error = %e, "section store not reachable yet; serving defaults until it is"),
        }
    });

    let app: Router = routes::build_router(state, build_cors(), &cfg.frontend.dir);

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;
    info!(%addr, ttl_ms = cfg.cache.ttl_ms, "starting portfolio server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
