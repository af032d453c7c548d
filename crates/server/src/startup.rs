use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::sequence::{repo::seaorm::SeaOrmSequenceStorage, SequenceStore};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `CONFIG_PATH`); without one, fall back to
/// `SERVER_HOST`/`SERVER_PORT`/`DATABASE_URL`.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let mut cfg = match configs::load_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config file not loaded; using environment");
            AppConfig { server: server_config_from_env(), ..Default::default() }
        }
    };
    cfg.normalize_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

fn server_config_from_env() -> ServerConfig {
    let mut s = ServerConfig::default();
    if let Ok(host) = env::var("SERVER_HOST") {
        s.host = host;
    }
    if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        s.port = port;
    }
    s
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Connect, verify the database answers, and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::ping(&db)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    let storage = Arc::new(SeaOrmSequenceStorage::new(db));
    let store = Arc::new(SequenceStore::new(storage));
    Ok(routes::build_router(AppState::new(store), build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = load_config()?;
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting hit counter server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
