use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::auth::{repo::seaorm::SeaOrmUserStore, token::JwtTokenIssuer};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router with the default CORS policy; used by `run` and by tests.
pub fn app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}

/// Public entry: connect storage, build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Runtime(format!("migrations failed: {e}")))?;

    let store = Arc::new(SeaOrmUserStore::new(db));
    let issuer = JwtTokenIssuer::new(&cfg.auth.token_secret, cfg.auth.token_ttl_hours)
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let issuer = Arc::new(issuer);
    let state = ServerState::new(store, issuer);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting account server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| StartupError::Runtime(format!("cannot bind {addr}: {e}")))?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_bad_host() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn bind_addr_uses_host_and_port() {
        let cfg = AppConfig::default();
        assert_eq!(bind_addr(&cfg).unwrap(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
    }
}
