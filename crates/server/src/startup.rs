use std::{future::Future, net::SocketAddr};

use configs::AppConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::{build_router, ServerState};

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Connect, migrate, and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("database schema up to date");

    let addr = bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    serve(listener, ServerState { db }, shutdown_signal()).await
}

/// Serve the application on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: ServerState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, draining connections");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "0.0.0.0".into();
        cfg.server.port = 9090;
        assert_eq!(bind_addr(&cfg).unwrap().to_string(), "0.0.0.0:9090");
        cfg.server.host = "not a host".into();
        assert!(bind_addr(&cfg).is_err());
    }
}
