use std::sync::Arc;

use tracing::{error, info};

use shipkit_app::config::AppConfig;
use shipkit_app::infra::connection::LazyDatabase;
use shipkit_app::router::build_router;
use shipkit_app::state::AppState;
use shipkit_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing("info,sqlx=warn");

    let config = AppConfig::from_env();

    // Nothing connects here; the first request that needs the store does.
    let db = Arc::new(LazyDatabase::from_env(config.pool.clone()));
    let state = AppState::new(Arc::clone(&db));

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.app_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("app listening on {http_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    if let Ok(mut db) = Arc::try_unwrap(db) {
        if let Err(e) = db.close().await {
            error!(error = %e, "failed to close database connection");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
