//! Guildboard - Application Entry Point

use std::{net::SocketAddr, sync::Arc};

use axum::middleware;
use redis::Client as RedisClient;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use guildboard::{
    config::{CONFIG, LogFormat},
    create_router, db,
    middleware::rate_limit_middleware,
    state::AppState,
    storage::LocalBlobStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting Guildboard server...");

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;
    db::test_connection(&db_pool).await?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    tracing::info!("Connecting to Redis...");
    let redis_client = RedisClient::open(CONFIG.redis.url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;

    tokio::fs::create_dir_all(&CONFIG.storage.uploads_path).await?;
    tracing::info!(path = %CONFIG.storage.uploads_path.display(), "Blob store ready");
    let blobs = Arc::new(LocalBlobStore::new(CONFIG.storage.uploads_path.clone()));

    let state = AppState::new(db_pool, redis_conn, blobs, CONFIG.clone());

    let app = create_router(state.clone())
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware));

    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(CONFIG.server.rust_log.clone()));
    let registry = tracing_subscriber::registry().with(filter);

    match CONFIG.server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
