use std::sync::Arc;

use anyhow::Context;
use catalog_api::{
    config::Config,
    db::{
        create_pool, create_redis_client, run_migrations, Cache, CatalogStore, MemoryCatalogStore,
        PgCatalogStore,
    },
    routes::{create_router, AppState},
    services::{seed_if_empty, CatalogService},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalog_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Acquire the store; the pool is kept so it can be closed on shutdown
    let pool = if config.uses_memory_store() {
        tracing::warn!("Using in-memory store; data is lost on exit");
        None
    } else {
        let pool = create_pool(&config.database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        run_migrations(&pool)
            .await
            .context("Failed to apply migrations")?;
        Some(pool)
    };

    let store: Arc<dyn CatalogStore> = match &pool {
        Some(pool) => Arc::new(PgCatalogStore::new(pool.clone())),
        None => Arc::new(MemoryCatalogStore::new()),
    };
    tracing::info!(store = store.name(), "Catalog store ready");

    if config.seed_on_startup {
        let report = seed_if_empty(store.as_ref())
            .await
            .context("Failed to seed catalog")?;
        tracing::info!(
            content_inserted = report.content_inserted,
            watch_history_inserted = report.watch_history_inserted,
            "Seeding finished"
        );
    }

    let (cache, cache_writer) = match &config.redis_url {
        Some(url) => {
            let (cache, handle) = Cache::new(create_redis_client(url)?);
            tracing::info!("Content cache enabled");
            (Some(cache), Some(handle))
        }
        None => (None, None),
    };

    let state = AppState::new(CatalogService::new(store, cache));
    let app = create_router(state, &config.api_base_path);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    tracing::info!(
        address = %listener.local_addr()?,
        base_path = %config.api_base_path,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release resources in reverse order of acquisition
    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }
    if let Some(pool) = pool {
        pool.close().await;
    }
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
