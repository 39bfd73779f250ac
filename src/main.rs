//! Pizzeria API server
//!
//! Configuration comes from the YAML file named by `PIZZERIA_CONFIG` and
//! environment overrides (see `AppConfig::load`).

use anyhow::Result;
use pizzeria::config::AppConfig;
use pizzeria::core::service::OrderStore;
use pizzeria::jobs::{CookingJobRunner, TokioJobQueue};
use pizzeria::seed::seed_orders;
use pizzeria::server::ServerBuilder;
use pizzeria::storage::InMemoryOrderStore;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Longest wait for in-flight cooking jobs after the server stops
const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        environment = %config.environment,
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let store = build_store(&config).await?;

    if config.seed_on_start {
        seed_orders(store.as_ref(), config.environment).await?;
    }

    let runner = CookingJobRunner::new(store.clone()).with_cooking_time(config.cooking_time());
    let (queue, worker) = TokioJobQueue::start(runner);

    ServerBuilder::new()
        .with_shared_store(store)
        .with_job_queue(queue)
        .serve(&config.bind_address())
        .await?;

    // The builder owned the last queue handle, so the worker is draining now
    match tokio::time::timeout(WORKER_DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Cooking job worker failed: {}", e),
        Err(_) => tracing::warn!(
            "Cooking jobs still running after {:?}, exiting anyway",
            WORKER_DRAIN_TIMEOUT
        ),
    }

    Ok(())
}

#[cfg(feature = "postgres")]
async fn build_store(config: &AppConfig) -> Result<Arc<dyn OrderStore>> {
    use pizzeria::storage::PostgresOrderStore;

    match &config.database.url {
        Some(url) => {
            let store = PostgresOrderStore::connect(url, config.database.max_connections).await?;
            tracing::info!("Using PostgreSQL order store");
            Ok(Arc::new(store))
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory order store");
            Ok(Arc::new(InMemoryOrderStore::new()))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn build_store(config: &AppConfig) -> Result<Arc<dyn OrderStore>> {
    if config.database.url.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without the `postgres` feature");
    }
    tracing::info!("Using in-memory order store");
    Ok(Arc::new(InMemoryOrderStore::new()))
}
