//! ServerBuilder for fluent API to build the HTTP server

use super::router::{build_order_routes, health_routes};
use crate::core::service::OrderStore;
use crate::jobs::JobQueue;
use crate::orders::{OrderAppState, OrderIntake};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the pizzeria router
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryOrderStore::new())
///     .with_job_queue(queue)
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn OrderStore>>,
    jobs: Option<Arc<dyn JobQueue>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            jobs: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the order store (required)
    pub fn with_store(self, store: impl OrderStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Set an order store that is also used elsewhere (seeding, jobs)
    pub fn with_shared_store(mut self, store: Arc<dyn OrderStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the job queue cooking jobs go to (required)
    pub fn with_job_queue(self, jobs: impl JobQueue + 'static) -> Self {
        self.with_shared_job_queue(Arc::new(jobs))
    }

    pub fn with_shared_job_queue(mut self, jobs: Arc<dyn JobQueue>) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Add routes next to the order API
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Assemble the handler state without building a router
    pub fn build_state(&self) -> Result<OrderAppState> {
        let store = self
            .store
            .clone()
            .ok_or_else(|| anyhow::anyhow!("OrderStore is required. Call .with_store()"))?;
        let jobs = self
            .jobs
            .clone()
            .ok_or_else(|| anyhow::anyhow!("JobQueue is required. Call .with_job_queue()"))?;

        Ok(OrderAppState {
            intake: Arc::new(OrderIntake::new(store.clone(), jobs)),
            store,
        })
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        let state = self.build_state()?;

        let mut app = health_routes().merge(build_order_routes(state));
        for routes in self.custom_routes {
            app = app.merge(routes);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Stops accepting connections on SIGTERM or Ctrl+C and returns once
    /// in-flight requests are done.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
