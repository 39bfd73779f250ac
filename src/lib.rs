//! # Pizzeria
//!
//! A small JSON API for taking pizza orders, with a background cooking job
//! per accepted order.
//!
//! ## Features
//!
//! - **Order CRUD**: `/pizza_orders` list, show, create, update, delete
//! - **Closed Menus**: pizza types and sizes are enums; anything else is rejected at assignment
//! - **Two-Tier Failures**: blank fields collect validation messages, bad enum values fail hard
//! - **Order Intake**: normalizes, validates, persists and enqueues cooking in one call
//! - **Cooking Jobs**: tokio worker running one best-effort job per created order
//! - **Pluggable Storage**: in-memory by default, PostgreSQL behind the `postgres` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pizzeria::prelude::*;
//!
//! let store: Arc<dyn OrderStore> = Arc::new(InMemoryOrderStore::new());
//! let (queue, _worker) = TokioJobQueue::start(CookingJobRunner::new(store.clone()));
//!
//! ServerBuilder::new()
//!     .with_shared_store(store)
//!     .with_job_queue(queue)
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod jobs;
pub mod orders;
pub mod seed;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        draft::OrderDraft,
        error::{ApiError, AttributeError},
        order::{NewOrder, OrderId, PizzaOrder, PizzaSize, PizzaType},
        service::OrderStore,
        validation::{FieldErrors, OrderParams},
    };

    // === Orders ===
    pub use crate::orders::{IntakeOutcome, OrderAppState, OrderIntake};

    // === Jobs ===
    pub use crate::jobs::{CookingJob, CookingJobRunner, JobQueue, RecordingJobQueue, TokioJobQueue};

    // === Storage ===
    pub use crate::storage::InMemoryOrderStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresOrderStore;

    // === Config ===
    pub use crate::config::{AppConfig, Environment};

    // === Seed ===
    pub use crate::seed::{SeedReport, seed_orders};

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
