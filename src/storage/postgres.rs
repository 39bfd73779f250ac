//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresOrderStore`, an [`OrderStore`] backed by a PostgreSQL
//! database via `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! pizzeria-rs = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! Orders live in a single `pizza_orders` table. Enumerations are stored as
//! their lowercase names and parsed back when rows are read, so a row holding
//! a value outside the closed set is reported as an error instead of being
//! silently accepted.

use crate::core::order::{NewOrder, OrderId, PizzaOrder};
use crate::core::service::OrderStore;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Apply the required table (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS pizza_orders (
            id BIGSERIAL PRIMARY KEY,
            customer_name VARCHAR NOT NULL,
            pizza_type VARCHAR NOT NULL,
            size VARCHAR NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create pizza_orders table: {}", e))?;

    Ok(())
}

const SELECT_COLUMNS: &str = "id, customer_name, pizza_type, size, created_at, updated_at";

/// Raw `pizza_orders` row
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_name: String,
    pizza_type: String,
    size: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for PizzaOrder {
    type Error = anyhow::Error;

    fn try_from(row: OrderRow) -> Result<Self> {
        Ok(PizzaOrder {
            id: row.id,
            pizza_type: row
                .pizza_type
                .parse()
                .with_context(|| format!("corrupt pizza_orders row {}", row.id))?,
            size: row
                .size
                .parse()
                .with_context(|| format!("corrupt pizza_orders row {}", row.id))?,
            customer_name: row.customer_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Order store backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// use pizzeria::storage::PostgresOrderStore;
///
/// let store = PostgresOrderStore::connect("postgres://localhost/pizzeria", 5).await?;
/// let order = store.insert(new_order).await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `url` and make sure the schema exists.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| anyhow!("Failed to connect to PostgreSQL: {}", e))?;

        ensure_schema(&pool).await?;
        tracing::info!("Connected to PostgreSQL order store");

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<PizzaOrder> {
        let now = Utc::now();
        let row: OrderRow = sqlx::query_as(&format!(
            "INSERT INTO pizza_orders (customer_name, pizza_type, size, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&order.customer_name)
        .bind(order.pizza_type.as_str())
        .bind(order.size.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to insert order: {}", e))?;

        row.try_into()
    }

    async fn find(&self, id: OrderId) -> Result<Option<PizzaOrder>> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM pizza_orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to get order: {}", e))?;

        row.map(PizzaOrder::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<PizzaOrder>> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM pizza_orders ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to list orders: {}", e))?;

        rows.into_iter().map(PizzaOrder::try_from).collect()
    }

    async fn update(&self, id: OrderId, order: NewOrder) -> Result<Option<PizzaOrder>> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "UPDATE pizza_orders
             SET customer_name = $2, pizza_type = $3, size = $4, updated_at = $5
             WHERE id = $1
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id)
        .bind(&order.customer_name)
        .bind(order.pizza_type.as_str())
        .bind(order.size.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to update order: {}", e))?;

        row.map(PizzaOrder::try_from).transpose()
    }

    async fn delete(&self, id: OrderId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM pizza_orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete order: {}", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pizza_orders")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to count orders: {}", e))?;

        Ok(count as usize)
    }

    async fn find_or_create(&self, order: NewOrder) -> Result<(PizzaOrder, bool)> {
        let existing: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM pizza_orders
             WHERE customer_name = $1 AND pizza_type = $2 AND size = $3
             ORDER BY id LIMIT 1"
        ))
        .bind(&order.customer_name)
        .bind(order.pizza_type.as_str())
        .bind(order.size.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to look up order: {}", e))?;

        match existing {
            Some(row) => Ok((row.try_into()?, false)),
            None => Ok((self.insert(order).await?, true)),
        }
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM pizza_orders")
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete orders: {}", e))?;

        Ok(result.rows_affected())
    }
}
