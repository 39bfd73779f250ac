//! Store trait for pizza orders

use crate::core::order::{NewOrder, OrderId, PizzaOrder};
use anyhow::Result;
use async_trait::async_trait;

/// Storage contract for pizza orders
///
/// Implementations assign ids and timestamps. The service layer is agnostic
/// to the underlying storage mechanism; every call is atomic on its own and
/// nothing coordinates across calls.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a validated order, assigning its id and timestamps
    async fn insert(&self, order: NewOrder) -> Result<PizzaOrder>;

    /// Get an order by id
    async fn find(&self, id: OrderId) -> Result<Option<PizzaOrder>>;

    /// List all orders by ascending id
    async fn list(&self) -> Result<Vec<PizzaOrder>>;

    /// Replace the business fields of an order and refresh `updated_at`
    ///
    /// Returns `None` when no order has this id.
    async fn update(&self, id: OrderId, order: NewOrder) -> Result<Option<PizzaOrder>>;

    /// Delete an order, returning whether it existed
    async fn delete(&self, id: OrderId) -> Result<bool>;

    /// Number of stored orders
    async fn count(&self) -> Result<usize>;

    /// Return the first order with exactly these business fields, inserting
    /// one if none exists. The flag tells whether a row was inserted.
    async fn find_or_create(&self, order: NewOrder) -> Result<(PizzaOrder, bool)>;

    /// Delete every order, returning how many were removed
    async fn delete_all(&self) -> Result<u64>;
}
