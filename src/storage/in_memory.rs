//! In-memory implementation of OrderStore for testing and development

use crate::core::order::{NewOrder, OrderId, PizzaOrder};
use crate::core::service::OrderStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

#[derive(Default)]
struct Table {
    last_id: OrderId,
    rows: BTreeMap<OrderId, PizzaOrder>,
}

impl Table {
    fn insert(&mut self, order: NewOrder) -> PizzaOrder {
        self.last_id += 1;
        let record = PizzaOrder::from_new(self.last_id, order, Utc::now());
        self.rows.insert(record.id, record.clone());
        record
    }
}

/// In-memory order store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Ids keep increasing after deletes, like a database sequence.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryOrderStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<PizzaOrder> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(table.insert(order))
    }

    async fn find(&self, id: OrderId) -> Result<Option<PizzaOrder>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<PizzaOrder>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table.rows.values().cloned().collect())
    }

    async fn update(&self, id: OrderId, order: NewOrder) -> Result<Option<PizzaOrder>> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(table.rows.get_mut(&id).map(|record| {
            record.apply(order);
            record.clone()
        }))
    }

    async fn delete(&self, id: OrderId) -> Result<bool> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(table.rows.remove(&id).is_some())
    }

    async fn count(&self) -> Result<usize> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table.rows.len())
    }

    async fn find_or_create(&self, order: NewOrder) -> Result<(PizzaOrder, bool)> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if let Some(existing) = table.rows.values().find(|record| record.matches(&order)) {
            return Ok((existing.clone(), false));
        }

        Ok((table.insert(order), true))
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let removed = table.rows.len() as u64;
        table.rows.clear();

        Ok(removed)
    }
}
