//! The cooking job: look an order up, wait, log that it is done
//!
//! Nothing is persisted about the job itself. Progress only shows up in the
//! logs, and the order record never changes because of it.

use crate::core::order::OrderId;
use crate::core::service::OrderStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Queue every cooking job is placed on
pub const QUEUE_NAME: &str = "default";

/// Simulated cooking time
pub const DEFAULT_COOKING_TIME: Duration = Duration::from_secs(5);

/// A unit of work asking for one order to be cooked
///
/// `order_id` keeps the shape it was enqueued with: a number or its textual
/// form both resolve to the same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookingJob {
    pub job_id: Uuid,
    pub queue: String,
    pub order_id: Value,
    pub enqueued_at: DateTime<Utc>,
}

impl CookingJob {
    pub fn new(order_id: impl Into<Value>) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            queue: QUEUE_NAME.to_string(),
            order_id: order_id.into(),
            enqueued_at: Utc::now(),
        }
    }

    /// Job for a freshly persisted order
    pub fn for_order(id: OrderId) -> Self {
        Self::new(id)
    }
}

/// Failure the job hands back to whoever runs it
#[derive(Debug, Error)]
pub enum JobError {
    #[error("missing order id")]
    MissingOrderId,

    #[error("unsupported order id {0}")]
    UnsupportedOrderId(Value),

    #[error("{0}")]
    Store(#[from] anyhow::Error),
}

/// How an order id argument resolves before any lookup
enum Resolved {
    Id(OrderId),
    /// Text that cannot name any order
    Miss,
}

fn resolve(order_id: &Value) -> Result<Resolved, JobError> {
    match order_id {
        Value::Number(n) => Ok(n.as_i64().map_or(Resolved::Miss, Resolved::Id)),
        Value::String(s) => Ok(s.trim().parse().map_or(Resolved::Miss, Resolved::Id)),
        Value::Null => Err(JobError::MissingOrderId),
        other => Err(JobError::UnsupportedOrderId(other.clone())),
    }
}

/// Printable form of the id argument, empty when it is missing
fn display_id(order_id: &Value) -> String {
    match order_id {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Executes cooking jobs against a store
#[derive(Clone)]
pub struct CookingJobRunner {
    store: Arc<dyn OrderStore>,
    cooking_time: Duration,
}

impl CookingJobRunner {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self {
            store,
            cooking_time: DEFAULT_COOKING_TIME,
        }
    }

    pub fn with_cooking_time(mut self, cooking_time: Duration) -> Self {
        self.cooking_time = cooking_time;
        self
    }

    pub fn cooking_time(&self) -> Duration {
        self.cooking_time
    }

    /// Run one job
    pub async fn run(&self, job: &CookingJob) -> Result<(), JobError> {
        tracing::debug!(job_id = %job.job_id, queue = %job.queue, "Performing cooking job");
        self.perform(&job.order_id).await
    }

    /// Cook the order named by `order_id`
    ///
    /// A missing order is logged and treated as done. Any other failure is
    /// logged and returned.
    pub async fn perform(&self, order_id: &Value) -> Result<(), JobError> {
        let shown = display_id(order_id);

        match self.cook(order_id).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::error!("Order not found with ID: {}", shown);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error processing order {}: {}", shown, e);
                Err(e)
            }
        }
    }

    /// Returns whether the order existed
    async fn cook(&self, order_id: &Value) -> Result<bool, JobError> {
        let id = match resolve(order_id)? {
            Resolved::Id(id) => id,
            Resolved::Miss => return Ok(false),
        };

        let Some(order) = self.store.find(id).await? else {
            return Ok(false);
        };

        tracing::info!("Processing order {} for {}", order.id, order.customer_name);
        tokio::time::sleep(self.cooking_time).await;
        tracing::info!("Order {} completed", order.id);

        Ok(true)
    }
}
