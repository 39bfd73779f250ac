//! Order intake: normalize, validate, persist, enqueue cooking
//!
//! Create goes through here rather than straight to the store. The intake
//! turns every failure into a list of messages so the HTTP layer never has to
//! look at error types on this path.

use crate::core::draft::OrderDraft;
use crate::core::order::PizzaOrder;
use crate::core::service::OrderStore;
use crate::jobs::{CookingJob, JobQueue};
use serde_json::{Map, Value};
use std::fmt::{Debug, Display};
use std::sync::Arc;

/// Attributes whose casing is normalized before assignment
const CASE_INSENSITIVE: &[&str] = &["pizza_type", "size"];

/// Result of one intake attempt
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeOutcome {
    /// Order persisted and its cooking job enqueued
    Accepted(PizzaOrder),

    /// Validation failed; `draft` is the unsaved order
    Rejected { draft: OrderDraft, errors: Vec<String> },

    /// Hard failure (bad enumeration, unknown attribute, store or queue error)
    Failed { errors: Vec<String> },
}

impl IntakeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, IntakeOutcome::Accepted(_))
    }

    /// Messages explaining a failure; empty on success
    pub fn errors(&self) -> &[String] {
        match self {
            IntakeOutcome::Accepted(_) => &[],
            IntakeOutcome::Rejected { errors, .. } | IntakeOutcome::Failed { errors } => errors,
        }
    }

    /// The persisted order, if any
    pub fn order(&self) -> Option<&PizzaOrder> {
        match self {
            IntakeOutcome::Accepted(order) => Some(order),
            _ => None,
        }
    }
}

/// Lowercase the enumerated attributes that are present
///
/// Non-string scalars are stringified first; `null` stays `null`. Every other
/// key is passed through untouched, unknown ones included.
pub fn normalize(params: &Map<String, Value>) -> Map<String, Value> {
    let mut normalized = params.clone();

    for key in CASE_INSENSITIVE {
        if let Some(value) = normalized.get_mut(*key) {
            *value = match &*value {
                Value::Null => Value::Null,
                Value::String(s) => Value::String(s.to_lowercase()),
                other => Value::String(other.to_string().to_lowercase()),
            };
        }
    }

    normalized
}

/// Creates orders and hands them to the kitchen
#[derive(Clone)]
pub struct OrderIntake {
    store: Arc<dyn OrderStore>,
    jobs: Arc<dyn JobQueue>,
}

impl OrderIntake {
    pub fn new(store: Arc<dyn OrderStore>, jobs: Arc<dyn JobQueue>) -> Self {
        Self { store, jobs }
    }

    /// Process one submission
    pub async fn process(&self, params: &Map<String, Value>) -> IntakeOutcome {
        let mut draft = OrderDraft::new();
        if let Err(e) = draft.assign_attributes(&normalize(params)) {
            return failed(e);
        }

        let new_order = match draft.validate() {
            Ok(new_order) => new_order,
            Err(errors) => {
                tracing::debug!(errors = ?errors.full_messages(), "Order rejected by validation");
                return IntakeOutcome::Rejected {
                    draft,
                    errors: errors.full_messages(),
                };
            }
        };

        let order = match self.store.insert(new_order).await {
            Ok(order) => order,
            Err(e) => return failed(e),
        };

        if let Err(e) = self.jobs.enqueue(CookingJob::for_order(order.id)).await {
            return failed(e);
        }

        tracing::info!(order_id = order.id, "Order accepted");
        IntakeOutcome::Accepted(order)
    }
}

fn failed<E: Display + Debug>(error: E) -> IntakeOutcome {
    tracing::error!("Error in order intake: {}", error);
    tracing::error!("{:?}", error);

    IntakeOutcome::Failed {
        errors: vec![format!("Internal server error: {}", error)],
    }
}
