//! HTTP handlers for pizza orders

use super::intake::{IntakeOutcome, OrderIntake};
use crate::core::draft::OrderDraft;
use crate::core::error::ApiError;
use crate::core::order::{OrderId, PizzaOrder};
use crate::core::service::OrderStore;
use crate::core::validation::OrderParams;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Shared state for the order routes
#[derive(Clone)]
pub struct OrderAppState {
    pub store: Arc<dyn OrderStore>,
    pub intake: Arc<OrderIntake>,
}

/// Ids that are not integers can't name an order
fn parse_order_id(raw: &str) -> Result<OrderId, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::not_found(raw))
}

async fn load_order(state: &OrderAppState, raw_id: &str) -> Result<PizzaOrder, ApiError> {
    let id = parse_order_id(raw_id)?;
    state
        .store
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found(id))
}

/// GET /pizza_orders
pub async fn list_orders(
    State(state): State<OrderAppState>,
) -> Result<Json<Vec<PizzaOrder>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// GET /pizza_orders/{id}
pub async fn show_order(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> Result<Json<PizzaOrder>, ApiError> {
    load_order(&state, &id).await.map(Json)
}

/// POST /pizza_orders
///
/// Returns: 201 `{"status":"success"}` or 422 `{"status":"failed","errors":[...]}`
pub async fn create_order(
    State(state): State<OrderAppState>,
    OrderParams(params): OrderParams,
) -> Response {
    match state.intake.process(&params).await {
        IntakeOutcome::Accepted(_) => {
            (StatusCode::CREATED, Json(json!({ "status": "success" }))).into_response()
        }
        outcome => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "status": "failed", "errors": outcome.errors() })),
        )
            .into_response(),
    }
}

/// PATCH|PUT /pizza_orders/{id}
///
/// The order is looked up before the body is read, so an unknown id is a 404
/// whatever the body. Invalid values for an enumerated field are not turned
/// into a 422 here; they propagate as an unhandled error.
pub async fn update_order(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
    params: Result<OrderParams, Response>,
) -> Response {
    let order = match load_order(&state, &id).await {
        Ok(order) => order,
        Err(e) => return e.into_response(),
    };
    let OrderParams(params) = match params {
        Ok(params) => params,
        Err(rejection) => return rejection,
    };

    match apply_update(&state, order, &params).await {
        Ok(updated) => Json(updated).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn apply_update(
    state: &OrderAppState,
    order: PizzaOrder,
    params: &Map<String, Value>,
) -> Result<PizzaOrder, ApiError> {
    let mut draft = OrderDraft::from_order(&order);
    draft.assign_attributes(params)?;
    let changes = draft.validate().map_err(ApiError::Validation)?;

    // Nothing changed, nothing written
    if order.matches(&changes) {
        return Ok(order);
    }

    let updated = state
        .store
        .update(order.id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(order.id))?;

    tracing::info!(order_id = updated.id, "Order updated");
    Ok(updated)
}

/// DELETE /pizza_orders/{id}
pub async fn delete_order(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let order = load_order(&state, &id).await?;

    if !state.store.delete(order.id).await? {
        return Err(ApiError::not_found(order.id));
    }

    tracing::info!(order_id = order.id, "Order deleted");
    Ok(StatusCode::NO_CONTENT)
}
