//! Route table for the pizzeria API

use crate::orders::handlers::{
    OrderAppState, create_order, delete_order, list_orders, show_order, update_order,
};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Build the order routes
///
/// - GET /pizza_orders - List orders
/// - POST /pizza_orders - Create an order
/// - GET /pizza_orders/{id} - Show an order
/// - PATCH|PUT /pizza_orders/{id} - Update an order
/// - DELETE /pizza_orders/{id} - Delete an order
pub fn build_order_routes(state: OrderAppState) -> Router {
    Router::new()
        .route("/pizza_orders", get(list_orders).post(create_order))
        .route(
            "/pizza_orders/{id}",
            get(show_order)
                .patch(update_order)
                .put(update_order)
                .delete(delete_order),
        )
        .with_state(state)
}

/// Liveness route: GET /up
pub fn health_routes() -> Router {
    Router::new().route("/up", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
