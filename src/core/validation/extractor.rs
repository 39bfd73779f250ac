//! Axum extractor for whitelisted order parameters
//!
//! `OrderParams` pulls the `pizza_order` container out of a JSON body and
//! keeps only the permitted scalar fields, so nothing else a client submits
//! can reach an order.

use crate::core::error::ApiError;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

/// Top-level key holding the order fields
pub const CONTAINER: &str = "pizza_order";

/// Fields clients may set
pub const PERMITTED_FIELDS: &[&str] = &["customer_name", "pizza_type", "size"];

/// Whitelisted order fields taken from the request body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_order(
///     State(state): State<OrderAppState>,
///     OrderParams(params): OrderParams,
/// ) -> Response {
///     // params holds at most customer_name, pizza_type and size
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrderParams(pub Map<String, Value>);

/// Extract and filter the `pizza_order` container
///
/// Returns `None` when the container is missing, not an object, or empty.
/// Permitted keys holding arrays or objects are dropped like unknown keys.
pub fn permit(body: &Value) -> Option<Map<String, Value>> {
    let container = body.get(CONTAINER)?.as_object()?;
    if container.is_empty() {
        return None;
    }

    Some(
        container
            .iter()
            .filter(|(key, value)| {
                PERMITTED_FIELDS.contains(&key.as_str()) && !(value.is_array() || value.is_object())
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    )
}

impl<S> FromRequest<S> for OrderParams
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        // An empty body is the same as a body without the container
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|e| ApiError::MalformedBody(e.to_string()).into_response())?
        };

        permit(&body).map(OrderParams).ok_or_else(|| {
            ApiError::ParameterMissing { param: CONTAINER }.into_response()
        })
    }
}
