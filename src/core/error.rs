//! Typed errors for the pizzeria service
//!
//! # Error Categories
//!
//! - [`AttributeError`]: hard failures raised while assigning attributes to an
//!   order (value outside a closed enumeration, unknown attribute). These fail
//!   the whole write attempt before validation runs.
//! - [`FieldErrors`](crate::core::validation::FieldErrors): soft validation
//!   failures, one message per violated rule.
//! - [`ApiError`]: everything an HTTP handler can answer with, including the
//!   status-code mapping.
//!
//! Store and configuration code returns `anyhow::Result`; those failures reach
//! HTTP callers as [`ApiError::Internal`].

use crate::core::validation::FieldErrors;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Failure while assigning a value to an order attribute
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// Value outside the closed set of an enumerated attribute
    #[error("'{value}' is not a valid {attribute}")]
    InvalidEnumValue {
        attribute: &'static str,
        value: String,
    },

    /// Attribute name the order does not have
    #[error("unknown attribute '{attribute}' for PizzaOrder.")]
    UnknownAttribute { attribute: String },

    /// Structured value (array/object) where a scalar was expected
    #[error("unsupported value for attribute '{attribute}'")]
    UnsupportedValue { attribute: String },
}

/// Errors answered by the HTTP surface
#[derive(Debug, Error)]
pub enum ApiError {
    /// No order with the requested id
    #[error("Couldn't find PizzaOrder with 'id'={id}")]
    NotFound { id: String },

    /// The `pizza_order` container is missing, empty or not an object
    #[error("param is missing or the value is empty or invalid: {param}")]
    ParameterMissing { param: &'static str },

    /// The request body is not JSON
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// Assignment-time failure that nothing upstream handles
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    /// Validation failed, rendered as the raw field-error object
    #[error("validation failed: {}", .0.full_messages().join(", "))]
    Validation(FieldErrors),

    /// Store or other unexpected failure
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(id: impl ToString) -> Self {
        ApiError::NotFound { id: id.to_string() }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::ParameterMissing { .. } | ApiError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Attribute(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            ApiError::Validation(errors) => (status, Json(errors)).into_response(),
            ApiError::NotFound { ref id } => {
                tracing::debug!(order_id = %id, "{}", self);
                (status, Json(json!({ "status": 404, "error": "Not Found" }))).into_response()
            }
            ApiError::ParameterMissing { .. } | ApiError::MalformedBody(_) => (
                status,
                Json(json!({
                    "status": 400,
                    "error": "Bad Request",
                    "message": self.to_string(),
                })),
            )
                .into_response(),
            ApiError::Attribute(_) | ApiError::Internal(_) => {
                tracing::error!(error = ?self, "Unhandled error: {}", self);
                (
                    status,
                    Json(json!({ "status": 500, "error": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}
