//! Core module containing the order model, its validation and the store trait

pub mod draft;
pub mod error;
pub mod order;
pub mod service;
pub mod validation;

pub use draft::OrderDraft;
pub use error::{ApiError, AttributeError};
pub use order::{NewOrder, OrderId, PizzaOrder, PizzaSize, PizzaType};
pub use service::OrderStore;
pub use validation::{FieldErrors, OrderParams};
