//! Pizza order intake and HTTP handlers

pub mod handlers;
pub mod intake;

pub use handlers::{
    OrderAppState, create_order, delete_order, list_orders, show_order, update_order,
};
pub use intake::{IntakeOutcome, OrderIntake, normalize};
