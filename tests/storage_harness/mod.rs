//! Shared test harness for order store backends
//!
//! Provides order fixtures and the `order_store_tests!` contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! order_store_tests!(InMemoryOrderStore::new());
//! ```

#![allow(dead_code)]

pub mod order_store_tests;

use pizzeria::core::order::{NewOrder, PizzaSize, PizzaType};

/// A valid order for `name`
pub fn new_order(name: &str) -> NewOrder {
    NewOrder::new(name, PizzaType::Margherita, PizzaSize::Medium)
}

/// One order per (type, size) combination, in declaration order
pub fn menu_orders() -> Vec<NewOrder> {
    PizzaType::ALL
        .iter()
        .flat_map(|pizza_type| {
            PizzaSize::ALL.iter().map(move |size| {
                NewOrder::new(format!("{} {}", pizza_type, size), *pizza_type, *size)
            })
        })
        .collect()
}
