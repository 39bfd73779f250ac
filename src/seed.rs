//! Example orders for local runs and demos

use crate::config::Environment;
use crate::core::order::{NewOrder, PizzaOrder, PizzaSize, PizzaType};
use crate::core::service::OrderStore;
use anyhow::Result;
use std::collections::BTreeMap;

const EXAMPLE_ORDERS: [(&str, PizzaType, PizzaSize); 10] = [
    ("Alice Whitfield", PizzaType::Margherita, PizzaSize::Medium),
    ("Bruno Castellano", PizzaType::Pepperoni, PizzaSize::Large),
    ("Chloe Nakamura", PizzaType::Vegetarian, PizzaSize::Small),
    ("Dmitri Volkov", PizzaType::Pepperoni, PizzaSize::Medium),
    ("Esther Okafor", PizzaType::Margherita, PizzaSize::Large),
    ("Felix Brandt", PizzaType::Vegetarian, PizzaSize::Medium),
    ("Grace O'Neill", PizzaType::Pepperoni, PizzaSize::Small),
    ("Hugo Lindqvist", PizzaType::Margherita, PizzaSize::Small),
    ("Ines Duarte", PizzaType::Vegetarian, PizzaSize::Large),
    ("Jonah Mercer", PizzaType::Pepperoni, PizzaSize::Medium),
];

/// What a seed run left in the store
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    /// Seeded orders, in seeding order
    pub orders: Vec<PizzaOrder>,

    /// How many of `orders` were newly created
    pub created: usize,

    pub by_type: BTreeMap<&'static str, usize>,
    pub by_size: BTreeMap<&'static str, usize>,
}

impl SeedReport {
    fn from_orders(orders: Vec<PizzaOrder>, created: usize) -> Self {
        let mut by_type: BTreeMap<&'static str, usize> =
            PizzaType::NAMES.iter().map(|name| (*name, 0)).collect();
        let mut by_size: BTreeMap<&'static str, usize> =
            PizzaSize::NAMES.iter().map(|name| (*name, 0)).collect();

        for order in &orders {
            *by_type.entry(order.pizza_type.as_str()).or_default() += 1;
            *by_size.entry(order.size.as_str()).or_default() += 1;
        }

        Self {
            orders,
            created,
            by_type,
            by_size,
        }
    }
}

/// Ensure the ten example orders exist
///
/// Idempotent: an order matching all three fields is reused. In
/// `development` every existing order is deleted first.
pub async fn seed_orders(store: &dyn OrderStore, environment: Environment) -> Result<SeedReport> {
    if environment == Environment::Development {
        let removed = store.delete_all().await?;
        tracing::info!(removed, "Cleared existing orders");
    }

    let mut orders = Vec::with_capacity(EXAMPLE_ORDERS.len());
    let mut created = 0;

    for (name, pizza_type, size) in EXAMPLE_ORDERS {
        let (order, was_created) = store
            .find_or_create(NewOrder::new(name, pizza_type, size))
            .await?;
        if was_created {
            created += 1;
        }
        tracing::debug!(
            order_id = order.id,
            "Seeded order: {} - {} ({})",
            order.customer_name,
            order.pizza_type,
            order.size
        );
        orders.push(order);
    }

    let report = SeedReport::from_orders(orders, created);
    tracing::info!(
        total = report.orders.len(),
        created = report.created,
        by_type = ?report.by_type,
        by_size = ?report.by_size,
        "Example orders seeded"
    );

    Ok(report)
}
