//! The pizza order record and its closed enumerations

use crate::core::error::AttributeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Surrogate identifier assigned by the store
pub type OrderId = i64;

/// Declare a closed enumeration stored as its lowercase name.
///
/// Parsing (`FromStr`) is the assignment-time check: any value outside the
/// set fails immediately with [`AttributeError::InvalidEnumValue`].
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $attribute:literal, { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every member of the set, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stored names of every member
            pub const NAMES: &'static [&'static str] = &[$($value),+];

            /// Attribute name this enumeration is assigned to
            pub const ATTRIBUTE: &'static str = $attribute;

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl FromStr for $name {
            type Err = AttributeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(AttributeError::InvalidEnumValue {
                        attribute: $attribute,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum!(
    /// Kind of pizza on the menu
    PizzaType, "pizza_type", {
        Margherita => "margherita",
        Pepperoni => "pepperoni",
        Vegetarian => "vegetarian",
    }
);

closed_enum!(
    /// Pizza size
    PizzaSize, "size", {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
);

/// A persisted pizza order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaOrder {
    pub id: OrderId,
    pub customer_name: String,
    pub pizza_type: PizzaType,
    pub size: PizzaSize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PizzaOrder {
    /// Build a record from validated fields, stamping both timestamps with `now`
    pub fn from_new(id: OrderId, order: NewOrder, now: DateTime<Utc>) -> Self {
        Self {
            id,
            customer_name: order.customer_name,
            pizza_type: order.pizza_type,
            size: order.size,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the business fields and refresh `updated_at`
    pub fn apply(&mut self, order: NewOrder) {
        self.customer_name = order.customer_name;
        self.pizza_type = order.pizza_type;
        self.size = order.size;
        self.touch();
    }

    /// Refresh the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Check whether the business fields equal those of `order`
    pub fn matches(&self, order: &NewOrder) -> bool {
        self.customer_name == order.customer_name
            && self.pizza_type == order.pizza_type
            && self.size == order.size
    }
}

/// Validated business fields, ready to be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub pizza_type: PizzaType,
    pub size: PizzaSize,
}

impl NewOrder {
    pub fn new(customer_name: impl Into<String>, pizza_type: PizzaType, size: PizzaSize) -> Self {
        Self {
            customer_name: customer_name.into(),
            pizza_type,
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pizza_type_parses_from_its_name() {
        for (pizza_type, name) in PizzaType::ALL.iter().zip(PizzaType::NAMES) {
            assert_eq!(name.parse::<PizzaType>().unwrap(), *pizza_type);
            assert_eq!(pizza_type.as_str(), *name);
        }
    }

    #[test]
    fn test_every_size_parses_from_its_name() {
        for (size, name) in PizzaSize::ALL.iter().zip(PizzaSize::NAMES) {
            assert_eq!(name.parse::<PizzaSize>().unwrap(), *size);
        }
    }

    #[test]
    fn test_unknown_pizza_type_fails_immediately() {
        let err = "hawaiian".parse::<PizzaType>().unwrap_err();
        assert_eq!(err.to_string(), "'hawaiian' is not a valid pizza_type");
    }

    #[test]
    fn test_unknown_size_fails_immediately() {
        let err = "extra_large".parse::<PizzaSize>().unwrap_err();
        assert_eq!(err.to_string(), "'extra_large' is not a valid size");
    }

    #[test]
    fn test_parsing_is_case_sensitive() {
        assert!("MARGHERITA".parse::<PizzaType>().is_err());
        assert!("Large".parse::<PizzaSize>().is_err());
    }

    #[test]
    fn test_enums_serialize_as_lowercase_strings() {
        assert_eq!(
            serde_json::to_value(PizzaType::Pepperoni).unwrap(),
            serde_json::json!("pepperoni")
        );
        assert_eq!(
            serde_json::to_value(PizzaSize::Medium).unwrap(),
            serde_json::json!("medium")
        );
    }

    #[test]
    fn test_apply_refreshes_updated_at_only() {
        let created = Utc::now() - chrono::Duration::minutes(5);
        let mut order = PizzaOrder::from_new(
            1,
            NewOrder::new("John Doe", PizzaType::Margherita, PizzaSize::Medium),
            created,
        );

        order.apply(NewOrder::new("Jane Smith", PizzaType::Pepperoni, PizzaSize::Large));

        assert_eq!(order.customer_name, "Jane Smith");
        assert_eq!(order.pizza_type, PizzaType::Pepperoni);
        assert_eq!(order.size, PizzaSize::Large);
        assert_eq!(order.created_at, created);
        assert!(order.updated_at > created);
    }

    #[test]
    fn test_serialized_order_has_expected_keys() {
        let order = PizzaOrder::from_new(
            7,
            NewOrder::new("John Doe", PizzaType::Vegetarian, PizzaSize::Small),
            Utc::now(),
        );
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["customer_name"], "John Doe");
        assert_eq!(json["pizza_type"], "vegetarian");
        assert_eq!(json["size"], "small");
        assert!(json["created_at"].is_string());
        assert!(json["updated_at"].is_string());
    }
}
