//! Unsaved order attributes
//!
//! A draft is what an order looks like before it is written: attributes are
//! assigned one by one (enumerated attributes are parsed on assignment and may
//! fail right there), then the whole draft is validated.

use crate::core::error::AttributeError;
use crate::core::order::{NewOrder, PizzaOrder, PizzaSize, PizzaType};
use crate::core::validation::FieldErrors;
use crate::core::validation::validators::{inclusion, is_blank, presence};
use serde_json::{Map, Value};

/// Attribute set of an order that has not been persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    pub customer_name: Option<String>,
    pub pizza_type: Option<PizzaType>,
    pub size: Option<PizzaSize>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft holding the current business fields of a persisted order
    pub fn from_order(order: &PizzaOrder) -> Self {
        Self {
            customer_name: Some(order.customer_name.clone()),
            pizza_type: Some(order.pizza_type),
            size: Some(order.size),
        }
    }

    /// Assign every attribute of `attributes`, stopping at the first failure
    pub fn assign_attributes(&mut self, attributes: &Map<String, Value>) -> Result<(), AttributeError> {
        for (name, value) in attributes {
            self.assign(name, value)?;
        }
        Ok(())
    }

    /// Assign a single attribute
    ///
    /// `null` clears the attribute. Blank strings clear enumerated attributes
    /// instead of failing the parse.
    pub fn assign(&mut self, name: &str, value: &Value) -> Result<(), AttributeError> {
        match name {
            "customer_name" => {
                self.customer_name = cast_string(name, value)?;
            }
            "pizza_type" => {
                self.pizza_type = cast_enum(name, value)?;
            }
            "size" => {
                self.size = cast_enum(name, value)?;
            }
            other => {
                return Err(AttributeError::UnknownAttribute {
                    attribute: other.to_string(),
                });
            }
        }
        Ok(())
    }

    /// String form of an attribute, as seen by validators
    pub fn read_attribute(&self, name: &str) -> Option<&str> {
        match name {
            "customer_name" => self.customer_name.as_deref(),
            "pizza_type" => self.pizza_type.as_ref().map(PizzaType::as_str),
            "size" => self.size.as_ref().map(PizzaSize::as_str),
            _ => None,
        }
    }

    /// Run every rule and either hand back writable fields or the failures
    pub fn validate(&self) -> Result<NewOrder, FieldErrors> {
        let present = presence();
        let mut errors = FieldErrors::new();

        for field in ["customer_name", "pizza_type", "size"] {
            if let Err(message) = present(self.read_attribute(field)) {
                errors.add(field, message);
            }
        }

        let type_listed = inclusion(PizzaType::NAMES);
        if let Err(message) = type_listed(self.read_attribute(PizzaType::ATTRIBUTE)) {
            errors.add(PizzaType::ATTRIBUTE, message);
        }

        let size_listed = inclusion(PizzaSize::NAMES);
        if let Err(message) = size_listed(self.read_attribute(PizzaSize::ATTRIBUTE)) {
            errors.add(PizzaSize::ATTRIBUTE, message);
        }

        match (&self.customer_name, self.pizza_type, self.size) {
            (Some(name), Some(pizza_type), Some(size)) if errors.is_empty() => {
                Ok(NewOrder::new(name.clone(), pizza_type, size))
            }
            _ => Err(errors),
        }
    }
}

fn cast_string(name: &str, value: &Value) -> Result<Option<String>, AttributeError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(AttributeError::UnsupportedValue {
            attribute: name.to_string(),
        }),
    }
}

fn cast_enum<T>(name: &str, value: &Value) -> Result<Option<T>, AttributeError>
where
    T: std::str::FromStr<Err = AttributeError>,
{
    let raw = cast_string(name, value)?;
    if is_blank(raw.as_deref()) {
        return Ok(None);
    }
    raw.as_deref().map(str::parse::<T>).transpose()
}
