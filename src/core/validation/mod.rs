//! Validation of order attributes
//!
//! Validation is the soft tier: it runs on an assigned draft and collects one
//! message per violated rule. Values outside a closed enumeration never get
//! here, they fail at assignment time.

pub mod extractor;
pub mod validators;

pub use extractor::{OrderParams, PERMITTED_FIELDS, permit};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Ordered collection of validation failures
///
/// Serializes as an object keyed by field name, e.g.
/// `{"customer_name": ["can't be blank"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violated rule for `field`
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.entries.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Messages recorded for a single field, in insertion order
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    /// Human-readable messages naming the field, e.g. "Customer name can't be blank"
    pub fn full_messages(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(field, message)| format!("{} {}", humanize(field), message))
            .collect()
    }

    /// Messages grouped per field, fields in order of first failure
    pub fn to_map(&self) -> IndexMap<&'static str, Vec<String>> {
        let mut map: IndexMap<&'static str, Vec<String>> = IndexMap::new();
        for (field, message) in &self.entries {
            map.entry(*field).or_default().push(message.clone());
        }
        map
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

/// Turn an attribute name into a label: `customer_name` → `Customer name`
pub fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
