//! One rule's rendered output prior to assembly

use crate::rules::{OrderKey, Rule};
use serde::Serialize;

/// A rendered rule line tagged with its identifier and order key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    /// Unique identifier within one assembled file
    pub name: String,
    /// Placed as a comment above the line when enabled
    pub description: String,
    pub line: String,
    pub order: OrderKey,
}

impl Fragment {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        line: impl Into<String>,
        order: impl Into<OrderKey>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            line: line.into(),
            order: order.into(),
        }
    }
}

impl From<&Rule> for Fragment {
    fn from(rule: &Rule) -> Self {
        Self {
            name: rule.name().to_string(),
            description: rule.description().to_string(),
            line: rule.render(),
            order: rule.order().clone(),
        }
    }
}
