//! Access rules
//!
//! A rule is validated once, at declaration time, and rendered to exactly
//! one line of the auth file.

mod registry;
mod rule;
mod types;

pub use registry::RuleRegistry;
pub use rule::{DeclaredRule, Rule, RuleInput, declare_rule};
pub use types::{AuthMethod, ConnectionType, FieldValue, OrderKey};
