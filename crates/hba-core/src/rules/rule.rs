//! A single validated access rule

use super::types::{AuthMethod, ConnectionType, FieldValue, OrderKey};
use crate::error::RuleError;
use serde::Serialize;
use std::fmt;

/// Raw, unvalidated rule fields as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInput {
    /// Free-text label; defaults to the rule name
    pub description: Option<String>,
    /// One of `local`, `host`, `hostssl`, `hostnossl`
    pub connection_type: String,
    pub database: FieldValue,
    pub user: FieldValue,
    /// Client address range; required for `host*`, ignored for `local`
    pub address: Option<String>,
    /// One of `trust`, `reject`, `md5`, `password`, `peer`, `cert`, `ident`
    pub auth_method: String,
    pub order: OrderKey,
}

impl RuleInput {
    /// Start an input with `all` databases and users and the default order.
    pub fn new(connection_type: impl Into<String>, auth_method: impl Into<String>) -> Self {
        Self {
            description: None,
            connection_type: connection_type.into(),
            database: FieldValue::all(),
            user: FieldValue::all(),
            address: None,
            auth_method: auth_method.into(),
            order: OrderKey::default(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn database(mut self, database: impl Into<FieldValue>) -> Self {
        self.database = database.into();
        self
    }

    pub fn user(mut self, user: impl Into<FieldValue>) -> Self {
        self.user = user.into();
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn order(mut self, order: impl Into<OrderKey>) -> Self {
        self.order = order.into();
        self
    }
}

/// The rendered output of a declaration: one line and where it goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclaredRule {
    pub line: String,
    pub order: OrderKey,
}

/// A validated access rule.
///
/// Fields are fixed at construction; the only way to obtain a `Rule` is
/// through validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    name: String,
    description: String,
    connection_type: ConnectionType,
    databases: String,
    users: String,
    address: Option<String>,
    auth_method: AuthMethod,
    order: OrderKey,
}

impl Rule {
    /// Validate `input` and build the rule named `name`.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// connection type, address presence, auth method, then the database,
    /// user and address values. A value must be non-empty and contain no
    /// whitespace or control characters, so the rendered rule is always one
    /// line of single-space separated fields.
    pub fn from_input(name: impl Into<String>, input: &RuleInput) -> Result<Self, RuleError> {
        let name = name.into();

        let connection_type: ConnectionType = input.connection_type.parse()?;

        let address = if connection_type.requires_address() {
            match input.address.as_deref() {
                Some(address) if !address.trim().is_empty() => Some(address.to_string()),
                _ => return Err(RuleError::MissingAddress { connection_type }),
            }
        } else {
            if let Some(ignored) = &input.address {
                tracing::debug!(rule = %name, address = %ignored, "ignoring address on local rule");
            }
            None
        };

        let auth_method: AuthMethod = input.auth_method.parse()?;

        let databases = checked_field("database", input.database.render())?;
        let users = checked_field("user", input.user.render())?;
        let address = address
            .map(|address| checked_field("address", address))
            .transpose()?;

        Ok(Self {
            description: input.description.clone().unwrap_or_else(|| name.clone()),
            name,
            connection_type,
            databases,
            users,
            address,
            auth_method,
            order: input.order.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn connection_type(&self) -> ConnectionType {
        self.connection_type
    }

    pub fn databases(&self) -> &str {
        &self.databases
    }

    pub fn users(&self) -> &str {
        &self.users
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn auth_method(&self) -> AuthMethod {
        self.auth_method
    }

    pub fn order(&self) -> &OrderKey {
        &self.order
    }

    /// Render the auth file line: `type database user [address] method`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.connection_type, self.databases, self.users)?;
        if let Some(address) = &self.address {
            write!(f, " {}", address)?;
        }
        write!(f, " {}", self.auth_method)
    }
}

fn checked_field(field: &'static str, value: String) -> Result<String, RuleError> {
    if value.is_empty() {
        return Err(RuleError::EmptyField { field });
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(RuleError::InvalidField { field, value });
    }
    Ok(value)
}

/// Validate one rule and render it.
///
/// Pure: no I/O and no shared state, so declarations can be evaluated
/// independently and in any order.
pub fn declare_rule(input: &RuleInput) -> Result<DeclaredRule, RuleError> {
    let rule = Rule::from_input(String::new(), input)?;
    Ok(DeclaredRule {
        line: rule.render(),
        order: rule.order,
    })
}
