//! Field types of an access rule

use crate::error::RuleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the client connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// Unix-domain socket
    Local,
    /// TCP/IP, with or without TLS
    Host,
    /// TCP/IP over TLS only
    HostSsl,
    /// TCP/IP without TLS only
    HostNoSsl,
}

impl ConnectionType {
    pub const ALL: [ConnectionType; 4] = [
        ConnectionType::Local,
        ConnectionType::Host,
        ConnectionType::HostSsl,
        ConnectionType::HostNoSsl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionType::Local => "local",
            ConnectionType::Host => "host",
            ConnectionType::HostSsl => "hostssl",
            ConnectionType::HostNoSsl => "hostnossl",
        }
    }

    /// Every `host*` type matches on a client address.
    pub fn requires_address(&self) -> bool {
        self.as_str().starts_with("host")
    }
}

impl FromStr for ConnectionType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RuleError::InvalidConnectionType {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication method applied when a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    Trust,
    Reject,
    Md5,
    Password,
    Peer,
    Cert,
    Ident,
}

impl AuthMethod {
    pub const ALL: [AuthMethod; 7] = [
        AuthMethod::Trust,
        AuthMethod::Reject,
        AuthMethod::Md5,
        AuthMethod::Password,
        AuthMethod::Peer,
        AuthMethod::Cert,
        AuthMethod::Ident,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Trust => "trust",
            AuthMethod::Reject => "reject",
            AuthMethod::Md5 => "md5",
            AuthMethod::Password => "password",
            AuthMethod::Peer => "peer",
            AuthMethod::Cert => "cert",
            AuthMethod::Ident => "ident",
        }
    }
}

impl FromStr for AuthMethod {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| RuleError::InvalidAuthMethod {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A database or user field: a single literal or a list of names.
///
/// Scalars (`all`, `sameuser`, `@file`, or a single name) pass through
/// unchanged. Lists are joined with `,` in their given order, without
/// trimming, escaping or deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// The `all` keyword.
    pub fn all() -> Self {
        FieldValue::Scalar("all".to_string())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Render to the text placed in the rule line.
    pub fn render(&self) -> String {
        match self {
            FieldValue::Scalar(value) => value.clone(),
            FieldValue::List(items) => items.join(","),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::all()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// Position of a rule in the assembled file.
///
/// Compared as a plain string, so keys are zero-padded by convention:
/// `"050"` < `"150"` < `"999"`. Integers given in declarations are padded
/// to three digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawOrderKey")]
pub struct OrderKey(String);

impl OrderKey {
    pub const DEFAULT: &'static str = "150";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OrderKey {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl From<u32> for OrderKey {
    fn from(position: u32) -> Self {
        Self(format!("{:03}", position))
    }
}

impl From<&str> for OrderKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for OrderKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOrderKey {
    Text(String),
    Position(u32),
}

impl From<RawOrderKey> for OrderKey {
    fn from(raw: RawOrderKey) -> Self {
        match raw {
            RawOrderKey::Text(key) => OrderKey(key),
            RawOrderKey::Position(position) => position.into(),
        }
    }
}
