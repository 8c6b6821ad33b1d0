//! Error types for hba-core

use crate::rules::ConnectionType;
use std::path::PathBuf;

/// Result type for hba-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Validation failures for a single rule.
///
/// All of these are caller-input errors: retrying with the same input
/// always fails again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("invalid connection type '{value}' (expected local, host, hostssl or hostnossl)")]
    InvalidConnectionType { value: String },

    #[error("connection type '{connection_type}' requires an address")]
    MissingAddress { connection_type: ConnectionType },

    #[error(
        "invalid auth method '{value}' (expected trust, reject, md5, password, peer, cert or ident)"
    )]
    InvalidAuthMethod { value: String },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} {value:?} contains whitespace or control characters")]
    InvalidField { field: &'static str, value: String },
}

/// Errors that can occur in hba-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A declared rule failed validation
    #[error("Invalid rule '{name}': {source}")]
    InvalidRule {
        name: String,
        #[source]
        source: RuleError,
    },

    /// Two fragments share the same name
    #[error("Duplicate fragment name: {name}")]
    DuplicateFragment { name: String },

    /// Declaration file could not be parsed
    #[error("Failed to parse declarations at {path}: {message}")]
    DeclarationParse { path: PathBuf, message: String },

    /// Declaration path does not exist
    #[error("Declarations not found at {path}")]
    DeclarationsNotFound { path: PathBuf },

    /// Filesystem error from hba-fs
    #[error(transparent)]
    Fs(#[from] hba_fs::Error),
}

impl Error {
    /// Returns the underlying rule validation error, if any.
    pub fn rule_error(&self) -> Option<&RuleError> {
        match self {
            Error::InvalidRule { source, .. } => Some(source),
            _ => None,
        }
    }
}
