//! Declaration files: the TOML source of rules and the target file
//!
//! A declaration path is either a single file or a directory of `*.toml`
//! files:
//!
//! ```text
//! hba.d/
//!   010-admin.toml
//!   100-apps.toml
//! ```
//!
//! Files in a directory are read in file-name order and their rules are
//! concatenated, so declaration order is file-name order, then in-file
//! order. A malformed file aborts the whole load: skipping it would
//! silently drop access rules.
//!
//! # Example TOML
//!
//! ```toml
//! [target]
//! path = "/etc/pgbouncer/pgbouncer_hba.conf"
//! header = "Managed by pgbouncer-hba"
//!
//! [[rules]]
//! name = "local-app"
//! type = "local"
//! database = ["app", "web"]
//! user = "appuser"
//! auth_method = "peer"
//! order = "050"
//! ```

use crate::assembly::{AssemblyOptions, DEFAULT_HEADER};
use crate::error::{Error, Result};
use crate::rules::{FieldValue, OrderKey, RuleInput, RuleRegistry};
use hba_fs::read_text;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed declaration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeclarationFile {
    /// Where and how to write the assembled file
    #[serde(default)]
    pub target: Option<TargetConfig>,
    /// Rules in declaration order
    #[serde(default)]
    pub rules: Vec<RuleDeclaration>,
}

/// Output settings for the assembled file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Header comment; unset uses the default header, `""` disables it
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default = "default_true")]
    pub descriptions: bool,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            path: None,
            header: None,
            descriptions: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl TargetConfig {
    pub fn assembly_options(&self) -> AssemblyOptions {
        let header = match self.header.as_deref() {
            None => Some(DEFAULT_HEADER.to_string()),
            Some("") => None,
            Some(header) => Some(header.to_string()),
        };
        AssemblyOptions {
            header,
            include_descriptions: self.descriptions,
        }
    }
}

/// One `[[rules]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDeclaration {
    /// Fragment identifier, unique within the assembled file
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub connection_type: String,
    #[serde(default)]
    pub database: FieldValue,
    #[serde(default)]
    pub user: FieldValue,
    #[serde(default)]
    pub address: Option<String>,
    pub auth_method: String,
    #[serde(default)]
    pub order: OrderKey,
}

impl RuleDeclaration {
    pub fn to_input(&self) -> RuleInput {
        RuleInput {
            description: self.description.clone(),
            connection_type: self.connection_type.clone(),
            database: self.database.clone(),
            user: self.user.clone(),
            address: self.address.clone(),
            auth_method: self.auth_method.clone(),
            order: self.order.clone(),
        }
    }
}

impl DeclarationFile {
    /// Parse declarations from TOML text; `path` is only used in errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::DeclarationParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a single declaration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_text(path)?;
        Self::parse(&content, path)
    }

    /// Target settings, or the defaults when no `[target]` table was given
    pub fn target(&self) -> TargetConfig {
        self.target.clone().unwrap_or_default()
    }

    /// Declare every rule, stopping at the first invalid one.
    pub fn to_registry(&self) -> Result<RuleRegistry> {
        let mut registry = RuleRegistry::new();
        for declaration in &self.rules {
            registry.declare(declaration.name.as_str(), &declaration.to_input())?;
        }
        Ok(registry)
    }

    fn merge(&mut self, other: DeclarationFile, source: &Path) {
        if self.target.is_none() {
            self.target = other.target;
        } else if other.target.is_some() {
            tracing::warn!(path = %source.display(), "ignoring [target]; already set by an earlier file");
        }
        self.rules.extend(other.rules);
    }
}

/// Load declarations from a file or a directory of `*.toml` files.
pub fn load_declarations(path: &Path) -> Result<DeclarationFile> {
    if !path.exists() {
        return Err(Error::DeclarationsNotFound {
            path: path.to_path_buf(),
        });
    }

    if !path.is_dir() {
        return DeclarationFile::load(path);
    }

    let mut files: Vec<PathBuf> = fs::read_dir(path)
        .map_err(|e| hba_fs::Error::io(path, e))?
        .map(|entry| entry.map(|e| e.path()).map_err(|e| hba_fs::Error::io(path, e)))
        .collect::<std::result::Result<_, _>>()?;
    files.retain(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "toml"));
    files.sort();

    let mut merged = DeclarationFile::default();
    for file in &files {
        tracing::debug!(path = %file.display(), "loading declarations");
        merged.merge(DeclarationFile::load(file)?, file);
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_rule() {
        let toml = r#"
[[rules]]
name = "socket"
type = "local"
auth_method = "peer"
"#;
        let file = DeclarationFile::parse(toml, Path::new("inline")).unwrap();
        assert!(file.target.is_none());
        let rule = &file.rules[0];
        assert_eq!(rule.database, FieldValue::all());
        assert_eq!(rule.user, FieldValue::all());
        assert_eq!(rule.order, OrderKey::default());
        assert!(rule.address.is_none());
    }

    #[test]
    fn test_integer_order_is_padded() {
        let toml = r#"
[[rules]]
name = "early"
type = "local"
auth_method = "trust"
order = 50
"#;
        let file = DeclarationFile::parse(toml, Path::new("inline")).unwrap();
        assert_eq!(file.rules[0].order.as_str(), "050");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let toml = r#"
[[rules]]
name = "typo"
type = "local"
auth_methd = "trust"
"#;
        let err = DeclarationFile::parse(toml, Path::new("typo.toml")).unwrap_err();
        assert!(matches!(err, Error::DeclarationParse { .. }));
    }

    #[test]
    fn test_target_header_handling() {
        let unset = TargetConfig::default().assembly_options();
        assert_eq!(unset.header.as_deref(), Some(DEFAULT_HEADER));

        let disabled = TargetConfig {
            header: Some(String::new()),
            ..TargetConfig::default()
        };
        assert_eq!(disabled.assembly_options().header, None);
    }
}
