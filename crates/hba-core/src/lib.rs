//! Rule validation and ordered assembly for pgbouncer auth files
//!
//! This crate turns access-rule declarations into the lines of a pgbouncer
//! `auth_hba_file` and assembles them into a complete document:
//!
//! - **Rules**: validation of a single rule and rendering to its canonical
//!   line (`type database user [address] method`)
//! - **Registry**: an ordered collection of declared rules
//! - **Assembly**: stable ordering by order key and rendering of the final file
//! - **Declarations**: TOML documents describing the rules and the target file
//!
//! # Architecture
//!
//! ```text
//!   declarations (TOML)
//!          |
//!     RuleRegistry  --declare_rule-->  (line, order)
//!          |
//!      Fragments
//!          |
//!      Assembler  --hba-fs-->  auth file
//! ```
//!
//! # Example
//!
//! ```
//! use hba_core::rules::{declare_rule, FieldValue, RuleInput};
//!
//! let input = RuleInput::new("local", "peer")
//!     .database(FieldValue::list(["app", "web"]))
//!     .user("appuser");
//! let declared = declare_rule(&input).unwrap();
//! assert_eq!(declared.line, "local app,web appuser peer");
//! assert_eq!(declared.order.as_str(), "150");
//! ```

pub mod assembly;
pub mod declarations;
pub mod error;
pub mod rules;

pub use assembly::{Assembler, AssemblyOptions, DriftStatus, Fragment, WriteOutcome};
pub use declarations::{DeclarationFile, RuleDeclaration, TargetConfig, load_declarations};
pub use error::{Error, Result, RuleError};
pub use rules::{
    AuthMethod, ConnectionType, DeclaredRule, FieldValue, OrderKey, Rule, RuleInput, RuleRegistry,
    declare_rule,
};
