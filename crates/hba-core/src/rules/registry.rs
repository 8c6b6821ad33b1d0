//! Rule Registry: the ordered set of rules declared in one generation run

use super::rule::{DeclaredRule, Rule, RuleInput, declare_rule};
use crate::assembly::Fragment;
use crate::error::{Error, Result, RuleError};

/// Collects validated rules in declaration order.
///
/// The registry is rebuilt from declarations on every run and has no
/// persistence of its own. Name uniqueness is enforced when fragments are
/// assembled, not here.
#[derive(Debug, Default, Clone)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and render one rule without registering it.
    pub fn declare_rule(input: &RuleInput) -> std::result::Result<DeclaredRule, RuleError> {
        declare_rule(input)
    }

    /// Validate a rule and append it to the registry.
    ///
    /// Fails fast: an invalid rule is never recorded.
    pub fn declare(&mut self, name: impl Into<String>, input: &RuleInput) -> Result<&Rule> {
        let name = name.into();
        let rule = Rule::from_input(name.as_str(), input)
            .map_err(|source| Error::InvalidRule { name, source })?;

        tracing::debug!(
            rule = rule.name(),
            order = %rule.order(),
            line = %rule,
            "declared rule"
        );

        self.rules.push(rule);
        Ok(&self.rules[self.rules.len() - 1])
    }

    /// Get all rules in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Get a rule by name
    ///
    /// If multiple rules share the name, returns the first one.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Fragments for the assembler, in declaration order.
    pub fn fragments(&self) -> Vec<Fragment> {
        self.rules.iter().map(Fragment::from).collect()
    }
}
