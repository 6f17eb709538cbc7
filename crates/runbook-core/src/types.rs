//! Validated rule-set types.
//!
//! This module provides the in-memory form of an alerting rule definition:
//! - [`RuleSet`]: An ordered, non-empty sequence of groups
//! - [`Group`]: A named, non-empty sequence of rules
//! - [`Rule`]: One alert definition
//!
//! Values of these types can only be obtained through their checked
//! constructors (or the [`parser`](crate::parser)), so a `RuleSet` in hand is
//! always complete.

use serde::Serialize;

use crate::error::{Result, ValidationError};

/// One alert definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    alert_name: String,
    expression: String,
    severity: String,
    description: String,
}

impl Rule {
    /// Creates a rule.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` if any field is blank. The
    /// `group` argument is only used to identify the rule in the error.
    pub fn new(
        group: &str,
        alert_name: impl Into<String>,
        expression: impl Into<String>,
        severity: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let rule = Self {
            alert_name: alert_name.into(),
            expression: expression.into(),
            severity: severity.into(),
            description: description.into(),
        };

        let missing = |field| ValidationError::MissingField {
            group: group.to_string(),
            rule: rule.alert_name.clone(),
            field,
        };

        if is_blank(&rule.alert_name) {
            return Err(missing("alert"));
        }
        if is_blank(&rule.expression) {
            return Err(missing("expr"));
        }
        if is_blank(&rule.description) {
            return Err(missing("annotations.description"));
        }
        if is_blank(&rule.severity) {
            return Err(missing("labels.severity"));
        }

        Ok(rule)
    }

    /// The alert name (`alert`).
    #[must_use]
    pub fn alert_name(&self) -> &str {
        &self.alert_name
    }

    /// The alert expression (`expr`), verbatim.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The severity label (`labels.severity`), verbatim.
    #[must_use]
    pub fn severity(&self) -> &str {
        &self.severity
    }

    /// The description annotation (`annotations.description`).
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A named collection of rules sharing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    name: String,
    rules: Vec<Rule>,
}

impl Group {
    /// Creates a group.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyGroupName` if the name is blank (reported
    /// as group #1; the parser reports the real position) and
    /// `ValidationError::EmptyGroup` if `rules` is empty.
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Result<Self> {
        let name = name.into();
        if is_blank(&name) {
            return Err(ValidationError::EmptyGroupName { index: 1 });
        }
        if rules.is_empty() {
            return Err(ValidationError::EmptyGroup { group: name });
        }
        Ok(Self { name, rules })
    }

    /// The group name, used as the runbook category.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// An ordered, non-empty sequence of groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    groups: Vec<Group>,
}

impl RuleSet {
    /// Creates a rule-set.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingRuleSet` if `groups` is empty.
    pub fn new(groups: Vec<Group>) -> Result<Self> {
        if groups.is_empty() {
            return Err(ValidationError::MissingRuleSet);
        }
        Ok(Self { groups })
    }

    /// The groups in declaration order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Iterates over every rule with its group, in group then rule order.
    pub fn rules(&self) -> impl Iterator<Item = (&Group, &Rule)> {
        self.groups
            .iter()
            .flat_map(|group| group.rules.iter().map(move |rule| (group, rule)))
    }

    /// Total number of rules across all groups.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(|g| g.rules.len()).sum()
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
