//! Runbook builder.
//!
//! Maps every rule of a validated [`RuleSet`] to its own [`Artifact`]: one
//! document per rule, in group then rule order. Each document has the same
//! fixed section sequence:
//!
//! | # | Heading             | Level | Body                       |
//! |---|---------------------|-------|----------------------------|
//! | 1 | title               | 1     | none                       |
//! | 2 | Alert Name:         | 2     | alert name                 |
//! | 3 | Alert Expression:   | 2     | expression                 |
//! | 4 | Category:           | 2     | group name                 |
//! | 5 | Description:        | 2     | description                |
//! | 6 | Possible Cause(s):  | 2     | placeholder                |
//! | 7 | Impact:             | 2     | placeholder                |
//! | 8 | Next Steps:         | 2     | placeholder                |
//! | 9 | Extra Notes:        | 2     | severity note              |

use serde::Serialize;
use tracing::{debug, info};

use crate::document::{DocumentModel, HeadingLevel, Section, SectionRole, StyleConfig};
use crate::naming::NameAllocator;
use crate::types::{Group, Rule, RuleSet};

/// Heading of the alert name section.
pub const ALERT_NAME: &str = "Alert Name:";
/// Heading of the expression section.
pub const ALERT_EXPRESSION: &str = "Alert Expression:";
/// Heading of the category section.
pub const CATEGORY: &str = "Category:";
/// Heading of the description section.
pub const DESCRIPTION: &str = "Description:";
/// Heading of the possible causes placeholder.
pub const POSSIBLE_CAUSES: &str = "Possible Cause(s):";
/// Heading of the impact placeholder.
pub const IMPACT: &str = "Impact:";
/// Heading of the next steps placeholder.
pub const NEXT_STEPS: &str = "Next Steps:";
/// Heading of the severity note section.
pub const EXTRA_NOTES: &str = "Extra Notes:";

/// Title of the runbook for `alert` in `group`.
#[must_use]
pub fn title(group: &str, alert: &str) -> String {
    format!("Alert RunBook \u{2013} {group} \u{2013} {alert}")
}

/// The sentence placed under [`EXTRA_NOTES`]. The severity is substituted
/// verbatim.
#[must_use]
pub fn severity_note(severity: &str) -> String {
    format!(
        "Severity level is {severity}, as it may not immediately impact service but requires corrective action."
    )
}

/// One generated runbook and its allocated name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    name: String,
    group: String,
    alert: String,
    model: DocumentModel,
}

impl Artifact {
    /// The unique, filesystem-safe name (without extension).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The group the rule came from.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The alert name of the rule.
    #[must_use]
    pub fn alert(&self) -> &str {
        &self.alert
    }

    /// The document model.
    #[must_use]
    pub fn model(&self) -> &DocumentModel {
        &self.model
    }

    /// Splits the artifact into its name and model.
    #[must_use]
    pub fn into_parts(self) -> (String, DocumentModel) {
        (self.name, self.model)
    }
}

/// Builds runbook artifacts from validated rule-sets.
#[derive(Debug, Clone)]
pub struct RunbookBuilder {
    base_name: String,
    style: StyleConfig,
}

impl RunbookBuilder {
    /// Creates a builder naming artifacts after `base_name`.
    #[must_use]
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            style: StyleConfig::default(),
        }
    }

    /// Sets the style table the heading and body sizes are taken from.
    #[must_use]
    pub const fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// The base name.
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// The style table.
    #[must_use]
    pub const fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Builds one artifact per rule, in group then rule order.
    ///
    /// Names are allocated from a fresh set on every call, so building the
    /// same rule-set twice gives identical results.
    #[must_use]
    pub fn build(&self, rule_set: &RuleSet) -> Vec<Artifact> {
        let mut names = NameAllocator::new(self.base_name.as_str());
        let artifacts: Vec<Artifact> = rule_set
            .rules()
            .map(|(group, rule)| {
                let name = names.allocate(group.name(), rule.alert_name());
                debug!(artifact = %name, group = %group.name(), alert = %rule.alert_name(), "allocated runbook");
                Artifact {
                    name,
                    group: group.name().to_string(),
                    alert: rule.alert_name().to_string(),
                    model: self.build_document(group, rule),
                }
            })
            .collect();

        info!(base = %self.base_name, artifacts = artifacts.len(), "built runbooks");
        artifacts
    }

    /// Builds the document for a single rule of `group`.
    #[must_use]
    pub fn build_document(&self, group: &Group, rule: &Rule) -> DocumentModel {
        let mut model = DocumentModel::new();
        model.push(self.section(
            title(group.name(), rule.alert_name()),
            SectionRole::Title,
            None,
        ));
        model.push(self.field(ALERT_NAME, rule.alert_name()));
        model.push(self.section(
            ALERT_EXPRESSION.to_string(),
            SectionRole::Expression,
            Some(rule.expression().to_string()),
        ));
        model.push(self.field(CATEGORY, group.name()));
        model.push(self.field(DESCRIPTION, rule.description()));
        for heading in [POSSIBLE_CAUSES, IMPACT, NEXT_STEPS] {
            model.push(self.section(heading.to_string(), SectionRole::Placeholder, None));
        }
        model.push(self.section(
            EXTRA_NOTES.to_string(),
            SectionRole::Note,
            Some(severity_note(rule.severity())),
        ));
        model
    }

    fn field(&self, heading: &str, body: &str) -> Section {
        self.section(heading.to_string(), SectionRole::Field, Some(body.to_string()))
    }

    fn section(&self, heading: String, role: SectionRole, body: Option<String>) -> Section {
        let level = match role {
            SectionRole::Title => HeadingLevel::One,
            SectionRole::Field
            | SectionRole::Expression
            | SectionRole::Placeholder
            | SectionRole::Note => HeadingLevel::Two,
        };
        Section {
            heading,
            level,
            role,
            emphasis_size: self.style.heading_size_for(role),
            body_size: self.style.body_size_for(role),
            body,
        }
    }
}

/// Builds artifacts with the default style. See [`RunbookBuilder::build`].
#[must_use]
pub fn build(base_name: &str, rule_set: &RuleSet) -> Vec<Artifact> {
    RunbookBuilder::new(base_name).build(rule_set)
}
