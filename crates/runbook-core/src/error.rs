//! Error types for the runbook-core crate.

use thiserror::Error;

/// Errors raised while validating a rule-set definition.
///
/// A rule-set that fails validation produces no artifacts at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input decoded to nothing, or has no `groups` key, or `groups` is empty.
    #[error("missing or empty rule-set")]
    MissingRuleSet,

    /// The input is not well-formed YAML/JSON, or `groups` is not a list.
    #[error("malformed rule-set: {reason}")]
    Malformed {
        /// The decoder's description of the problem.
        reason: String,
    },

    /// A group has no name, or an empty one.
    #[error("group #{index} has a missing or empty name")]
    EmptyGroupName {
        /// 1-based position of the group in the rule-set.
        index: usize,
    },

    /// A group has no rules.
    #[error("group '{group}' has no rules")]
    EmptyGroup {
        /// The group name.
        group: String,
    },

    /// A rule lacks one of its required fields.
    #[error("rule '{rule}' in group '{group}' is missing required field '{field}'")]
    MissingField {
        /// The group the rule belongs to.
        group: String,
        /// The alert name, or `#<n>` when the alert name itself is missing.
        rule: String,
        /// The source-format path of the missing field.
        field: &'static str,
    },

    /// A group entry has the wrong shape.
    #[error("group '{group}' is invalid: {reason}")]
    InvalidGroup {
        /// The group name, or `#<n>` when the name is unavailable.
        group: String,
        /// What was found instead.
        reason: String,
    },

    /// A rule entry is not a mapping.
    #[error("rule '{rule}' in group '{group}' is invalid: {reason}")]
    InvalidRule {
        /// The group the rule belongs to.
        group: String,
        /// `#<n>`, the 1-based position of the rule in its group.
        rule: String,
        /// What was found instead.
        reason: String,
    },

    /// A rule field has the wrong type.
    #[error("rule '{rule}' in group '{group}' has invalid field '{field}': {reason}")]
    InvalidField {
        /// The group the rule belongs to.
        group: String,
        /// The alert name, or `#<n>` when the alert name is unavailable.
        rule: String,
        /// The source-format path of the field.
        field: &'static str,
        /// What was expected and what was found.
        reason: String,
    },
}

impl From<serde_yaml::Error> for ValidationError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Malformed {
            reason: err.to_string(),
        }
    }
}

/// Errors raised by a [`Renderer`](crate::render::Renderer).
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing the rendered output failed.
    #[error("render I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend cannot represent this document or style.
    #[error("{format} renderer cannot render document: {reason}")]
    Unsupported {
        /// The output format of the backend.
        format: String,
        /// Why the document could not be rendered.
        reason: String,
    },

    /// The backend failed for a backend-specific reason.
    #[error("renderer failed: {reason}")]
    Backend {
        /// The reason reported by the backend.
        reason: String,
    },

    /// The render task panicked or was cancelled.
    #[error("render task failed: {reason}")]
    Task {
        /// The join error description.
        reason: String,
    },
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Backend {
            reason: err.to_string(),
        }
    }
}

/// Errors that abort a whole conversion run.
#[derive(Debug, Error)]
pub enum RunbookError {
    /// The rule-set failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The style configuration is unusable.
    #[error("invalid style: {reason}")]
    InvalidStyle {
        /// Why the style was rejected.
        reason: String,
    },

    /// An artifact failed to render and the caller asked for all-or-nothing.
    #[error("artifact '{artifact}' failed to render: {source}")]
    Render {
        /// The name of the artifact that failed.
        artifact: String,
        /// The underlying renderer error.
        #[source]
        source: RenderError,
    },
}

/// Result type for rule-set validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_missing_rule_set() {
        assert_eq!(
            ValidationError::MissingRuleSet.to_string(),
            "missing or empty rule-set"
        );
    }

    #[test]
    fn error_display_missing_field() {
        let err = ValidationError::MissingField {
            group: "disk".to_string(),
            rule: "DiskFull".to_string(),
            field: "labels.severity",
        };
        assert_eq!(
            err.to_string(),
            "rule 'DiskFull' in group 'disk' is missing required field 'labels.severity'"
        );
    }

    #[test]
    fn error_display_invalid_field() {
        let err = ValidationError::InvalidField {
            group: "disk".to_string(),
            rule: "DiskFull".to_string(),
            field: "annotations",
            reason: "expected a mapping, found a string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "rule 'DiskFull' in group 'disk' has invalid field 'annotations': \
             expected a mapping, found a string"
        );
    }

    #[test]
    fn error_display_empty_group() {
        let err = ValidationError::EmptyGroup {
            group: "cpu".to_string(),
        };
        assert_eq!(err.to_string(), "group 'cpu' has no rules");
    }

    #[test]
    fn error_from_serde_yaml() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{ not: [a list");
        assert!(yaml_err.is_err());
        let err: ValidationError = yaml_err.unwrap_err().into();
        assert!(matches!(err, ValidationError::Malformed { .. }));
    }

    #[test]
    fn runbook_error_wraps_validation_transparently() {
        let err: RunbookError = ValidationError::MissingRuleSet.into();
        assert_eq!(err.to_string(), "missing or empty rule-set");
    }

    #[test]
    fn render_error_from_io() {
        let io_err = std::io::Error::other("disk gone");
        let err = RenderError::from(io_err);
        assert!(matches!(err, RenderError::Io(_)));
        assert_eq!(err.to_string(), "render I/O error: disk gone");
    }
}
