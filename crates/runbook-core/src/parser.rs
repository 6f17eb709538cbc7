//! Rule-set parser.
//!
//! Decodes a Prometheus-style rule file into a validated [`RuleSet`]:
//!
//! ```yaml
//! groups:
//!   - name: disk
//!     rules:
//!       - alert: DiskFull
//!         expr: disk_free < 10
//!         annotations:
//!           description: Disk nearly full
//!         labels:
//!           severity: critical
//! ```
//!
//! JSON is accepted as well, being a subset of YAML. Keys the runbook does not
//! use (`for`, `summary`, extra labels, ...) are ignored. Missing required
//! fields are always an error; nothing is silently defaulted.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::types::{Group, Rule, RuleSet, is_blank};

#[derive(Debug, Deserialize)]
struct RawRuleSet {
    #[serde(default)]
    groups: Option<Vec<Value>>,
}

// Members stay undecoded so a type error can be reported against the group
// and rule it occurs in.
#[derive(Debug, Deserialize)]
struct RawGroup {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    rules: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    #[serde(default)]
    alert: Option<Value>,
    #[serde(default)]
    expr: Option<Value>,
    #[serde(default)]
    annotations: Option<Value>,
    #[serde(default)]
    labels: Option<Value>,
}

/// Parses raw rule-file bytes (YAML or JSON).
///
/// # Errors
///
/// Returns `ValidationError::MissingRuleSet` for empty input or input without
/// groups, `ValidationError::Malformed` for undecodable input, and the
/// group/rule level variants for incomplete or mistyped definitions.
pub fn parse(input: &[u8]) -> Result<RuleSet> {
    let text = std::str::from_utf8(input).map_err(|e| ValidationError::Malformed {
        reason: format!("input is not valid UTF-8: {e}"),
    })?;
    parse_str(text)
}

/// Parses a rule file held in a string.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_str(input: &str) -> Result<RuleSet> {
    if input.trim().is_empty() {
        return Err(ValidationError::MissingRuleSet);
    }
    let value: Value = serde_yaml::from_str(input)?;
    parse_value(value)
}

/// Validates an already-decoded rule-set document.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_value(value: Value) -> Result<RuleSet> {
    match &value {
        Value::Mapping(map) if map.contains_key("groups") => {}
        _ => return Err(ValidationError::MissingRuleSet),
    }

    let raw: RawRuleSet = serde_yaml::from_value(value)?;
    let raw_groups = raw.groups.unwrap_or_default();
    if raw_groups.is_empty() {
        return Err(ValidationError::MissingRuleSet);
    }

    let groups = raw_groups
        .into_iter()
        .enumerate()
        .map(|(index, group)| validate_group(index + 1, group))
        .collect::<Result<Vec<_>>>()?;

    let rule_set = RuleSet::new(groups)?;
    debug!(
        groups = rule_set.groups().len(),
        rules = rule_set.rule_count(),
        "parsed rule-set"
    );
    Ok(rule_set)
}

fn validate_group(index: usize, value: Value) -> Result<Group> {
    let position = format!("#{index}");
    if !value.is_mapping() {
        return Err(ValidationError::InvalidGroup {
            group: position,
            reason: format!("expected a mapping, found {}", kind(&value)),
        });
    }
    let raw: RawGroup = serde_yaml::from_value(value).map_err(|e| ValidationError::InvalidGroup {
        group: position.clone(),
        reason: e.to_string(),
    })?;

    let name = match scalar_text(raw.name) {
        Ok(Some(name)) if !is_blank(&name) => name,
        Ok(_) => return Err(ValidationError::EmptyGroupName { index }),
        Err(reason) => {
            return Err(ValidationError::InvalidGroup {
                group: position,
                reason: format!("name: {reason}"),
            });
        }
    };

    let raw_rules = match raw.rules {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(rules)) => rules,
        Some(other) => {
            return Err(ValidationError::InvalidGroup {
                group: name,
                reason: format!("rules: expected a list, found {}", kind(&other)),
            });
        }
    };
    if raw_rules.is_empty() {
        return Err(ValidationError::EmptyGroup { group: name });
    }

    let rules = raw_rules
        .into_iter()
        .enumerate()
        .map(|(position, rule)| validate_rule(&name, position + 1, rule))
        .collect::<Result<Vec<_>>>()?;

    Group::new(name, rules)
}

fn validate_rule(group: &str, position: usize, value: Value) -> Result<Rule> {
    let at = format!("#{position}");
    if !value.is_mapping() {
        return Err(ValidationError::InvalidRule {
            group: group.to_string(),
            rule: at,
            reason: format!("expected a mapping, found {}", kind(&value)),
        });
    }
    let raw: RawRule = serde_yaml::from_value(value).map_err(|e| ValidationError::InvalidRule {
        group: group.to_string(),
        rule: at.clone(),
        reason: e.to_string(),
    })?;

    let invalid = |rule: &str, field: &'static str, reason: String| ValidationError::InvalidField {
        group: group.to_string(),
        rule: rule.to_string(),
        field,
        reason,
    };

    let alert = match scalar_text(raw.alert) {
        Ok(Some(alert)) if !is_blank(&alert) => alert,
        Ok(_) => {
            return Err(ValidationError::MissingField {
                group: group.to_string(),
                rule: at,
                field: "alert",
            });
        }
        Err(reason) => return Err(invalid(&at, "alert", reason)),
    };

    let missing = |field| ValidationError::MissingField {
        group: group.to_string(),
        rule: alert.clone(),
        field,
    };

    let expr = scalar_text(raw.expr)
        .map_err(|r| invalid(&alert, "expr", r))?
        .ok_or_else(|| missing("expr"))?;

    let annotations = mapping(raw.annotations).map_err(|r| invalid(&alert, "annotations", r))?;
    let description = nested_text(annotations.as_ref(), "description")
        .map_err(|r| invalid(&alert, "annotations.description", r))?
        .ok_or_else(|| missing("annotations.description"))?;

    let labels = mapping(raw.labels).map_err(|r| invalid(&alert, "labels", r))?;
    let severity = nested_text(labels.as_ref(), "severity")
        .map_err(|r| invalid(&alert, "labels.severity", r))?
        .ok_or_else(|| missing("labels.severity"))?;

    Rule::new(group, alert.clone(), expr, severity, description)
}

/// Text of a scalar field. Numbers are taken as written, so `expr: 1` is the
/// PromQL constant `1`.
fn scalar_text(value: Option<Value>) -> std::result::Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(format!("expected a string, found {}", kind(&other))),
    }
}

fn nested_text(map: Option<&Mapping>, key: &str) -> std::result::Result<Option<String>, String> {
    scalar_text(map.and_then(|m| m.get(key)).cloned())
}

fn mapping(value: Option<Value>) -> std::result::Result<Option<Mapping>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Mapping(map)) => Ok(Some(map)),
        Some(other) => Err(format!("expected a mapping, found {}", kind(&other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const DISK: &str = r"
groups:
  - name: disk
    rules:
      - alert: DiskFull
        expr: disk_free < 10
        for: 5m
        annotations:
          description: Disk nearly full
          summary: ignored
        labels:
          severity: critical
          team: storage
";

    fn missing_field(err: ValidationError) -> (String, String, &'static str) {
        match err {
            ValidationError::MissingField { group, rule, field } => (group, rule, field),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    mod valid_input_tests {
        use super::*;
        use test_case::test_case;

        #[test]
        fn parse_single_rule() {
            let set = parse_str(DISK).unwrap();
            assert_eq!(set.groups().len(), 1);
            let group = &set.groups()[0];
            assert_eq!(group.name(), "disk");
            let rule = &group.rules()[0];
            assert_eq!(rule.alert_name(), "DiskFull");
            assert_eq!(rule.expression(), "disk_free < 10");
            assert_eq!(rule.description(), "Disk nearly full");
            assert_eq!(rule.severity(), "critical");
        }

        #[test]
        fn parse_bytes() {
            let set = parse(DISK.as_bytes()).unwrap();
            assert_eq!(set.rule_count(), 1);
        }

        #[test]
        fn parse_json() {
            let json = r#"{"groups":[{"name":"cpu","rules":[{"alert":"HighCPU","expr":"cpu > 0.9",
                "annotations":{"description":"CPU busy"},"labels":{"severity":"warning"}}]}]}"#;
            let set = parse_str(json).unwrap();
            assert_eq!(set.groups()[0].rules()[0].alert_name(), "HighCPU");
        }

        #[test]
        fn parse_preserves_order() {
            let yaml = r"
groups:
  - name: b
    rules:
      - {alert: B2, expr: x, annotations: {description: d}, labels: {severity: s}}
      - {alert: B1, expr: x, annotations: {description: d}, labels: {severity: s}}
  - name: a
    rules:
      - {alert: A1, expr: x, annotations: {description: d}, labels: {severity: s}}
";
            let set = parse_str(yaml).unwrap();
            let names: Vec<_> = set.rules().map(|(_, r)| r.alert_name()).collect();
            assert_eq!(names, ["B2", "B1", "A1"]);
        }

        #[test]
        fn parse_multiline_expression() {
            let yaml = r"
groups:
  - name: api
    rules:
      - alert: SlowRequests
        expr: |
          histogram_quantile(0.99,
            rate(http_duration_seconds_bucket[5m])) > 1
        annotations: {description: p99 latency above 1s}
        labels: {severity: warning}
";
            let set = parse_str(yaml).unwrap();
            assert!(set.groups()[0].rules()[0].expression().contains('\n'));
        }
    }

    mod rule_set_errors {
        use super::*;
        use test_case::test_case;

        #[test_case("" ; "empty input")]
        #[test_case("   \n" ; "whitespace only")]
        #[test_case("~" ; "null document")]
        #[test_case("rules: []" ; "groups key absent")]
        #[test_case("groups:" ; "groups null")]
        #[test_case("groups: []" ; "zero groups")]
        #[test_case("- name: disk" ; "top level list")]
        fn missing_rule_set(input: &str) {
            assert_eq!(parse_str(input).unwrap_err(), ValidationError::MissingRuleSet);
        }

        #[test]
        fn malformed_yaml() {
            let err = parse_str("groups: [ {name: ").unwrap_err();
            assert!(matches!(err, ValidationError::Malformed { .. }));
        }

        #[test]
        fn wrong_type_is_malformed() {
            let err = parse_str("groups: 12").unwrap_err();
            assert!(matches!(err, ValidationError::Malformed { .. }));
        }

        #[test]
        fn invalid_utf8_is_malformed() {
            let err = parse(&[0xff, 0xfe, 0x00]).unwrap_err();
            assert!(matches!(err, ValidationError::Malformed { .. }));
        }
    }

    mod group_errors {
        use super::*;
        use test_case::test_case;

        #[test]
        fn group_without_name() {
            let yaml = r"
groups:
  - name: ok
    rules:
      - {alert: A, expr: x, annotations: {description: d}, labels: {severity: s}}
  - rules:
      - {alert: B, expr: x, annotations: {description: d}, labels: {severity: s}}
";
            assert_eq!(
                parse_str(yaml).unwrap_err(),
                ValidationError::EmptyGroupName { index: 2 }
            );
        }

        #[test]
        fn group_without_rules() {
            let yaml = "groups:\n  - name: empty\n    rules: []\n";
            assert_eq!(
                parse_str(yaml).unwrap_err(),
                ValidationError::EmptyGroup {
                    group: "empty".to_string()
                }
            );
        }
    }

    mod rule_errors {
        use super::*;
        use test_case::test_case;

        #[test_case("{expr: x, annotations: {description: d}, labels: {severity: s}}", "#1", "alert" ; "missing alert")]
        #[test_case("{alert: '', expr: x, annotations: {description: d}, labels: {severity: s}}", "#1", "alert" ; "empty alert")]
        #[test_case("{alert: A, annotations: {description: d}, labels: {severity: s}}", "A", "expr" ; "missing expr")]
        #[test_case("{alert: A, expr: x, labels: {severity: s}}", "A", "annotations.description" ; "missing annotations")]
        #[test_case("{alert: A, expr: x, annotations: {summary: d}, labels: {severity: s}}", "A", "annotations.description" ; "missing description")]
        #[test_case("{alert: A, expr: x, annotations: {description: d}}", "A", "labels.severity" ; "missing labels")]
        #[test_case("{alert: A, expr: x, annotations: {description: d}, labels: {team: t}}", "A", "labels.severity" ; "missing severity")]
        #[test_case("{alert: A, expr: x, annotations: {description: ''}, labels: {severity: s}}", "A", "annotations.description" ; "empty description")]
        fn missing_rule_field(rule: &str, expected_rule: &str, expected_field: &str) {
            let yaml = format!("groups:\n  - name: g\n    rules:\n      - {rule}\n");
            let (group, rule, field) = missing_field(parse_str(&yaml).unwrap_err());
            assert_eq!(group, "g");
            assert_eq!(rule, expected_rule);
            assert_eq!(field, expected_field);
        }

        #[test]
        fn missing_alert_reports_position() {
            let yaml = r"
groups:
  - name: g
    rules:
      - {alert: A, expr: x, annotations: {description: d}, labels: {severity: s}}
      - {alert: B, expr: x, annotations: {description: d}, labels: {severity: s}}
      - {expr: x, annotations: {description: d}, labels: {severity: s}}
";
            let (_, rule, field) = missing_field(parse_str(yaml).unwrap_err());
            assert_eq!(rule, "#3");
            assert_eq!(field, "alert");
        }

        #[test_case("{alert: A, expr: 1, annotations: {description: d}, labels: {severity: s}}", "1" ; "integer expr")]
        #[test_case("{alert: A, expr: 0.5, annotations: {description: d}, labels: {severity: s}}", "0.5" ; "float expr")]
        fn numeric_expr_taken_as_written(rule: &str, expected: &str) {
            let yaml = format!("groups:\n  - name: g\n    rules:\n      - {rule}\n");
            let set = parse_str(&yaml).unwrap();
            assert_eq!(set.groups()[0].rules()[0].expression(), expected);
        }

        #[test]
        fn one_bad_rule_fails_whole_set() {
            let yaml = r"
groups:
  - name: good
    rules:
      - {alert: A, expr: x, annotations: {description: d}, labels: {severity: s}}
  - name: bad
    rules:
      - {alert: B, expr: x, annotations: {description: d}}
";
            let (group, rule, _) = missing_field(parse_str(yaml).unwrap_err());
            assert_eq!(group, "bad");
            assert_eq!(rule, "B");
        }
    }

    mod type_errors {
        use super::*;
        use test_case::test_case;

        fn invalid_field(err: ValidationError) -> (String, String, &'static str) {
            match err {
                ValidationError::InvalidField { group, rule, field, .. } => (group, rule, field),
                other => panic!("expected InvalidField, got {other:?}"),
            }
        }

        #[test_case("{alert: DiskFull, expr: x, annotations: Disk nearly full, labels: {severity: s}}", "DiskFull", "annotations" ; "string annotations")]
        #[test_case("{alert: DiskFull, expr: x, annotations: {description: d}, labels: [critical]}", "DiskFull", "labels" ; "list labels")]
        #[test_case("{alert: DiskFull, expr: [x], annotations: {description: d}, labels: {severity: s}}", "DiskFull", "expr" ; "list expr")]
        #[test_case("{alert: DiskFull, expr: true, annotations: {description: d}, labels: {severity: s}}", "DiskFull", "expr" ; "boolean expr")]
        #[test_case("{alert: DiskFull, expr: x, annotations: {description: {text: d}}, labels: {severity: s}}", "DiskFull", "annotations.description" ; "mapping description")]
        #[test_case("{alert: DiskFull, expr: x, annotations: {description: d}, labels: {severity: [a]}}", "DiskFull", "labels.severity" ; "list severity")]
        #[test_case("{alert: [DiskFull], expr: x, annotations: {description: d}, labels: {severity: s}}", "#1", "alert" ; "list alert")]
        fn mistyped_rule_field(rule: &str, expected_rule: &str, expected_field: &str) {
            let yaml = format!("groups:\n  - name: disk\n    rules:\n      - {rule}\n");
            let (group, rule, field) = invalid_field(parse_str(&yaml).unwrap_err());
            assert_eq!(group, "disk");
            assert_eq!(rule, expected_rule);
            assert_eq!(field, expected_field);
        }

        #[test]
        fn mistyped_field_message_names_group_and_rule() {
            let yaml = r"
groups:
  - name: disk
    rules:
      - alert: DiskFull
        expr: disk_free < 10
        annotations: Disk nearly full
        labels:
          severity: critical
";
            let message = parse_str(yaml).unwrap_err().to_string();
            assert_eq!(
                message,
                "rule 'DiskFull' in group 'disk' has invalid field 'annotations': \
                 expected a mapping, found a string"
            );
        }

        #[test_case("groups:\n  - name: g\n    rules: [~]\n", "#1", "expected a mapping, found null" ; "null rule")]
        #[test_case("groups:\n  - name: g\n    rules:\n      - {alert: A, expr: x, annotations: {description: d}, labels: {severity: s}}\n      - HighCPU\n", "#2", "expected a mapping, found a string" ; "scalar rule")]
        fn rule_not_a_mapping(yaml: &str, expected_rule: &str, expected_reason: &str) {
            match parse_str(yaml).unwrap_err() {
                ValidationError::InvalidRule { group, rule, reason } => {
                    assert_eq!(group, "g");
                    assert_eq!(rule, expected_rule);
                    assert_eq!(reason, expected_reason);
                }
                other => panic!("expected InvalidRule, got {other:?}"),
            }
        }

        #[test_case("groups: [disk]", "#1" ; "scalar group")]
        #[test_case("groups:\n  - name: [disk]\n    rules: []\n", "#1" ; "list name")]
        #[test_case("groups:\n  - name: disk\n    rules: DiskFull\n", "disk" ; "scalar rules")]
        fn mistyped_group(yaml: &str, expected_group: &str) {
            match parse_str(yaml).unwrap_err() {
                ValidationError::InvalidGroup { group, .. } => assert_eq!(group, expected_group),
                other => panic!("expected InvalidGroup, got {other:?}"),
            }
        }
    }
}
