//! Declarative per-field validation rules
//!
//! A rule set is applied to a raw field map and produces an ordered list
//! of violations. Pure: no side effects, no short-circuiting between
//! rules.

use chrono::NaiveDate;
use serde::Serialize;

use super::FieldMap;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// Constraint applied to one field's trimmed value
#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// Fails when the value is empty or whitespace-only
    NotEmpty,
    /// Fails when any non-alphanumeric character remains; an empty value
    /// passes (emptiness is NotEmpty's concern)
    Alphanumeric,
    /// Fails when a non-empty value is not a YYYY-MM-DD date; empty
    /// values are skipped entirely
    IsoDate,
    /// Fails when a non-empty value's length falls outside [min, max]
    LengthRange { min: usize, max: usize },
}

/// One declarative constraint: field, check, message on failure
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

impl Rule {
    pub const fn new(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            field,
            check,
            message,
        }
    }
}

/// Apply a rule set to a raw field map, producing violations in rule
/// order. A field absent from the map is treated as empty.
pub fn validate(fields: &FieldMap, rules: &[Rule]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for rule in rules {
        let value = fields
            .get(rule.field)
            .map(|raw| raw.trim())
            .unwrap_or_default();

        let failed = match rule.check {
            Check::NotEmpty => value.is_empty(),
            Check::Alphanumeric => !value.chars().all(char::is_alphanumeric),
            Check::IsoDate => {
                !value.is_empty() && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err()
            }
            Check::LengthRange { min, max } => {
                let len = value.chars().count();
                !value.is_empty() && (len < min || len > max)
            }
        };

        if failed {
            violations.push(Violation {
                field: rule.field.to_string(),
                message: rule.message.to_string(),
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const NAME_RULES: &[Rule] = &[
        Rule::new("name", Check::NotEmpty, "Name required"),
        Rule::new("name", Check::Alphanumeric, "Name has non-alphanumeric characters"),
    ];

    #[test]
    fn test_not_empty_rejects_whitespace() {
        let violations = validate(&fields(&[("name", "   ")]), NAME_RULES);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "name");
        assert_eq!(violations[0].message, "Name required");
    }

    #[test]
    fn test_missing_field_treated_as_empty() {
        let violations = validate(&IndexMap::new(), NAME_RULES);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Name required");
    }

    #[test]
    fn test_alphanumeric_runs_independently_of_not_empty() {
        // non-empty but not alphanumeric: exactly the second rule fires
        let violations = validate(&fields(&[("name", "Jane!")]), NAME_RULES);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Name has non-alphanumeric characters");
    }

    #[test]
    fn test_valid_value_passes_both() {
        assert!(validate(&fields(&[("name", "  Jane  ")]), NAME_RULES).is_empty());
    }

    #[test]
    fn test_iso_date_skipped_when_empty() {
        let rules = &[Rule::new("born", Check::IsoDate, "Invalid date")];
        assert!(validate(&fields(&[("born", "")]), rules).is_empty());
        assert!(validate(&fields(&[("born", "1775-12-16")]), rules).is_empty());

        let violations = validate(&fields(&[("born", "16/12/1775")]), rules);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Invalid date");

        // a well-formed pattern with an impossible date still fails
        assert_eq!(validate(&fields(&[("born", "2001-02-30")]), rules).len(), 1);
    }

    #[test]
    fn test_length_range() {
        let rules = &[Rule::new(
            "name",
            Check::LengthRange { min: 3, max: 100 },
            "Name must be between 3 and 100 characters",
        )];
        assert_eq!(validate(&fields(&[("name", "ab")]), rules).len(), 1);
        assert!(validate(&fields(&[("name", "abc")]), rules).is_empty());
        let at_limit = "x".repeat(100);
        assert!(validate(&fields(&[("name", at_limit.as_str())]), rules).is_empty());
        let over_limit = "x".repeat(101);
        assert_eq!(validate(&fields(&[("name", over_limit.as_str())]), rules).len(), 1);
        // emptiness is NotEmpty's concern, not a length failure
        assert!(validate(&fields(&[("name", "")]), rules).is_empty());
    }

    #[test]
    fn test_violations_preserve_rule_order() {
        let rules = &[
            Rule::new("first", Check::NotEmpty, "first missing"),
            Rule::new("second", Check::NotEmpty, "second missing"),
        ];
        let violations = validate(&fields(&[("first", ""), ("second", "")]), rules);
        assert_eq!(violations[0].message, "first missing");
        assert_eq!(violations[1].message, "second missing");
    }
}
