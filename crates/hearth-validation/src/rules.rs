//! Validation rules
//!
//! Each function evaluates one [`Check`] against an already type-matched value
//! and returns a [`RuleResult`] carrying the default message on failure. The
//! engine swaps in a rule's custom message when one is set.

use chrono::NaiveDate;
use hearth_model::ValueKind;
use hearth_schema::Check;
use hearth_schema::model::quote_choices;
use regex::Regex;
use serde_json::Value;

/// Validation rule result
#[derive(Debug, Clone)]
pub struct RuleResult {
    pub is_valid: bool,
    pub message: Option<String>,
}

impl RuleResult {
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }
}

/// Message for a value of the wrong kind, e.g. `Expected string, received undefined`
#[must_use]
pub fn describe_mismatch(expected: &str, received: ValueKind) -> String {
    format!("Expected {expected}, received {received}")
}

/// Validate a check against a string value
#[must_use]
pub fn validate_string_check(value: &str, check: &Check) -> RuleResult {
    match check {
        Check::MinLength(_) | Check::MaxLength(_) => {
            validate_length(value.chars().count(), check, "String", "character")
        }
        Check::Pattern(pattern) => validate_pattern(value, pattern),
        Check::IsoDate => validate_iso_date(value),
        Check::Min(_) | Check::Max(_) | Check::Positive | Check::Integer => RuleResult::valid(),
    }
}

/// Validate a check against a number
#[must_use]
pub fn validate_number_check(value: f64, check: &Check) -> RuleResult {
    match check {
        Check::Min(min) if value < *min => RuleResult::invalid(format!(
            "Number must be greater than or equal to {min}"
        )),
        Check::Max(max) if value > *max => {
            RuleResult::invalid(format!("Number must be less than or equal to {max}"))
        }
        Check::Positive if value <= 0.0 => RuleResult::invalid("Number must be greater than 0"),
        Check::Integer if value.fract() != 0.0 => {
            RuleResult::invalid("Expected integer, received float")
        }
        _ => RuleResult::valid(),
    }
}

/// Validate a length check against an array's element count
#[must_use]
pub fn validate_array_check(len: usize, check: &Check) -> RuleResult {
    validate_length(len, check, "Array", "element")
}

/// Validate length constraints
#[must_use]
pub fn validate_length(len: usize, check: &Check, subject: &str, unit: &str) -> RuleResult {
    match check {
        Check::MinLength(min) if len < *min => RuleResult::invalid(format!(
            "{subject} must contain at least {min} {unit}(s)"
        )),
        Check::MaxLength(max) if len > *max => RuleResult::invalid(format!(
            "{subject} must contain at most {max} {unit}(s)"
        )),
        _ => RuleResult::valid(),
    }
}

/// Validate pattern matching using regex
#[must_use]
pub fn validate_pattern(value: &str, pattern: &str) -> RuleResult {
    match Regex::new(pattern) {
        Ok(re) => {
            if re.is_match(value) {
                RuleResult::valid()
            } else {
                RuleResult::invalid(format!(
                    "Value '{value}' does not match pattern '{pattern}'"
                ))
            }
        }
        Err(e) => RuleResult::invalid(format!("Invalid regex pattern '{pattern}': {e}")),
    }
}

/// Validate a `YYYY-MM-DD` calendar date
#[must_use]
pub fn validate_iso_date(value: &str) -> RuleResult {
    // chrono accepts unpadded months and days; the stored form must be padded.
    if value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        RuleResult::valid()
    } else {
        RuleResult::invalid(format!(
            "Invalid date '{value}', expected YYYY-MM-DD"
        ))
    }
}

/// Validate membership in an enum
#[must_use]
pub fn validate_enum(value: &str, values: &[String]) -> RuleResult {
    if values.iter().any(|v| v == value) {
        RuleResult::valid()
    } else {
        RuleResult::invalid(format!(
            "Invalid enum value. Expected {}, received '{value}'",
            quote_choices(values)
        ))
    }
}

/// Validate a literal of any kind of value
#[must_use]
pub fn validate_literal(value: &Value, expected: &str) -> RuleResult {
    if value.as_str() == Some(expected) {
        RuleResult::valid()
    } else {
        RuleResult::invalid(format!("Invalid literal value, expected \"{expected}\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_length_constraints() {
        assert!(validate_string_check("hello", &Check::MinLength(3)).is_valid);
        assert!(validate_string_check("abc", &Check::MinLength(3)).is_valid);
        assert!(!validate_string_check("ab", &Check::MinLength(3)).is_valid);
        assert!(validate_string_check("0123456789", &Check::MaxLength(10)).is_valid);
        assert!(!validate_string_check("this is way too long", &Check::MaxLength(10)).is_valid);
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(validate_string_check("héllo", &Check::MaxLength(5)).is_valid);
    }

    #[test]
    fn test_empty_string_fails_min_length() {
        let result = validate_string_check("", &Check::MinLength(1));
        assert_eq!(
            result.message.as_deref(),
            Some("String must contain at least 1 character(s)")
        );
    }

    #[test]
    fn test_array_length() {
        let result = validate_array_check(4, &Check::MaxLength(3));
        assert_eq!(
            result.message.as_deref(),
            Some("Array must contain at most 3 element(s)")
        );
        assert!(validate_array_check(3, &Check::MaxLength(3)).is_valid);
    }

    #[test]
    fn test_number_bounds_are_inclusive() {
        assert!(validate_number_check(1_000_000.0, &Check::Max(1_000_000.0)).is_valid);
        let over = validate_number_check(1_000_001.0, &Check::Max(1_000_000.0));
        assert_eq!(
            over.message.as_deref(),
            Some("Number must be less than or equal to 1000000")
        );
        assert!(validate_number_check(0.0, &Check::Min(0.0)).is_valid);
        assert!(!validate_number_check(-0.5, &Check::Min(0.0)).is_valid);
    }

    #[test]
    fn test_positive_and_integer() {
        assert!(!validate_number_check(0.0, &Check::Positive).is_valid);
        assert!(validate_number_check(0.1, &Check::Positive).is_valid);
        assert!(validate_number_check(3.0, &Check::Integer).is_valid);
        assert!(!validate_number_check(3.5, &Check::Integer).is_valid);
    }

    #[test]
    fn test_pattern_matching() {
        assert!(validate_pattern("12345", r"^\d{5}(-\d{4})?$").is_valid);
        assert!(validate_pattern("12345-6789", r"^\d{5}(-\d{4})?$").is_valid);
        assert!(!validate_pattern("1234", r"^\d{5}(-\d{4})?$").is_valid);
    }

    #[test]
    fn test_invalid_pattern() {
        let result = validate_pattern("test", "[invalid");
        assert!(!result.is_valid);
        assert!(result.message.unwrap().contains("Invalid regex pattern"));
    }

    #[test]
    fn test_iso_date() {
        assert!(validate_iso_date("2024-02-29").is_valid);
        assert!(!validate_iso_date("2023-02-29").is_valid);
        assert!(!validate_iso_date("2024-3-1").is_valid);
        assert!(!validate_iso_date("03/01/2024").is_valid);
    }

    #[test]
    fn test_enum_message_names_received_value() {
        let values = vec!["gas".to_string(), "oil".to_string()];
        assert!(validate_enum("gas", &values).is_valid);
        let result = validate_enum("coal", &values);
        assert_eq!(
            result.message.as_deref(),
            Some("Invalid enum value. Expected 'gas' | 'oil', received 'coal'")
        );
    }

    #[test]
    fn test_literal() {
        assert!(validate_literal(&json!("heat"), "heat").is_valid);
        assert!(!validate_literal(&json!("cooling"), "heat").is_valid);
        assert!(!validate_literal(&json!(1), "heat").is_valid);
    }

    #[test]
    fn test_mismatch_message() {
        assert_eq!(
            describe_mismatch("string", ValueKind::Undefined),
            "Expected string, received undefined"
        );
    }
}
