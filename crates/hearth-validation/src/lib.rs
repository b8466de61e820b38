#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # hearth-validation
//!
//! Validation pipeline for maintainable items, properties, and maintenance
//! logs.
//!
//! Untrusted JSON is checked against the base or a subtype's narrowed schema.
//! Structural failures never surface as `Err`; they come back as a
//! [`ValidationResult::Failure`] holding every message keyed by dotted field
//! path, ready to render next to form fields or return from an API handler.
//!
//! ## Example Usage
//!
//! ```rust
//! use hearth_validation::{ValidationEngine, ValidationResult};
//! use serde_json::json;
//!
//! let engine = ValidationEngine::new();
//!
//! let input = json!({
//!     "type": "appliance",
//!     "subtype": "dishwasher",
//!     "label": "Dishwasher",
//!     "metadata": {"brand": "Samsung"}
//! });
//! assert!(engine.validate_typed(&input, "dishwasher").is_success());
//!
//! let result = engine.validate_typed(&input, "not-a-real-subtype");
//! assert!(result.errors().unwrap().contains("subtype"));
//! ```

pub mod engine;
pub mod reporter;
pub mod rules;
pub mod session;

// Re-export main types
pub use engine::{StrictnessLevel, ValidationConfig, ValidationEngine, ValidationResult};
pub use reporter::{FieldErrors, IssueCode, ROOT_KEY, ValidationIssue, ValidationReporter};
pub use rules::{
    RuleResult, describe_mismatch, validate_enum, validate_iso_date, validate_length,
    validate_literal, validate_pattern,
};
pub use session::OnboardingSession;

use hearth_model::{MaintainableData, MaintenanceLog, Property};
use serde_json::Value;
use thiserror::Error;

/// Errors from onboarding sessions and registry lookups
#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema error: {0}")]
    Schema(#[from] hearth_schema::Error),

    #[error("Question '{0}' must be answered before continuing")]
    AnswerRequired(String),

    #[error("Question '{0}' cannot be skipped")]
    NotSkippable(String),

    #[error("Onboarding is finished; there is no current question")]
    NoCurrentQuestion,

    #[error("Onboarding is not finished: {0} question(s) remain")]
    Incomplete(usize),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Validate against the base schema with default settings
#[must_use]
pub fn validate_base(data: &Value) -> ValidationResult<MaintainableData> {
    ValidationEngine::new().validate_base(data)
}

/// Validate against a built-in subtype's schema with default settings
#[must_use]
pub fn validate_typed(data: &Value, subtype: &str) -> ValidationResult<MaintainableData> {
    ValidationEngine::new().validate_typed(data, subtype)
}

#[must_use]
pub fn is_valid_base(data: &Value) -> bool {
    ValidationEngine::new().is_valid_base(data)
}

#[must_use]
pub fn is_valid_typed(data: &Value, subtype: &str) -> bool {
    ValidationEngine::new().is_valid_typed(data, subtype)
}

/// Validate a `metadata` value on its own against a built-in subtype
#[must_use]
pub fn validate_metadata(metadata: &Value, subtype: &str) -> ValidationResult<Value> {
    ValidationEngine::new().validate_metadata(metadata, subtype)
}

#[must_use]
pub fn validate_property(data: &Value) -> ValidationResult<Property> {
    ValidationEngine::new().validate_property(data)
}

#[must_use]
pub fn validate_maintenance_log(data: &Value) -> ValidationResult<MaintenanceLog> {
    ValidationEngine::new().validate_maintenance_log(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convenience_validate_typed() {
        let input = json!({"type": "system", "subtype": "heat", "metadata": {"fuel": "oil"}});
        assert!(is_valid_typed(&input, "heat"));
        assert!(!is_valid_typed(&input, "cooling"));
        assert!(is_valid_base(&input));
    }

    #[test]
    fn test_convenience_validate_base() {
        let result = validate_base(&json!({"type": "spaceship", "subtype": "x"}));
        assert!(result.errors().unwrap().contains("type"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::AnswerRequired("metadata.fuel".into()).to_string(),
            "Question 'metadata.fuel' must be answered before continuing"
        );
        let err: Error = hearth_schema::Error::UnknownSubtype("boat".into()).into();
        assert_eq!(err.to_string(), "Schema error: Unknown subtype: boat");
    }
}
