//! Onboarding annotations
//!
//! Presentation metadata for onboarding wizards is stored beside the schema,
//! not inside it: an [`AnnotationTable`] maps a [`FieldId`] to its
//! [`OnboardingMetadata`]. Attaching never changes how a field validates.
//!
//! Metadata is checked when it is attached. A malformed annotation is an
//! authoring mistake in a subtype definition and is rejected immediately.

use crate::model::{FieldDefinition, FieldId};
use crate::{Error, Result};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Help text longer than this is shown in a multi-line input
pub const MULTILINE_HELP_THRESHOLD: usize = 100;

/// One choice of a choice-style question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
}

impl QuestionOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Show a question only while another field holds a matching value.
///
/// `value` matches by equality; an array `value` matches any of its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalRule {
    /// Dotted path of the governing field, e.g. `metadata.style`
    pub field: String,
    pub value: Value,
}

impl ConditionalRule {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether the governing field's current value satisfies the rule
    #[must_use]
    pub fn matches(&self, current: Option<&Value>) -> bool {
        let Some(current) = current else {
            return false;
        };
        match &self.value {
            Value::Array(accepted) => accepted.contains(current),
            expected => expected == current,
        }
    }
}

/// Per-field onboarding annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingMetadata {
    /// Position in the question sequence
    pub order: u32,

    /// Must be answered before the wizard advances
    pub required: bool,

    pub question: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<QuestionOption>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skipable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<ConditionalRule>,

    /// Exclude the field from extracted questions entirely
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skip: bool,
}

impl OnboardingMetadata {
    pub fn new(order: u32, required: bool, question: impl Into<String>) -> Self {
        Self {
            order,
            required,
            question: question.into(),
            options: None,
            help_text: None,
            skipable: false,
            default_value: None,
            conditional: None,
            skip: false,
        }
    }

    #[must_use]
    pub fn options(mut self, options: Vec<QuestionOption>) -> Self {
        self.options = Some(options);
        self
    }

    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn skipable(mut self) -> Self {
        self.skipable = true;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn conditional(mut self, rule: ConditionalRule) -> Self {
        self.conditional = Some(rule);
        self
    }

    #[must_use]
    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Check the structural contract of the annotation
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOnboardingMetadata`] when the question text is
    /// blank, the option list is empty or has blank or repeated values, or the
    /// conditional rule names no field.
    pub fn validate(&self) -> Result<()> {
        if self.question.trim().is_empty() {
            return Err(invalid(format!(
                "question text is empty (order {})",
                self.order
            )));
        }

        if let Some(options) = &self.options {
            if options.is_empty() {
                return Err(invalid(format!(
                    "'{}' declares an empty option list",
                    self.question
                )));
            }
            let mut seen = HashSet::new();
            for option in options {
                if option.value.trim().is_empty() || option.label.trim().is_empty() {
                    return Err(invalid(format!(
                        "'{}' has an option with a blank value or label",
                        self.question
                    )));
                }
                if !seen.insert(option.value.as_str()) {
                    return Err(invalid(format!(
                        "'{}' repeats option value '{}'",
                        self.question, option.value
                    )));
                }
            }
        }

        if let Some(rule) = &self.conditional {
            if rule.field.trim().is_empty() {
                return Err(invalid(format!(
                    "'{}' has a conditional rule without a field",
                    self.question
                )));
            }
        }

        Ok(())
    }

    /// Parse and check an annotation given as loose JSON
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOnboardingMetadata`] when `order`, `required`
    /// or `question` is missing or mistyped, or [`Self::validate`] fails.
    pub fn from_json(value: Value) -> Result<Self> {
        let metadata: Self = serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Help text is long enough to warrant a multi-line input
    #[must_use]
    pub fn wants_multiline(&self) -> bool {
        self.help_text
            .as_ref()
            .is_some_and(|text| text.chars().count() > MULTILINE_HELP_THRESHOLD)
    }
}

fn invalid(reason: String) -> Error {
    Error::InvalidOnboardingMetadata(reason)
}

/// Side-table from field identity to onboarding metadata
#[derive(Debug, Default)]
pub struct AnnotationTable {
    entries: DashMap<FieldId, OnboardingMetadata>,
}

impl AnnotationTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach metadata to `field`, returning the field unchanged.
    ///
    /// Attaching again to the same field replaces the earlier annotation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOnboardingMetadata`] if `metadata` fails
    /// [`OnboardingMetadata::validate`]; nothing is stored in that case.
    pub fn attach(
        &self,
        field: FieldDefinition,
        metadata: OnboardingMetadata,
    ) -> Result<FieldDefinition> {
        metadata.validate()?;
        trace!(
            "Annotating field #{} with question '{}'",
            field.id().get(),
            metadata.question
        );
        if self.entries.insert(field.id(), metadata).is_some() {
            debug!("Replaced annotation on field #{}", field.id().get());
        }
        Ok(field)
    }

    /// Attach metadata given as loose JSON
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOnboardingMetadata`] if the JSON does not
    /// describe valid onboarding metadata.
    pub fn attach_json(&self, field: FieldDefinition, metadata: Value) -> Result<FieldDefinition> {
        let metadata = OnboardingMetadata::from_json(metadata)?;
        self.attach(field, metadata)
    }

    /// Metadata previously attached to this exact field
    #[must_use]
    pub fn lookup(&self, field: &FieldDefinition) -> Option<OnboardingMetadata> {
        self.entries.get(&field.id()).map(|entry| entry.value().clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static ANNOTATIONS: LazyLock<AnnotationTable> = LazyLock::new(AnnotationTable::new);

/// The process-wide annotation table
#[must_use]
pub fn annotations() -> &'static AnnotationTable {
    &ANNOTATIONS
}

/// Attach metadata in the process-wide table
///
/// # Errors
///
/// See [`AnnotationTable::attach`].
pub fn attach(field: FieldDefinition, metadata: OnboardingMetadata) -> Result<FieldDefinition> {
    annotations().attach(field, metadata)
}

/// Attach loose JSON metadata in the process-wide table
///
/// # Errors
///
/// See [`AnnotationTable::attach_json`].
pub fn attach_json(field: FieldDefinition, metadata: Value) -> Result<FieldDefinition> {
    annotations().attach_json(field, metadata)
}

/// Look up metadata in the process-wide table
#[must_use]
pub fn lookup(field: &FieldDefinition) -> Option<OnboardingMetadata> {
    annotations().lookup(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attach_returns_same_field() {
        let table = AnnotationTable::new();
        let field = FieldDefinition::string().max_length(100);
        let id = field.id();

        let field = table
            .attach(field, OnboardingMetadata::new(1, true, "Name?"))
            .unwrap();

        assert_eq!(field.id(), id);
        assert_eq!(field.rules().len(), 1);
        assert_eq!(table.lookup(&field).unwrap().question, "Name?");
    }

    #[test]
    fn test_lookup_unannotated_is_none() {
        let table = AnnotationTable::new();
        assert!(table.lookup(&FieldDefinition::string()).is_none());
    }

    #[test]
    fn test_lookup_follows_identity_not_shape() {
        let table = AnnotationTable::new();
        let annotated = table
            .attach(
                FieldDefinition::string(),
                OnboardingMetadata::new(1, false, "Q"),
            )
            .unwrap();
        let lookalike = FieldDefinition::string();

        assert!(table.lookup(&annotated.clone()).is_some());
        assert!(table.lookup(&lookalike).is_none());
    }

    #[test]
    fn test_attach_rejects_blank_question() {
        let table = AnnotationTable::new();
        let err = table
            .attach(FieldDefinition::string(), OnboardingMetadata::new(1, true, "  "))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOnboardingMetadata(_)));
        assert!(table.is_empty());
    }

    #[test]
    fn test_attach_rejects_duplicate_option_values() {
        let metadata = OnboardingMetadata::new(1, true, "Fuel?").options(vec![
            QuestionOption::new("gas", "Gas"),
            QuestionOption::new("gas", "Natural gas"),
        ]);
        assert!(metadata.validate().is_err());
    }

    #[test]
    fn test_attach_json_requires_core_keys() {
        let table = AnnotationTable::new();
        for bad in [
            json!({"required": true, "question": "Q"}),
            json!({"order": 1, "question": "Q"}),
            json!({"order": 1, "required": true}),
        ] {
            let err = table.attach_json(FieldDefinition::string(), bad).unwrap_err();
            assert!(matches!(err, Error::InvalidOnboardingMetadata(_)));
        }
        assert!(table.is_empty());
    }

    #[test]
    fn test_attach_json_reads_camel_case() {
        let table = AnnotationTable::new();
        let field = table
            .attach_json(
                FieldDefinition::number(),
                json!({
                    "order": 3,
                    "required": false,
                    "question": "How big?",
                    "helpText": "Gallons",
                    "skipable": true,
                    "defaultValue": 50,
                }),
            )
            .unwrap();
        let metadata = table.lookup(&field).unwrap();
        assert_eq!(metadata.help_text.as_deref(), Some("Gallons"));
        assert!(metadata.skipable);
        assert_eq!(metadata.default_value, Some(json!(50)));
        assert!(!metadata.skip);
    }

    #[test]
    fn test_reattach_replaces() {
        let table = AnnotationTable::new();
        let field = table
            .attach(FieldDefinition::string(), OnboardingMetadata::new(1, true, "A"))
            .unwrap();
        let field = table
            .attach(field, OnboardingMetadata::new(2, true, "B"))
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(&field).unwrap().question, "B");
    }

    #[test]
    fn test_conditional_matching() {
        let single = ConditionalRule::new("metadata.style", "tank");
        assert!(single.matches(Some(&json!("tank"))));
        assert!(!single.matches(Some(&json!("tankless"))));
        assert!(!single.matches(None));

        let any_of = ConditionalRule::new("metadata.fuel", json!(["oil", "propane"]));
        assert!(any_of.matches(Some(&json!("oil"))));
        assert!(!any_of.matches(Some(&json!("gas"))));
    }

    #[test]
    fn test_multiline_threshold() {
        let short = OnboardingMetadata::new(1, false, "Q").help_text("short");
        let long = OnboardingMetadata::new(1, false, "Q").help_text("x".repeat(101));
        let exact = OnboardingMetadata::new(1, false, "Q").help_text("x".repeat(100));
        assert!(!short.wants_multiline());
        assert!(long.wants_multiline());
        assert!(!exact.wants_multiline());
    }

    #[test]
    fn test_global_attach_and_lookup() {
        let field = attach(
            FieldDefinition::boolean(),
            OnboardingMetadata::new(7, false, "Ice maker?"),
        )
        .unwrap();
        assert_eq!(lookup(&field).unwrap().order, 7);
    }
}
