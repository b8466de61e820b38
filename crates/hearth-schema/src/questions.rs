//! Onboarding question extraction
//!
//! Walks a schema's top-level fields, plus one level into `metadata`, and
//! turns every annotated, non-skipped field into a [`Question`] ordered by the
//! annotation's `order`. Extraction only reads the annotation table.

use crate::model::{FieldDefinition, ObjectSchema, SchemaKind};
use crate::onboarding::{AnnotationTable, OnboardingMetadata, annotations};
use serde_json::{Map, Value};
use tracing::trace;

/// Name of the nested object whose fields are exposed as questions
pub const METADATA_FIELD: &str = "metadata";

/// How a consumer should render a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Pick one of the annotation's options
    Choice,
    /// Free text with long help, rendered as a text area
    Multiline,
    Number,
    Toggle,
    Text,
}

impl InputKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Choice => "choice",
            InputKind::Multiline => "multiline",
            InputKind::Number => "number",
            InputKind::Toggle => "toggle",
            InputKind::Text => "text",
        }
    }
}

/// One question in an onboarding sequence
#[derive(Debug, Clone)]
pub struct Question {
    /// Dotted field path, e.g. `metadata.fuel`
    pub field: String,
    pub schema: FieldDefinition,
    pub metadata: OnboardingMetadata,
}

impl Question {
    /// Rendering hint derived from the annotation and the field kind
    #[must_use]
    pub fn input_kind(&self) -> InputKind {
        if self.metadata.options.is_some() {
            return InputKind::Choice;
        }
        if self.metadata.wants_multiline() {
            return InputKind::Multiline;
        }
        match self.schema.kind() {
            SchemaKind::Number => InputKind::Number,
            SchemaKind::Boolean => InputKind::Toggle,
            _ => InputKind::Text,
        }
    }

    /// Whether the question is shown given the answers so far, keyed by dotted path
    #[must_use]
    pub fn is_visible(&self, answers: &Map<String, Value>) -> bool {
        self.metadata
            .conditional
            .as_ref()
            .is_none_or(|rule| rule.matches(answers.get(&rule.field)))
    }

    /// Must be answered before advancing
    #[must_use]
    pub fn blocks_advance(&self) -> bool {
        self.metadata.required && !self.metadata.skipable
    }
}

/// Extract questions using the process-wide annotation table
#[must_use]
pub fn extract_questions(schema: &ObjectSchema) -> Vec<Question> {
    extract_questions_with(schema, annotations())
}

/// Extract questions using a specific annotation table
#[must_use]
pub fn extract_questions_with(schema: &ObjectSchema, table: &AnnotationTable) -> Vec<Question> {
    let mut questions = Vec::new();

    for (name, definition) in schema.fields() {
        collect(name.to_string(), definition, table, &mut questions);

        if name == METADATA_FIELD {
            if let Some(nested) = definition.as_object() {
                for (child, child_definition) in nested.fields() {
                    collect(
                        format!("{METADATA_FIELD}.{child}"),
                        child_definition,
                        table,
                        &mut questions,
                    );
                }
            }
        }
    }

    // Stable: equal orders keep discovery order.
    questions.sort_by_key(|q| q.metadata.order);
    questions
}

fn collect(
    path: String,
    definition: &FieldDefinition,
    table: &AnnotationTable,
    out: &mut Vec<Question>,
) {
    match table.lookup(definition) {
        Some(metadata) if metadata.skip => {
            trace!("Skipping field '{}'", path);
        }
        Some(metadata) => out.push(Question {
            field: path,
            schema: definition.clone(),
            metadata,
        }),
        None => {}
    }
}
