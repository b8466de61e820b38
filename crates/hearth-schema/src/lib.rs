//! # hearth-schema
//!
//! Schema model, subtype registry, and onboarding metadata for maintainable
//! items.
//!
//! Every maintainable item satisfies the base schema. Each registered subtype
//! narrows `type`/`subtype` to literals and declares the legal shape of
//! `metadata`. Presentation metadata for onboarding wizards lives in a
//! side-table keyed by field identity, so schemas stay free of UI concerns:
//!
//! ```rust
//! use hearth_schema::{extract_questions, registry};
//!
//! let schema = registry::global().resolve("heat").unwrap();
//! let questions = extract_questions(schema);
//! assert_eq!(questions.len(), 7);
//! ```

pub mod base;
pub mod inheritance;
pub mod loader;
pub mod model;
pub mod onboarding;
pub mod questions;
pub mod records;
pub mod registry;
pub mod subtypes;

pub use loader::SubtypeLoader;
pub use model::{Check, FieldDefinition, FieldId, ObjectSchema, Rule, SchemaKind};
pub use onboarding::{
    AnnotationTable, ConditionalRule, OnboardingMetadata, QuestionOption, attach, attach_json,
    lookup,
};
pub use questions::{InputKind, Question, extract_questions, extract_questions_with};
pub use registry::{SubtypeRegistry, SubtypeSchemaEntry};
pub use subtypes::SubtypeBuilder;

use thiserror::Error;

/// Errors that can occur when working with schemas
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown subtype: {0}")]
    UnknownSubtype(String),

    #[error("Invalid onboarding metadata: {0}")]
    InvalidOnboardingMetadata(String),

    #[error("Invalid schema format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
