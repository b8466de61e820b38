//! Schema model definitions
//!
//! A [`FieldDefinition`] describes what one value must look like. Each
//! definition carries a [`FieldId`] allocated when it is constructed. Cloning
//! keeps the id, so a field reused inside a composed or extended schema is
//! still the same field for annotation lookups, while two separately built
//! fields with identical rules are distinct.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity of a field definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u64);

impl FieldId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, for logging
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Structural kind of a field
#[derive(Debug, Clone)]
pub enum SchemaKind {
    String,
    Number,
    Boolean,
    /// Exactly this string
    Literal(String),
    /// One of these strings
    Enum(Vec<String>),
    /// Homogeneous list
    Array(Box<FieldDefinition>),
    /// Nested object with its own declared fields
    Object(ObjectSchema),
    /// Any JSON-compatible value, unconstrained
    Json,
}

impl SchemaKind {
    /// Short description of the expected input, used in type mismatch messages
    #[must_use]
    pub fn expected(&self) -> String {
        match self {
            SchemaKind::String => "string".to_string(),
            SchemaKind::Number => "number".to_string(),
            SchemaKind::Boolean => "boolean".to_string(),
            SchemaKind::Literal(value) => format!("'{value}'"),
            SchemaKind::Enum(values) => quote_choices(values),
            SchemaKind::Array(_) => "array".to_string(),
            SchemaKind::Object(_) => "object".to_string(),
            SchemaKind::Json => "json".to_string(),
        }
    }
}

/// Render enum members as `'a' | 'b' | 'c'`
#[must_use]
pub fn quote_choices(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Refinement applied after the kind matches
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// Minimum string length in characters, or minimum array length
    MinLength(usize),
    /// Maximum string length in characters, or maximum array length
    MaxLength(usize),
    /// Inclusive lower bound
    Min(f64),
    /// Inclusive upper bound
    Max(f64),
    /// Strictly greater than zero
    Positive,
    /// Whole number
    Integer,
    /// Regular expression the string must match
    Pattern(String),
    /// Calendar date in `YYYY-MM-DD` form
    IsoDate,
}

/// A check plus the message to report when it fails
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub check: Check,
    /// Overrides the default message
    pub message: Option<String>,
}

/// Definition of a single field
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    id: FieldId,
    kind: SchemaKind,
    rules: Vec<Rule>,
    optional: bool,
    description: Option<String>,
}

impl FieldDefinition {
    /// Create a required field of the given kind
    #[must_use]
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            id: FieldId::next(),
            kind,
            rules: Vec::new(),
            optional: false,
            description: None,
        }
    }

    #[must_use]
    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    #[must_use]
    pub fn number() -> Self {
        Self::new(SchemaKind::Number)
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::new(SchemaKind::Literal(value.into()))
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(SchemaKind::Enum(values.into_iter().map(Into::into).collect()))
    }

    #[must_use]
    pub fn array(item: FieldDefinition) -> Self {
        Self::new(SchemaKind::Array(Box::new(item)))
    }

    #[must_use]
    pub fn object(schema: ObjectSchema) -> Self {
        Self::new(SchemaKind::Object(schema))
    }

    #[must_use]
    pub fn json() -> Self {
        Self::new(SchemaKind::Json)
    }

    /// Allow the field to be absent
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a check
    #[must_use]
    pub fn check(mut self, check: Check) -> Self {
        self.rules.push(Rule {
            check,
            message: None,
        });
        self
    }

    /// Replace the message of the most recently added check
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if let Some(rule) = self.rules.last_mut() {
            rule.message = Some(message.into());
        }
        self
    }

    #[must_use]
    pub fn min_length(self, len: usize) -> Self {
        self.check(Check::MinLength(len))
    }

    #[must_use]
    pub fn max_length(self, len: usize) -> Self {
        self.check(Check::MaxLength(len))
    }

    #[must_use]
    pub fn min(self, bound: f64) -> Self {
        self.check(Check::Min(bound))
    }

    #[must_use]
    pub fn max(self, bound: f64) -> Self {
        self.check(Check::Max(bound))
    }

    #[must_use]
    pub fn positive(self) -> Self {
        self.check(Check::Positive)
    }

    #[must_use]
    pub fn int(self) -> Self {
        self.check(Check::Integer)
    }

    #[must_use]
    pub fn pattern(self, regex: impl Into<String>) -> Self {
        self.check(Check::Pattern(regex.into()))
    }

    #[must_use]
    pub fn iso_date(self) -> Self {
        self.check(Check::IsoDate)
    }

    #[must_use]
    pub fn id(&self) -> FieldId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Nested object schema, if this field is an object
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match &self.kind {
            SchemaKind::Object(schema) => Some(schema),
            _ => None,
        }
    }

    /// Whether both handles refer to the same field definition
    #[must_use]
    pub fn same_field(&self, other: &FieldDefinition) -> bool {
        self.id == other.id
    }
}

/// An object shape: named fields in declaration order
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<(String, FieldDefinition)>,
}

impl ObjectSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any existing field of the same name in place
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, definition: FieldDefinition) -> Self {
        self.insert(name, definition);
        self
    }

    /// Add a field, replacing any existing field of the same name in place
    pub fn insert(&mut self, name: impl Into<String>, definition: FieldDefinition) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = definition;
        } else {
            self.fields.push((name, definition));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, d)| d)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.fields.iter().map(|(n, d)| (n.as_str(), d))
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_definition_gets_fresh_identity() {
        let a = FieldDefinition::string();
        let b = FieldDefinition::string();
        assert!(!a.same_field(&b));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_clone_preserves_identity() {
        let a = FieldDefinition::number().min(0.0);
        let b = a.clone();
        assert!(a.same_field(&b));
    }

    #[test]
    fn test_builder_keeps_identity() {
        let a = FieldDefinition::string();
        let id = a.id();
        let a = a.max_length(100).optional();
        assert_eq!(a.id(), id);
        assert!(a.is_optional());
    }

    #[test]
    fn test_message_applies_to_last_check() {
        let def = FieldDefinition::number()
            .min(0.0)
            .max(10.0)
            .message("too big");
        assert_eq!(def.rules()[0].message, None);
        assert_eq!(def.rules()[1].message.as_deref(), Some("too big"));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let schema = ObjectSchema::new()
            .field("a", FieldDefinition::string())
            .field("b", FieldDefinition::number())
            .field("a", FieldDefinition::boolean());
        assert_eq!(schema.names(), vec!["a", "b"]);
        assert!(matches!(schema.get("a").unwrap().kind(), SchemaKind::Boolean));
    }

    #[test]
    fn test_expected_descriptions() {
        assert_eq!(SchemaKind::String.expected(), "string");
        assert_eq!(SchemaKind::Literal("heat".into()).expected(), "'heat'");
        assert_eq!(
            SchemaKind::Enum(vec!["a".into(), "b".into()]).expected(),
            "'a' | 'b'"
        );
    }
}
