//! Validation engine
//!
//! Walks an untrusted JSON value through an [`ObjectSchema`], collecting every
//! failing check as a [`ValidationIssue`] and building a normalized copy of the
//! input. On success the normalized value is narrowed into the caller's typed
//! shape; on failure the issues are grouped into [`FieldErrors`].

use crate::reporter::{FieldErrors, IssueCode, ROOT_KEY, ValidationIssue, ValidationReporter};
use crate::rules::{self, RuleResult};
use hearth_model::{MaintainableData, MaintenanceLog, Property, ValueKind};
use hearth_schema::records::{maintenance_log_schema, property_schema};
use hearth_schema::{
    Check, FieldDefinition, ObjectSchema, Rule, SchemaKind, SubtypeRegistry, SubtypeSchemaEntry,
};
use hearth_schema::base::base_schema;
use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// How unknown object keys are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrictnessLevel {
    /// Strict: unknown keys are validation failures
    Strict,
    /// Moderate: unknown keys are dropped from the output
    #[default]
    Moderate,
    /// Lenient: unknown keys are copied to the output unchecked
    Lenient,
}

/// Validation configuration
#[derive(Debug, Clone, Default)]
pub struct ValidationConfig {
    /// Strictness level
    pub strictness: StrictnessLevel,
    /// Maximum issues collected before the rest are dropped (0 = unlimited)
    pub max_errors: usize,
}

impl ValidationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn strictness(mut self, strictness: StrictnessLevel) -> Self {
        self.strictness = strictness;
        self
    }

    #[must_use]
    pub fn max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Uniform outcome of validating untrusted input
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult<T> {
    Success(T),
    Failure(FieldErrors),
}

impl<T> ValidationResult<T> {
    /// Failure with a single message at `path`
    pub fn failure_at(path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.push(path, message);
        ValidationResult::Failure(errors)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationResult::Success(_))
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            ValidationResult::Success(data) => Some(data),
            ValidationResult::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            ValidationResult::Success(_) => None,
            ValidationResult::Failure(errors) => Some(errors),
        }
    }

    /// Convert into a standard `Result`
    ///
    /// # Errors
    ///
    /// Returns the field errors if validation failed.
    pub fn into_result(self) -> std::result::Result<T, FieldErrors> {
        match self {
            ValidationResult::Success(data) => Ok(data),
            ValidationResult::Failure(errors) => Err(errors),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValidationResult<U> {
        match self {
            ValidationResult::Success(data) => ValidationResult::Success(f(data)),
            ValidationResult::Failure(errors) => ValidationResult::Failure(errors),
        }
    }
}

/// Serialized as `{"success": true, "data": ...}` or `{"success": false, "errors": {...}}`
impl<T: Serialize> Serialize for ValidationResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        match self {
            ValidationResult::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            ValidationResult::Failure(errors) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("errors", errors)?;
            }
        }
        state.end()
    }
}

/// Main validation engine
pub struct ValidationEngine<'r> {
    registry: &'r SubtypeRegistry,
    config: ValidationConfig,
}

impl ValidationEngine<'static> {
    /// Create an engine over the built-in subtype registry
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(hearth_schema::registry::global())
    }
}

impl Default for ValidationEngine<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> ValidationEngine<'r> {
    /// Create an engine resolving subtypes through `registry`
    #[must_use]
    pub fn with_registry(registry: &'r SubtypeRegistry) -> Self {
        Self {
            registry,
            config: ValidationConfig::default(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &'r SubtypeRegistry {
        self.registry
    }

    /// Collect every issue `data` raises against `schema`, plus the normalized value
    #[must_use]
    pub fn collect_issues(
        &self,
        data: &Value,
        schema: &ObjectSchema,
    ) -> (Option<Value>, Vec<ValidationIssue>) {
        self.walk(data, schema, Vec::new())
    }

    /// Validate against an arbitrary schema, returning the normalized value
    #[must_use]
    pub fn validate_with_schema(&self, data: &Value, schema: &ObjectSchema) -> ValidationResult<Value> {
        let (output, issues) = self.collect_issues(data, schema);
        finish(output, &issues)
    }

    /// Validate against the base schema only; `metadata` stays opaque
    #[must_use]
    pub fn validate_base(&self, data: &Value) -> ValidationResult<MaintainableData> {
        narrow(self.validate_with_schema(data, base_schema()))
    }

    /// Validate against the full narrowed schema of `subtype`
    ///
    /// An unregistered subtype is a failure keyed under `subtype`.
    #[must_use]
    pub fn validate_typed(&self, data: &Value, subtype: &str) -> ValidationResult<MaintainableData> {
        match self.subtype_entry(subtype) {
            Ok(entry) => narrow(self.validate_with_schema(data, entry.schema())),
            Err(issue) => narrow(finish(None, &[issue])),
        }
    }

    /// Registry entry for `subtype`, or an [`IssueCode::UnknownSubtype`]
    /// issue at `subtype` when it is not registered
    ///
    /// # Errors
    ///
    /// Returns the issue if the subtype is not registered.
    pub fn subtype_entry(&self, subtype: &str) -> std::result::Result<&'r SubtypeSchemaEntry, ValidationIssue> {
        self.registry.get(subtype).ok_or_else(|| {
            debug!("Validation against unregistered subtype '{}'", subtype);
            ValidationIssue::new(
                vec!["subtype".to_string()],
                IssueCode::UnknownSubtype,
                format!("Unknown subtype: {subtype}"),
            )
        })
    }

    /// Validate only a `metadata` value against a subtype's metadata schema.
    /// Error paths are prefixed with `metadata.`.
    #[must_use]
    pub fn validate_metadata(&self, metadata: &Value, subtype: &str) -> ValidationResult<Value> {
        let entry = match self.subtype_entry(subtype) {
            Ok(entry) => entry,
            Err(issue) => return finish(None, &[issue]),
        };
        let (output, issues) = self.walk(
            metadata,
            entry.metadata_schema(),
            vec![hearth_schema::questions::METADATA_FIELD.to_string()],
        );
        finish(output, &issues)
    }

    #[must_use]
    pub fn is_valid_base(&self, data: &Value) -> bool {
        self.validate_base(data).is_success()
    }

    #[must_use]
    pub fn is_valid_typed(&self, data: &Value, subtype: &str) -> bool {
        self.validate_typed(data, subtype).is_success()
    }

    #[must_use]
    pub fn validate_property(&self, data: &Value) -> ValidationResult<Property> {
        narrow(self.validate_with_schema(data, property_schema()))
    }

    #[must_use]
    pub fn validate_maintenance_log(&self, data: &Value) -> ValidationResult<MaintenanceLog> {
        narrow(self.validate_with_schema(data, maintenance_log_schema()))
    }

    fn walk(
        &self,
        data: &Value,
        schema: &ObjectSchema,
        mut path: Vec<String>,
    ) -> (Option<Value>, Vec<ValidationIssue>) {
        let mut walker = Walker {
            config: &self.config,
            issues: Vec::new(),
            dropped: 0,
        };
        let output = walker.object(schema, data, &mut path);
        if walker.dropped > 0 {
            debug!("Dropped {} issues past max_errors", walker.dropped);
        }
        (output, walker.issues)
    }
}

fn finish(output: Option<Value>, issues: &[ValidationIssue]) -> ValidationResult<Value> {
    match output {
        Some(value) if issues.is_empty() => ValidationResult::Success(value),
        _ => {
            let errors = ValidationReporter::new().report(issues);
            debug!(
                "Validation failed with {} error(s) across {} field(s)",
                errors.message_count(),
                errors.len()
            );
            ValidationResult::Failure(errors)
        }
    }
}

/// Deserialize a validated value into its typed shape
fn narrow<T: DeserializeOwned>(result: ValidationResult<Value>) -> ValidationResult<T> {
    match result {
        ValidationResult::Success(value) => match serde_json::from_value(value) {
            Ok(data) => ValidationResult::Success(data),
            Err(e) => ValidationResult::failure_at(ROOT_KEY, format!("Invalid data: {e}")),
        },
        ValidationResult::Failure(errors) => ValidationResult::Failure(errors),
    }
}

struct Walker<'c> {
    config: &'c ValidationConfig,
    issues: Vec<ValidationIssue>,
    dropped: usize,
}

impl Walker<'_> {
    fn issue(&mut self, path: &[String], code: IssueCode, message: String) {
        let max = self.config.max_errors;
        if max > 0 && self.issues.len() >= max {
            self.dropped += 1;
            return;
        }
        self.issues.push(ValidationIssue::new(path.to_vec(), code, message));
    }

    fn mismatch(&mut self, path: &[String], definition: &FieldDefinition, value: Option<&Value>) {
        let message = rules::describe_mismatch(&definition.kind().expected(), ValueKind::of(value));
        self.issue(path, IssueCode::InvalidType, message);
    }

    fn apply(&mut self, path: &[String], rule: &Rule, result: RuleResult) {
        if result.is_valid {
            return;
        }
        let message = rule
            .message
            .clone()
            .or(result.message)
            .unwrap_or_else(|| "Invalid value".to_string());
        self.issue(path, IssueCode::Constraint, message);
    }

    fn field(
        &mut self,
        definition: &FieldDefinition,
        value: Option<&Value>,
        path: &mut Vec<String>,
    ) -> Option<Value> {
        let Some(value) = value else {
            if !definition.is_optional() {
                self.mismatch(path, definition, None);
            }
            return None;
        };

        match definition.kind() {
            SchemaKind::Json => Some(value.clone()),
            SchemaKind::String => {
                let Some(s) = value.as_str() else {
                    self.mismatch(path, definition, Some(value));
                    return None;
                };
                for rule in definition.rules() {
                    self.apply(path, rule, rules::validate_string_check(s, &rule.check));
                }
                Some(value.clone())
            }
            SchemaKind::Number => {
                let Some(n) = value.as_f64() else {
                    self.mismatch(path, definition, Some(value));
                    return None;
                };
                let mut whole = false;
                for rule in definition.rules() {
                    let result = rules::validate_number_check(n, &rule.check);
                    whole |= rule.check == Check::Integer && result.is_valid;
                    self.apply(path, rule, result);
                }
                Some(normalize_number(value, n, whole))
            }
            SchemaKind::Boolean => {
                if value.is_boolean() {
                    Some(value.clone())
                } else {
                    self.mismatch(path, definition, Some(value));
                    None
                }
            }
            SchemaKind::Literal(expected) => {
                let result = rules::validate_literal(value, expected);
                if let Some(message) = result.message {
                    self.issue(path, IssueCode::InvalidLiteral, message);
                }
                Some(value.clone())
            }
            SchemaKind::Enum(values) => {
                let Some(s) = value.as_str() else {
                    self.mismatch(path, definition, Some(value));
                    return None;
                };
                let result = rules::validate_enum(s, values);
                if let Some(message) = result.message {
                    self.issue(path, IssueCode::InvalidEnumValue, message);
                }
                Some(value.clone())
            }
            SchemaKind::Array(item) => {
                let Some(elements) = value.as_array() else {
                    self.mismatch(path, definition, Some(value));
                    return None;
                };
                let mut out = Vec::with_capacity(elements.len());
                for (index, element) in elements.iter().enumerate() {
                    path.push(index.to_string());
                    if let Some(v) = self.field(item, Some(element), path) {
                        out.push(v);
                    }
                    path.pop();
                }
                for rule in definition.rules() {
                    self.apply(path, rule, rules::validate_array_check(elements.len(), &rule.check));
                }
                Some(Value::Array(out))
            }
            SchemaKind::Object(schema) => self.object(schema, value, path),
        }
    }

    fn object(&mut self, schema: &ObjectSchema, value: &Value, path: &mut Vec<String>) -> Option<Value> {
        let Some(input) = value.as_object() else {
            let received = ValueKind::of(Some(value));
            self.issue(
                path,
                IssueCode::InvalidType,
                rules::describe_mismatch("object", received),
            );
            return None;
        };

        let mut out = Map::new();
        for (name, definition) in schema.fields() {
            path.push(name.to_string());
            if let Some(v) = self.field(definition, input.get(name), path) {
                out.insert(name.to_string(), v);
            }
            path.pop();
        }

        for (key, extra) in input.iter().filter(|(k, _)| !schema.contains(k)) {
            match self.config.strictness {
                StrictnessLevel::Strict => {
                    path.push(key.clone());
                    self.issue(path, IssueCode::UnrecognizedKey, format!("Unrecognized key '{key}'"));
                    path.pop();
                }
                StrictnessLevel::Moderate => trace!("Stripping unknown key '{}'", key),
                StrictnessLevel::Lenient => {
                    out.insert(key.clone(), extra.clone());
                }
            }
        }

        Some(Value::Object(out))
    }
}

/// Whole numbers checked with `int()` are emitted as integers so they narrow
/// into integer-typed fields
#[allow(clippy::cast_possible_truncation)]
fn normalize_number(value: &Value, n: f64, whole: bool) -> Value {
    if whole && !value.is_i64() && !value.is_u64() && n.abs() < 9.0e15 {
        Value::from(n as i64)
    } else {
        value.clone()
    }
}
