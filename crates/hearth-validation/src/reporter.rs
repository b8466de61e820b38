//! Validation reporter
//!
//! Groups the engine's issues into the field-keyed error map that forms and
//! API handlers render next to each input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Key used for issues about the input as a whole
pub const ROOT_KEY: &str = "_root";

/// Machine-readable reason for an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Value of the wrong JSON kind, including a missing required value
    InvalidType,
    InvalidLiteral,
    InvalidEnumValue,
    /// A refinement check failed
    Constraint,
    UnrecognizedKey,
    UnknownSubtype,
}

/// One structural failure at a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: Vec<String>,
    pub message: String,
    pub code: IssueCode,
}

impl ValidationIssue {
    pub fn new(path: Vec<String>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            code,
        }
    }

    /// `.`-joined path, or [`ROOT_KEY`] for the root
    #[must_use]
    pub fn dotted_path(&self) -> String {
        if self.path.is_empty() {
            ROOT_KEY.to_string()
        } else {
            self.path.join(".")
        }
    }
}

/// Messages keyed by dotted field path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message; earlier messages for the path are kept
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of paths with at least one message
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of messages across all paths
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, messages) in &self.0 {
            for message in messages {
                writeln!(f, "{path}: {message}")?;
            }
        }
        Ok(())
    }
}

/// Reports validation results
pub struct ValidationReporter;

impl ValidationReporter {
    /// Create a new validation reporter
    pub fn new() -> Self {
        Self
    }

    /// Group issues by dotted path, keeping every message in discovery order
    #[must_use]
    pub fn report(&self, issues: &[ValidationIssue]) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for issue in issues {
            errors.push(issue.dotted_path(), issue.message.clone());
        }
        errors
    }

    /// Plain-text summary, one line per message
    #[must_use]
    pub fn render_text(&self, errors: &FieldErrors) -> String {
        let mut out = format!(
            "{} error(s) in {} field(s)\n",
            errors.message_count(),
            errors.len()
        );
        for (path, messages) in errors.iter() {
            for message in messages {
                out.push_str(&format!("  {path}: {message}\n"));
            }
        }
        out
    }
}

impl Default for ValidationReporter {
    fn default() -> Self {
        Self::new()
    }
}
