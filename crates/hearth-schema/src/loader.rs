//! Subtype loader
//!
//! Reads subtype definitions from YAML or JSON so new kinds of maintainable
//! items can be added without recompiling:
//!
//! ```yaml
//! type: appliance
//! subtype: freezer
//! fields:
//!   - name: capacity
//!     kind: number
//!     positive: true
//!     max: 50
//!     messages:
//!       max: Capacity seems unreasonably large
//!     onboarding:
//!       order: 10
//!       required: false
//!       question: What is its capacity in cubic feet?
//! ```
//!
//! Metadata fields are optional unless `optional: false` is given. An
//! `onboarding` block goes through the same checks as built-in annotations, so
//! a block missing `order`, `required` or `question` fails the load.

use crate::model::{Check, FieldDefinition, SchemaKind};
use crate::onboarding::OnboardingMetadata;
use crate::registry::SubtypeSchemaEntry;
use crate::subtypes::SubtypeBuilder;
use crate::{Error, Result};
use hearth_model::MaintainableType;
use regex::Regex;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Serializable subtype format for loading from files
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SubtypeFile {
    #[serde(rename = "type")]
    maintainable_type: MaintainableType,
    subtype: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    fields: Vec<FieldFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KindFile {
    String,
    Number,
    Boolean,
    Literal,
    Enum,
    Array,
    Json,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FieldFile {
    #[serde(default)]
    name: String,
    kind: KindFile,
    /// Members of an `enum`
    #[serde(default)]
    values: Vec<String>,
    /// Value of a `literal`
    #[serde(default)]
    value: Option<String>,
    /// Element definition of an `array`
    #[serde(default)]
    items: Option<Box<FieldFile>>,
    #[serde(default = "default_optional")]
    optional: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    min_length: Option<usize>,
    #[serde(default)]
    max_length: Option<usize>,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    positive: bool,
    #[serde(default)]
    integer: bool,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    iso_date: bool,
    /// Custom failure messages keyed by check name (`min`, `maxLength`, ...)
    #[serde(default)]
    messages: HashMap<String, String>,
    #[serde(default)]
    onboarding: Option<serde_json::Value>,
}

fn default_optional() -> bool {
    true
}

/// Loads subtype definitions from files and directories
pub struct SubtypeLoader {
    schema_paths: Vec<PathBuf>,
}

impl SubtypeLoader {
    /// Create a loader over the given files or directories
    #[must_use]
    pub fn new(schema_paths: Vec<PathBuf>) -> Self {
        Self { schema_paths }
    }

    /// Add a file or directory to load from
    pub fn add_path(&mut self, path: PathBuf) {
        self.schema_paths.push(path);
    }

    /// Load every definition reachable from the configured paths
    ///
    /// # Errors
    ///
    /// Returns the first I/O, parse, or metadata error encountered.
    pub fn load_all(&self) -> Result<Vec<SubtypeSchemaEntry>> {
        let mut entries = Vec::new();
        for path in &self.schema_paths {
            if path.is_dir() {
                entries.extend(self.load_dir(path)?);
            } else {
                entries.push(self.load_from_file(path)?);
            }
        }
        info!(
            "Loaded {} subtype definitions from {} paths",
            entries.len(),
            self.schema_paths.len()
        );
        Ok(entries)
    }

    /// Load every `.yaml`, `.yml` and `.json` file in a directory, by file name
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or any file fails to load.
    pub fn load_dir(&self, dir: &Path) -> Result<Vec<SubtypeSchemaEntry>> {
        let mut files = Vec::new();
        for dir_entry in std::fs::read_dir(dir)? {
            let path = dir_entry?.path();
            if path.is_file() && is_definition_file(&path) {
                files.push(path);
            } else {
                trace!("Ignoring {:?}", path);
            }
        }
        files.sort();
        debug!("Found {} subtype definition files in {:?}", files.len(), dir);

        files.iter().map(|path| self.load_from_file(path)).collect()
    }

    /// Load a definition from a specific file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a valid subtype.
    pub fn load_from_file(&self, path: &Path) -> Result<SubtypeSchemaEntry> {
        trace!("Loading subtype definition from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;

        if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            self.load_from_yaml(&content)
        } else {
            self.load_from_json(&content)
        }
    }

    /// Load a definition from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a valid subtype.
    pub fn load_from_json(&self, json: &str) -> Result<SubtypeSchemaEntry> {
        let file: SubtypeFile = serde_json::from_str(json)
            .map_err(|e| Error::InvalidFormat(format!("JSON parse error: {e}")))?;
        self.convert_subtype_file(file)
    }

    /// Load a definition from a YAML string
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML does not describe a valid subtype.
    pub fn load_from_yaml(&self, yaml: &str) -> Result<SubtypeSchemaEntry> {
        let file: SubtypeFile = serde_yaml::from_str(yaml)
            .map_err(|e| Error::InvalidFormat(format!("YAML parse error: {e}")))?;
        self.convert_subtype_file(file)
    }

    fn convert_subtype_file(&self, file: SubtypeFile) -> Result<SubtypeSchemaEntry> {
        let subtype = file.subtype.trim().to_string();
        if subtype.is_empty() {
            return Err(Error::InvalidFormat("subtype name is empty".to_string()));
        }
        let display_name = file
            .display_name
            .unwrap_or_else(|| subtype.replace('-', " "));

        let mut builder = SubtypeBuilder::new(file.maintainable_type, subtype.as_str(), display_name);
        let mut seen = HashSet::new();

        for field in file.fields {
            let name = field.name.trim().to_string();
            let context = format!("{subtype}.metadata.{name}");
            if name.is_empty() {
                return Err(Error::InvalidFormat(format!(
                    "{subtype}: metadata field without a name"
                )));
            }
            if !seen.insert(name.clone()) {
                return Err(Error::InvalidFormat(format!(
                    "{context}: declared more than once"
                )));
            }

            let onboarding = field.onboarding.clone();
            let definition = convert_field(field, &context)?;

            builder = match onboarding {
                Some(raw) => {
                    let metadata = OnboardingMetadata::from_json(raw).map_err(|e| match e {
                        Error::InvalidOnboardingMetadata(reason) => {
                            Error::InvalidOnboardingMetadata(format!("{context}: {reason}"))
                        }
                        other => other,
                    })?;
                    builder.question(&name, definition, metadata)?
                }
                None => builder.field(&name, definition),
            };
        }

        debug!("Converted subtype definition '{}'", subtype);
        builder.build()
    }
}

impl Default for SubtypeLoader {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn is_definition_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e, "yaml" | "yml" | "json"))
}

fn convert_field(field: FieldFile, context: &str) -> Result<FieldDefinition> {
    let kind = match field.kind {
        KindFile::String => SchemaKind::String,
        KindFile::Number => SchemaKind::Number,
        KindFile::Boolean => SchemaKind::Boolean,
        KindFile::Json => SchemaKind::Json,
        KindFile::Literal => {
            let value = field.value.clone().ok_or_else(|| {
                Error::InvalidFormat(format!("{context}: literal without a value"))
            })?;
            SchemaKind::Literal(value)
        }
        KindFile::Enum => {
            if field.values.is_empty() {
                return Err(Error::InvalidFormat(format!(
                    "{context}: enum without values"
                )));
            }
            SchemaKind::Enum(field.values.clone())
        }
        KindFile::Array => {
            let mut items = field.items.ok_or_else(|| {
                Error::InvalidFormat(format!("{context}: array without items"))
            })?;
            // Array elements are always present.
            items.optional = false;
            SchemaKind::Array(Box::new(convert_field(*items, &format!("{context}[]"))?))
        }
    };

    let mut definition = FieldDefinition::new(kind);
    let messages = &field.messages;
    let push = |definition: FieldDefinition, check: Check, key: &str| {
        let definition = definition.check(check);
        match messages.get(key) {
            Some(message) => definition.message(message.clone()),
            None => definition,
        }
    };

    if let Some(len) = field.min_length {
        definition = push(definition, Check::MinLength(len), "minLength");
    }
    if let Some(len) = field.max_length {
        definition = push(definition, Check::MaxLength(len), "maxLength");
    }
    if let Some(bound) = field.min {
        definition = push(definition, Check::Min(bound), "min");
    }
    if let Some(bound) = field.max {
        definition = push(definition, Check::Max(bound), "max");
    }
    if field.positive {
        definition = push(definition, Check::Positive, "positive");
    }
    if field.integer {
        definition = push(definition, Check::Integer, "integer");
    }
    if let Some(pattern) = field.pattern {
        Regex::new(&pattern).map_err(|e| {
            Error::InvalidFormat(format!("{context}: invalid pattern '{pattern}': {e}"))
        })?;
        definition = push(definition, Check::Pattern(pattern), "pattern");
    }
    if field.iso_date {
        definition = push(definition, Check::IsoDate, "isoDate");
    }

    if let Some(description) = field.description {
        definition = definition.describe(description);
    }
    if field.optional {
        definition = definition.optional();
    }
    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::lookup;
    use crate::questions::extract_questions;

    const FREEZER: &str = r"
type: appliance
subtype: chest-freezer
fields:
  - name: capacity
    kind: number
    positive: true
    max: 50
    messages:
      max: Capacity seems unreasonably large
    onboarding:
      order: 10
      required: false
      question: What is its capacity in cubic feet?
  - name: defrost
    kind: enum
    values: [manual, frost-free]
  - name: compartments
    kind: array
    items:
      kind: string
      maxLength: 20
";

    #[test]
    fn test_load_from_yaml() {
        let entry = SubtypeLoader::default().load_from_yaml(FREEZER).unwrap();
        assert_eq!(entry.subtype(), "chest-freezer");
        assert_eq!(entry.maintainable_type(), MaintainableType::Appliance);
        assert_eq!(
            entry.metadata_schema().names(),
            vec!["capacity", "defrost", "compartments"]
        );

        let capacity = entry.metadata_schema().get("capacity").unwrap();
        assert!(capacity.is_optional());
        assert_eq!(capacity.rules().len(), 2);
        assert_eq!(
            capacity.rules()[0].message.as_deref(),
            Some("Capacity seems unreasonably large")
        );
        assert_eq!(lookup(capacity).unwrap().order, 10);
    }

    #[test]
    fn test_loaded_subtype_gets_standard_questions() {
        let entry = SubtypeLoader::default().load_from_yaml(FREEZER).unwrap();
        let fields: Vec<_> = extract_questions(entry.schema())
            .into_iter()
            .map(|q| q.field)
            .collect();
        assert_eq!(
            fields,
            vec!["type", "label", "condition", "location", "metadata.capacity"]
        );
    }

    #[test]
    fn test_array_items_are_required() {
        let entry = SubtypeLoader::default().load_from_yaml(FREEZER).unwrap();
        let compartments = entry.metadata_schema().get("compartments").unwrap();
        let SchemaKind::Array(item) = compartments.kind() else {
            panic!("compartments should be an array");
        };
        assert!(!item.is_optional());
        assert_eq!(item.rules()[0].check, Check::MaxLength(20));
    }

    #[test]
    fn test_load_from_json() {
        let entry = SubtypeLoader::default()
            .load_from_json(
                r#"{"type": "utility", "subtype": "well", "fields": [
                    {"name": "depth", "kind": "number", "min": 0}
                ]}"#,
            )
            .unwrap();
        assert_eq!(entry.subtype(), "well");
        assert!(entry.metadata_schema().contains("depth"));
    }

    #[test]
    fn test_onboarding_missing_question_fails_load() {
        let yaml = r"
type: appliance
subtype: freezer
fields:
  - name: capacity
    kind: number
    onboarding:
      order: 10
      required: false
";
        let err = SubtypeLoader::default().load_from_yaml(yaml).unwrap_err();
        let Error::InvalidOnboardingMetadata(reason) = err else {
            panic!("expected invalid onboarding metadata, got {err:?}");
        };
        assert!(reason.starts_with("freezer.metadata.capacity"));
    }

    #[test]
    fn test_unknown_type_fails() {
        let err = SubtypeLoader::default()
            .load_from_yaml("type: spaceship\nsubtype: rocket\n")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }

    #[test]
    fn test_enum_without_values_fails() {
        let yaml = "type: other\nsubtype: x\nfields:\n  - name: a\n    kind: enum\n";
        let err = SubtypeLoader::default().load_from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("enum without values"));
    }

    #[test]
    fn test_invalid_pattern_fails() {
        let yaml = "type: other\nsubtype: x\nfields:\n  - name: a\n    kind: string\n    pattern: '(unclosed'\n";
        let err = SubtypeLoader::default().load_from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("invalid pattern"));
    }

    #[test]
    fn test_duplicate_field_fails() {
        let yaml = "type: other\nsubtype: x\nfields:\n  - name: a\n    kind: string\n  - name: a\n    kind: number\n";
        let err = SubtypeLoader::default().load_from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("declared more than once"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let yaml = "type: other\nsubtype: x\nfields:\n  - name: a\n    kind: string\n    maxLenght: 3\n";
        assert!(SubtypeLoader::default().load_from_yaml(yaml).is_err());
    }

    #[test]
    fn test_load_dir_sorts_by_file_name_and_skips_other_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("b-freezer.yaml"), FREEZER)?;
        std::fs::write(
            dir.path().join("a-well.json"),
            r#"{"type": "utility", "subtype": "well", "fields": []}"#,
        )?;
        std::fs::write(dir.path().join("c-sauna.yml"), "type: other\nsubtype: sauna\n")?;
        std::fs::write(dir.path().join("README.md"), "not a definition")?;
        std::fs::create_dir(dir.path().join("nested.yaml"))?;

        let loader = SubtypeLoader::default();
        let names: Vec<_> = loader
            .load_dir(dir.path())?
            .iter()
            .map(|e| e.subtype().to_string())
            .collect();
        assert_eq!(names, vec!["well", "chest-freezer", "sauna"]);
        Ok(())
    }

    #[test]
    fn test_load_all_mixes_files_and_directories() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let defs = dir.path().join("defs");
        std::fs::create_dir(&defs)?;
        std::fs::write(defs.join("freezer.yaml"), FREEZER)?;
        let single = dir.path().join("well.json");
        std::fs::write(&single, r#"{"type": "utility", "subtype": "well"}"#)?;

        let mut loader = SubtypeLoader::new(vec![single]);
        loader.add_path(defs);
        let entries = loader.load_all()?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].subtype(), "well");
        assert_eq!(entries[1].subtype(), "chest-freezer");
        Ok(())
    }

    #[test]
    fn test_load_dir_reports_broken_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("broken.yaml"), "type: [")?;
        let err = SubtypeLoader::default().load_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("YAML parse error"));
        Ok(())
    }

    #[test]
    fn test_description_is_kept() {
        let yaml = "type: other\nsubtype: x\nfields:\n  - name: a\n    kind: string\n    description: Serial plate text\n";
        let entry = SubtypeLoader::default().load_from_yaml(yaml).unwrap();
        let field = entry.metadata_schema().get("a").unwrap();
        assert_eq!(field.description(), Some("Serial plate text"));
    }
}
