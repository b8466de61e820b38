//! Built-in subtype modules
//!
//! Each module narrows `type`/`subtype` and declares its `metadata` fields.
//! [`SubtypeBuilder`] supplies the shared onboarding questions for the base
//! fields so every subtype's wizard opens the same way.

mod car;
mod cooling;
mod dishwasher;
mod dryer;
mod heat;
mod lawn;
mod oven;
mod piano;
mod refrigerator;
mod roof;
mod septic;
mod washer;
mod water_heater;
mod windows;

use crate::base::{condition_field, label_field, location_field};
use crate::model::{FieldDefinition, ObjectSchema};
use crate::onboarding::{OnboardingMetadata, QuestionOption, attach};
use crate::registry::SubtypeSchemaEntry;
use crate::{Error, Result};
use hearth_model::{Condition, MaintainableType};
use std::sync::LazyLock;

/// Built once per process so the annotation table only ever holds one copy
/// of each built-in field
static BUILTIN: LazyLock<Result<Vec<SubtypeSchemaEntry>>> = LazyLock::new(build_entries);

/// Every built-in subtype, in registration order
///
/// Entries share field identities across calls, so clones handed to
/// separate registries resolve to the same annotations.
///
/// # Errors
///
/// Returns an error if any module carries malformed onboarding metadata.
pub fn builtin_entries() -> Result<&'static [SubtypeSchemaEntry]> {
    match &*BUILTIN {
        Ok(entries) => Ok(entries.as_slice()),
        Err(e) => Err(Error::InvalidFormat(format!("built-in subtype catalog: {e}"))),
    }
}

fn build_entries() -> Result<Vec<SubtypeSchemaEntry>> {
    Ok(vec![
        dishwasher::entry()?,
        refrigerator::entry()?,
        washer::entry()?,
        dryer::entry()?,
        oven::entry()?,
        heat::entry()?,
        cooling::entry()?,
        water_heater::entry()?,
        roof::entry()?,
        windows::entry()?,
        septic::entry()?,
        car::entry()?,
        piano::entry()?,
        lawn::entry()?,
    ])
}

/// Order of the first metadata question; base questions use 1 through 5
pub const FIRST_METADATA_ORDER: u32 = 10;

/// Assembles a subtype entry with annotated base fields
#[derive(Debug)]
pub struct SubtypeBuilder {
    maintainable_type: MaintainableType,
    subtype: String,
    display_name: String,
    metadata: ObjectSchema,
}

impl SubtypeBuilder {
    /// `display_name` is the lowercase noun used in question text
    pub fn new(
        maintainable_type: MaintainableType,
        subtype: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            maintainable_type,
            subtype: subtype.into(),
            display_name: display_name.into(),
            metadata: ObjectSchema::new(),
        }
    }

    /// Add a metadata field with no onboarding question
    #[must_use]
    pub fn field(mut self, name: &str, definition: FieldDefinition) -> Self {
        self.metadata.insert(name, definition);
        self
    }

    /// Add a metadata field asked during onboarding
    ///
    /// # Errors
    ///
    /// Returns an error if `metadata` is malformed.
    pub fn question(
        self,
        name: &str,
        definition: FieldDefinition,
        metadata: OnboardingMetadata,
    ) -> Result<Self> {
        let definition = attach(definition, metadata)?;
        Ok(self.field(name, definition))
    }

    /// Compose the entry, annotating `type`, `subtype`, `label`, `condition`
    /// and `location`
    ///
    /// # Errors
    ///
    /// Returns an error if a base annotation is malformed.
    pub fn build(self) -> Result<SubtypeSchemaEntry> {
        let noun = self.display_name.as_str();
        let type_name = self.maintainable_type.as_str();

        let type_field = attach(
            FieldDefinition::literal(type_name),
            OnboardingMetadata::new(1, true, "What kind of item is this?")
                .options(vec![QuestionOption::new(type_name, capitalize(type_name))])
                .default_value(type_name),
        )?;
        let subtype_field = attach(
            FieldDefinition::literal(self.subtype.as_str()),
            OnboardingMetadata::new(2, true, format!("Which kind of {type_name}?")).skip(),
        )?;
        let label = attach(
            label_field(),
            OnboardingMetadata::new(3, false, format!("What would you like to call this {noun}?"))
                .default_value(capitalize(noun))
                .skipable(),
        )?;
        let condition = attach(
            condition_field(),
            OnboardingMetadata::new(4, false, format!("What condition is the {noun} in?"))
                .options(condition_options())
                .skipable(),
        )?;
        let location = attach(
            location_field(),
            OnboardingMetadata::new(5, false, format!("Where is the {noun} located?"))
                .help_text("For example: kitchen, basement, garage")
                .skipable(),
        )?;

        let overrides = ObjectSchema::new()
            .field("type", type_field)
            .field("subtype", subtype_field)
            .field("label", label)
            .field("condition", condition)
            .field("location", location);

        Ok(
            SubtypeSchemaEntry::new(self.maintainable_type, self.subtype, self.metadata)
                .with_overrides(&overrides),
        )
    }
}

fn condition_options() -> Vec<QuestionOption> {
    Condition::ALL
        .iter()
        .map(|c| QuestionOption::new(c.as_str(), capitalize(c.as_str())))
        .collect()
}

/// Options whose labels are the capitalized values
pub(crate) fn options_for(values: &[&str]) -> Vec<QuestionOption> {
    values
        .iter()
        .map(|v| QuestionOption::new(*v, capitalize(&v.replace('-', " "))))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Shared metadata fields describing a purchased, installed item
pub(crate) mod common {
    use crate::model::FieldDefinition;

    #[must_use]
    pub fn brand() -> FieldDefinition {
        FieldDefinition::string().max_length(100).optional()
    }

    #[must_use]
    pub fn model() -> FieldDefinition {
        FieldDefinition::string().max_length(100).optional()
    }

    #[must_use]
    pub fn serial_number() -> FieldDefinition {
        FieldDefinition::string().max_length(100).optional()
    }

    #[must_use]
    pub fn purchase_date() -> FieldDefinition {
        FieldDefinition::string().iso_date().optional()
    }

    #[must_use]
    pub fn purchase_price() -> FieldDefinition {
        FieldDefinition::number()
            .min(0.0)
            .message("Purchase price cannot be negative")
            .optional()
    }

    /// Years
    #[must_use]
    pub fn expected_lifespan() -> FieldDefinition {
        FieldDefinition::number()
            .min(0.0)
            .message("Expected lifespan cannot be negative")
            .max(200.0)
            .optional()
    }

    #[must_use]
    pub fn install_date() -> FieldDefinition {
        FieldDefinition::string().iso_date().optional()
    }

    #[must_use]
    pub fn warranty_expiration() -> FieldDefinition {
        FieldDefinition::string().iso_date().optional()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::lookup;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_subtype_names_are_unique() {
        let entries = builtin_entries().unwrap();
        let names: HashSet<_> = entries.iter().map(SubtypeSchemaEntry::subtype).collect();
        assert_eq!(names.len(), entries.len());
        assert_eq!(entries.len(), 14);
    }

    #[test]
    fn test_every_builtin_narrows_discriminators() {
        for entry in builtin_entries().unwrap() {
            let schema = entry.schema();
            assert!(!schema.get("type").unwrap().is_optional(), "{}", entry.subtype());
            assert!(schema.get("metadata").unwrap().as_object().is_some());
        }
    }

    #[test]
    fn test_builtin_entries_built_once() {
        let first = builtin_entries().unwrap();
        let second = builtin_entries().unwrap();
        assert!(std::ptr::eq(first, second));
        let heat = first.iter().find(|e| e.subtype() == "heat").unwrap();
        let fuel = heat.metadata_schema().get("fuel").unwrap();
        assert!(lookup(fuel).is_some());
    }

    #[test]
    fn test_subtype_field_is_skipped() {
        let entry = SubtypeBuilder::new(MaintainableType::Appliance, "freezer", "freezer")
            .build()
            .unwrap();
        let metadata = lookup(entry.schema().get("subtype").unwrap()).unwrap();
        assert!(metadata.skip);
    }

    #[test]
    fn test_builders_do_not_share_base_annotations() {
        let a = SubtypeBuilder::new(MaintainableType::Appliance, "freezer", "freezer")
            .build()
            .unwrap();
        let b = SubtypeBuilder::new(MaintainableType::System, "boiler", "boiler")
            .build()
            .unwrap();
        let qa = lookup(a.schema().get("label").unwrap()).unwrap().question;
        let qb = lookup(b.schema().get("label").unwrap()).unwrap().question;
        assert!(qa.contains("freezer"));
        assert!(qb.contains("boiler"));
    }

    #[test]
    fn test_question_attaches_metadata() {
        let entry = SubtypeBuilder::new(MaintainableType::Appliance, "freezer", "freezer")
            .question(
                "capacity",
                FieldDefinition::number().positive().optional(),
                OnboardingMetadata::new(FIRST_METADATA_ORDER, false, "Capacity?"),
            )
            .unwrap()
            .field("brand", common::brand())
            .build()
            .unwrap();
        let capacity = entry.metadata_schema().get("capacity").unwrap();
        assert_eq!(lookup(capacity).unwrap().question, "Capacity?");
        assert!(lookup(entry.metadata_schema().get("brand").unwrap()).is_none());
    }

    #[test]
    fn test_capitalize_and_options() {
        assert_eq!(capitalize("appliance"), "Appliance");
        assert_eq!(capitalize(""), "");
        let options = options_for(&["heat-pump", "gas"]);
        assert_eq!(options[0].label, "Heat pump");
        assert_eq!(options[0].value, "heat-pump");
    }
}
