//! Base schema shared by every maintainable item
//!
//! The field constructors here return a *fresh* definition on every call, so a
//! subtype can re-declare `label` or `location` with identical rules and
//! annotate its own copy without affecting other subtypes.

use crate::model::{FieldDefinition, ObjectSchema};
use hearth_model::{Condition, MaintainableType};
use std::sync::LazyLock;

/// Maximum length of short free-text fields
pub const MAX_TEXT_LENGTH: usize = 100;

#[must_use]
pub fn label_field() -> FieldDefinition {
    FieldDefinition::string()
        .max_length(MAX_TEXT_LENGTH)
        .message("Label must be 100 characters or fewer")
        .optional()
}

#[must_use]
pub fn type_field() -> FieldDefinition {
    FieldDefinition::enumeration(MaintainableType::names())
}

#[must_use]
pub fn subtype_field() -> FieldDefinition {
    FieldDefinition::string()
        .min_length(1)
        .message("Subtype is required")
}

#[must_use]
pub fn condition_field() -> FieldDefinition {
    FieldDefinition::enumeration(Condition::names()).optional()
}

#[must_use]
pub fn tags_field() -> FieldDefinition {
    FieldDefinition::array(
        FieldDefinition::string()
            .max_length(MAX_TEXT_LENGTH)
            .message("Tags must be 100 characters or fewer"),
    )
    .optional()
}

#[must_use]
pub fn location_field() -> FieldDefinition {
    FieldDefinition::string()
        .max_length(MAX_TEXT_LENGTH)
        .message("Location must be 100 characters or fewer")
        .optional()
}

/// Opaque at this layer: any JSON value, including scalars and arrays
#[must_use]
pub fn metadata_field() -> FieldDefinition {
    FieldDefinition::json().optional()
}

/// Build a new base schema with fresh field identities
#[must_use]
pub fn build_base_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("label", label_field())
        .field("type", type_field())
        .field("subtype", subtype_field())
        .field("condition", condition_field())
        .field("tags", tags_field())
        .field("location", location_field())
        .field("metadata", metadata_field())
}

static BASE_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(build_base_schema);

/// The process-wide base schema
#[must_use]
pub fn base_schema() -> &'static ObjectSchema {
    &BASE_SCHEMA
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SchemaKind;

    #[test]
    fn test_base_field_order() {
        assert_eq!(
            base_schema().names(),
            vec!["label", "type", "subtype", "condition", "tags", "location", "metadata"]
        );
    }

    #[test]
    fn test_only_type_and_subtype_required() {
        let required: Vec<_> = base_schema()
            .fields()
            .filter(|(_, d)| !d.is_optional())
            .map(|(n, _)| n)
            .collect();
        assert_eq!(required, vec!["type", "subtype"]);
    }

    #[test]
    fn test_type_enum_is_closed_set() {
        let SchemaKind::Enum(values) = base_schema().get("type").unwrap().kind() else {
            panic!("type should be an enum");
        };
        assert_eq!(values.len(), 8);
        assert!(values.iter().any(|v| v == "landscape"));
    }

    #[test]
    fn test_field_constructors_are_fresh() {
        assert!(!label_field().same_field(&label_field()));
    }

    #[test]
    fn test_static_schema_is_stable() {
        let a = base_schema().get("label").unwrap().id();
        let b = base_schema().get("label").unwrap().id();
        assert_eq!(a, b);
    }
}
