//! Schemas for property and maintenance log records

use crate::model::{FieldDefinition, ObjectSchema};
use chrono::{Datelike, Utc};
use hearth_model::HomeType;
use std::sync::LazyLock;

/// Largest accepted square footage, inclusive
pub const MAX_SQUARE_FOOTAGE: f64 = 1_000_000.0;

/// Earliest accepted construction year
pub const MIN_YEAR_BUILT: f64 = 1800.0;

pub const ZIP_CODE_PATTERN: &str = r"^\d{5}(-\d{4})?$";

/// Build the property schema; `yearBuilt` is capped at the current year
#[must_use]
pub fn build_property_schema() -> ObjectSchema {
    let this_year = f64::from(Utc::now().year());

    ObjectSchema::new()
        .field(
            "name",
            FieldDefinition::string()
                .min_length(1)
                .message("Property name is required")
                .max_length(100)
                .message("Property name must be 100 characters or fewer"),
        )
        .field(
            "address",
            FieldDefinition::string()
                .min_length(1)
                .message("Address is required")
                .max_length(200)
                .message("Address must be 200 characters or fewer"),
        )
        .field(
            "yearBuilt",
            FieldDefinition::number()
                .int()
                .min(MIN_YEAR_BUILT)
                .message("Year built must be 1800 or later")
                .max(this_year)
                .message("Year built cannot be in the future")
                .optional(),
        )
        .field(
            "squareFootage",
            FieldDefinition::number()
                .positive()
                .message("Square footage must be positive")
                .max(MAX_SQUARE_FOOTAGE)
                .message("Square footage seems unreasonably large")
                .optional(),
        )
        .field("homeType", FieldDefinition::enumeration(HomeType::names()))
        .field(
            "bedrooms",
            FieldDefinition::number()
                .int()
                .min(0.0)
                .max(100.0)
                .message("Bedroom count seems unreasonably large")
                .optional(),
        )
        .field(
            "bathrooms",
            FieldDefinition::number()
                .min(0.0)
                .max(100.0)
                .message("Bathroom count seems unreasonably large")
                .optional(),
        )
        .field(
            "stories",
            FieldDefinition::number()
                .int()
                .min(0.0)
                .max(200.0)
                .message("Story count seems unreasonably large")
                .optional(),
        )
        .field(
            "garages",
            FieldDefinition::number()
                .int()
                .min(0.0)
                .max(50.0)
                .message("Garage count seems unreasonably large")
                .optional(),
        )
        .field(
            "zipCode",
            FieldDefinition::string()
                .pattern(ZIP_CODE_PATTERN)
                .message("ZIP code must look like 12345 or 12345-6789")
                .optional(),
        )
        .field("notes", FieldDefinition::string().max_length(1000).optional())
}

/// Build the maintenance log schema
#[must_use]
pub fn build_maintenance_log_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field(
            "maintainableId",
            FieldDefinition::string()
                .min_length(1)
                .message("Maintainable item is required"),
        )
        .field(
            "date",
            FieldDefinition::string()
                .iso_date()
                .message("Date must be a valid YYYY-MM-DD date"),
        )
        .field(
            "title",
            FieldDefinition::string()
                .min_length(1)
                .message("Title is required")
                .max_length(100)
                .message("Title must be 100 characters or fewer"),
        )
        .field(
            "description",
            FieldDefinition::string().max_length(1000).optional(),
        )
        .field(
            "cost",
            FieldDefinition::number()
                .min(0.0)
                .message("Cost cannot be negative")
                .optional(),
        )
        .field(
            "performedBy",
            FieldDefinition::string().max_length(100).optional(),
        )
        .field(
            "nextDueDate",
            FieldDefinition::string()
                .iso_date()
                .message("Next due date must be a valid YYYY-MM-DD date")
                .optional(),
        )
}

static PROPERTY_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(build_property_schema);
static MAINTENANCE_LOG_SCHEMA: LazyLock<ObjectSchema> =
    LazyLock::new(build_maintenance_log_schema);

#[must_use]
pub fn property_schema() -> &'static ObjectSchema {
    &PROPERTY_SCHEMA
}

#[must_use]
pub fn maintenance_log_schema() -> &'static ObjectSchema {
    &MAINTENANCE_LOG_SCHEMA
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Check, SchemaKind};

    #[test]
    fn test_property_required_fields() {
        let required: Vec<_> = property_schema()
            .fields()
            .filter(|(_, d)| !d.is_optional())
            .map(|(n, _)| n)
            .collect();
        assert_eq!(required, vec!["name", "address", "homeType"]);
    }

    #[test]
    fn test_square_footage_cap_carries_message() {
        let field = property_schema().get("squareFootage").unwrap();
        let cap = field
            .rules()
            .iter()
            .find(|r| r.check == Check::Max(MAX_SQUARE_FOOTAGE))
            .unwrap();
        assert!(cap.message.as_deref().unwrap().contains("unreasonably large"));
    }

    #[test]
    fn test_year_built_capped_at_current_year() {
        let field = property_schema().get("yearBuilt").unwrap();
        let this_year = f64::from(Utc::now().year());
        assert!(field.rules().iter().any(|r| r.check == Check::Max(this_year)));
    }

    #[test]
    fn test_log_schema_shape() {
        let schema = maintenance_log_schema();
        assert!(matches!(schema.get("cost").unwrap().kind(), SchemaKind::Number));
        assert!(!schema.get("date").unwrap().is_optional());
    }
}
