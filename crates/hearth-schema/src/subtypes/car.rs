//! Car

use super::{FIRST_METADATA_ORDER, SubtypeBuilder, common};
use crate::model::FieldDefinition;
use crate::onboarding::OnboardingMetadata;
use crate::registry::SubtypeSchemaEntry;
use crate::Result;
use hearth_model::MaintainableType;

pub fn entry() -> Result<SubtypeSchemaEntry> {
    SubtypeBuilder::new(MaintainableType::Vehicle, "car", "car")
        .question(
            "make",
            FieldDefinition::string().min_length(1).max_length(100).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER, true, "What make is it?"),
        )?
        .question(
            "model",
            common::model(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 1, true, "What model is it?"),
        )?
        .question(
            "year",
            FieldDefinition::number().int().min(1900.0).max(2100.0).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 2, false, "What model year?").skipable(),
        )?
        .question(
            "mileage",
            FieldDefinition::number()
                .min(0.0)
                .message("Mileage cannot be negative")
                .optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 3, false, "What is the current mileage?")
                .skipable(),
        )?
        .field(
            "vin",
            FieldDefinition::string()
                .pattern("^[A-HJ-NPR-Z0-9]{17}$")
                .message("VIN must be 17 characters, excluding I, O and Q")
                .optional(),
        )
        .field("purchaseDate", common::purchase_date())
        .field("purchasePrice", common::purchase_price())
        .build()
}
