//! Water heater, tank or tankless

use super::{FIRST_METADATA_ORDER, SubtypeBuilder, common, options_for};
use crate::model::FieldDefinition;
use crate::onboarding::{ConditionalRule, OnboardingMetadata};
use crate::registry::SubtypeSchemaEntry;
use crate::Result;
use hearth_model::MaintainableType;
use serde_json::json;

const FUELS: [&str; 3] = ["gas", "electric", "propane"];
const STYLES: [&str; 3] = ["tank", "tankless", "heat-pump"];

pub fn entry() -> Result<SubtypeSchemaEntry> {
    SubtypeBuilder::new(MaintainableType::System, "water-heater", "water heater")
        .question(
            "fuel",
            FieldDefinition::enumeration(FUELS).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER, true, "What fuel does it use?")
                .options(options_for(&FUELS)),
        )?
        .question(
            "style",
            FieldDefinition::enumeration(STYLES).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 1, true, "Is it a tank or tankless unit?")
                .options(options_for(&STYLES)),
        )?
        .question(
            "tankSize",
            FieldDefinition::number()
                .positive()
                .message("Tank size must be positive")
                .max(200.0)
                .message("Tank size seems unreasonably large")
                .optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 2, false, "How many gallons does the tank hold?")
                .conditional(ConditionalRule::new("metadata.style", json!(["tank", "heat-pump"])))
                .skipable(),
        )?
        .field("brand", common::brand())
        .field("model", common::model())
        .field("installDate", common::install_date())
        .field("expectedLifespan", common::expected_lifespan())
        .field("warrantyExpiration", common::warranty_expiration())
        .build()
}
