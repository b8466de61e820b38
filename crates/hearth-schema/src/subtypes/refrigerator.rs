//! Refrigerator

use super::{FIRST_METADATA_ORDER, SubtypeBuilder, common, options_for};
use crate::model::FieldDefinition;
use crate::onboarding::OnboardingMetadata;
use crate::registry::SubtypeSchemaEntry;
use crate::Result;
use hearth_model::MaintainableType;

const STYLES: [&str; 5] = ["top-freezer", "bottom-freezer", "side-by-side", "french-door", "compact"];

pub fn entry() -> Result<SubtypeSchemaEntry> {
    SubtypeBuilder::new(MaintainableType::Appliance, "refrigerator", "refrigerator")
        .question(
            "style",
            FieldDefinition::enumeration(STYLES).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER, false, "What style of refrigerator is it?")
                .options(options_for(&STYLES))
                .skipable(),
        )?
        .question(
            "capacity",
            FieldDefinition::number()
                .positive()
                .message("Capacity must be positive")
                .max(100.0)
                .message("Capacity seems unreasonably large")
                .optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 1, false, "What is its capacity in cubic feet?")
                .skipable(),
        )?
        .question(
            "hasIceMaker",
            FieldDefinition::boolean().optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 2, false, "Does it have an ice maker?")
                .help_text("Ice makers with a water line need their filter replaced periodically")
                .default_value(false),
        )?
        .field("brand", common::brand())
        .field("model", common::model())
        .field("serialNumber", common::serial_number())
        .field("purchaseDate", common::purchase_date())
        .field("purchasePrice", common::purchase_price())
        .field("expectedLifespan", common::expected_lifespan())
        .build()
}
