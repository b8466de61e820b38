//! Clothes dryer

use super::{FIRST_METADATA_ORDER, SubtypeBuilder, common, options_for};
use crate::model::FieldDefinition;
use crate::onboarding::OnboardingMetadata;
use crate::registry::SubtypeSchemaEntry;
use crate::Result;
use hearth_model::MaintainableType;

const FUELS: [&str; 2] = ["electric", "gas"];

pub fn entry() -> Result<SubtypeSchemaEntry> {
    SubtypeBuilder::new(MaintainableType::Appliance, "dryer", "dryer")
        .question(
            "fuel",
            FieldDefinition::enumeration(FUELS).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER, true, "Is it electric or gas?")
                .options(options_for(&FUELS)),
        )?
        .question(
            "ventLength",
            FieldDefinition::number()
                .min(0.0)
                .max(100.0)
                .message("Vent runs longer than 100 feet are not supported")
                .optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 1, false, "How long is the vent run in feet?")
                .help_text(
                    "Long vent runs collect lint faster and should be cleaned more often. \
                     Measure from the back of the dryer to the outside wall cap.",
                )
                .skipable(),
        )?
        .field("brand", common::brand())
        .field("model", common::model())
        .field("purchasePrice", common::purchase_price())
        .field("expectedLifespan", common::expected_lifespan())
        .build()
}
