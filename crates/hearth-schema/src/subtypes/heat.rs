//! Heating system

use super::{FIRST_METADATA_ORDER, SubtypeBuilder, options_for};
use crate::model::FieldDefinition;
use crate::onboarding::OnboardingMetadata;
use crate::registry::SubtypeSchemaEntry;
use crate::Result;
use hearth_model::MaintainableType;

const FUELS: [&str; 6] = ["gas", "oil", "electric", "propane", "wood", "geothermal"];

pub fn entry() -> Result<SubtypeSchemaEntry> {
    SubtypeBuilder::new(MaintainableType::System, "heat", "heating system")
        .question(
            "fuel",
            FieldDefinition::enumeration(FUELS).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER, true, "What fuel does it use?")
                .options(options_for(&FUELS)),
        )?
        .question(
            "btu",
            FieldDefinition::number()
                .positive()
                .message("BTU rating must be positive")
                .max(1_000_000.0)
                .message("BTU rating seems unreasonably large")
                .optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 1, false, "What is its BTU rating?")
                .help_text("Usually printed on the unit's rating plate")
                .skipable(),
        )?
        .question(
            "efficiency",
            FieldDefinition::number()
                .min(0.0)
                .max(100.0)
                .message("Efficiency is a percentage between 0 and 100")
                .optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 2, false, "What is its efficiency (AFUE %)?")
                .skipable(),
        )?
        .build()
}
