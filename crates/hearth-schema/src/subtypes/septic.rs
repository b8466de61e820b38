//! Septic system

use super::{FIRST_METADATA_ORDER, SubtypeBuilder};
use crate::model::FieldDefinition;
use crate::onboarding::OnboardingMetadata;
use crate::registry::SubtypeSchemaEntry;
use crate::Result;
use hearth_model::MaintainableType;

pub fn entry() -> Result<SubtypeSchemaEntry> {
    SubtypeBuilder::new(MaintainableType::Utility, "septic", "septic system")
        .question(
            "tankSize",
            FieldDefinition::number()
                .positive()
                .max(10_000.0)
                .message("Tank size seems unreasonably large")
                .optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER, false, "How many gallons does the tank hold?")
                .skipable(),
        )?
        .question(
            "lastPumped",
            FieldDefinition::string().iso_date().optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 1, false, "When was it last pumped?")
                .help_text("YYYY-MM-DD")
                .skipable(),
        )?
        .question(
            "pumpIntervalYears",
            FieldDefinition::number().positive().max(20.0).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 2, false, "How often should it be pumped, in years?")
                .default_value(3)
                .skipable(),
        )?
        .build()
}
