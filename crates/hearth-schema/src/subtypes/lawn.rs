//! Lawn

use super::{FIRST_METADATA_ORDER, SubtypeBuilder};
use crate::model::FieldDefinition;
use crate::onboarding::OnboardingMetadata;
use crate::registry::SubtypeSchemaEntry;
use crate::Result;
use hearth_model::MaintainableType;

pub fn entry() -> Result<SubtypeSchemaEntry> {
    SubtypeBuilder::new(MaintainableType::Landscape, "lawn", "lawn")
        .question(
            "grassType",
            FieldDefinition::string().max_length(100).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER, false, "What type of grass is it?")
                .skipable(),
        )?
        .question(
            "squareFootage",
            FieldDefinition::number()
                .positive()
                .max(1_000_000.0)
                .message("Lawn area seems unreasonably large")
                .optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 1, false, "Roughly how many square feet?")
                .skipable(),
        )?
        .question(
            "irrigated",
            FieldDefinition::boolean().optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 2, false, "Does it have an irrigation system?")
                .default_value(false),
        )?
        .build()
}
