//! Roof

use super::{FIRST_METADATA_ORDER, SubtypeBuilder, common, options_for};
use crate::model::FieldDefinition;
use crate::onboarding::OnboardingMetadata;
use crate::registry::SubtypeSchemaEntry;
use crate::Result;
use hearth_model::MaintainableType;

const MATERIALS: [&str; 6] = ["asphalt", "metal", "tile", "slate", "wood", "membrane"];

pub fn entry() -> Result<SubtypeSchemaEntry> {
    SubtypeBuilder::new(MaintainableType::Structure, "roof", "roof")
        .question(
            "material",
            FieldDefinition::enumeration(MATERIALS).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER, true, "What is the roof made of?")
                .options(options_for(&MATERIALS)),
        )?
        .question(
            "installYear",
            FieldDefinition::number()
                .int()
                .min(1800.0)
                .message("Install year must be 1800 or later")
                .optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 1, false, "What year was it installed?")
                .skipable(),
        )?
        .question(
            "squareFootage",
            FieldDefinition::number()
                .positive()
                .max(100_000.0)
                .message("Roof area seems unreasonably large")
                .optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 2, false, "Roughly how many square feet is it?")
                .skipable(),
        )?
        .field("expectedLifespan", common::expected_lifespan())
        .field("warrantyExpiration", common::warranty_expiration())
        .build()
}
