//! Central air and heat pump cooling

use super::{FIRST_METADATA_ORDER, SubtypeBuilder, common, options_for};
use crate::model::FieldDefinition;
use crate::onboarding::OnboardingMetadata;
use crate::registry::SubtypeSchemaEntry;
use crate::Result;
use hearth_model::MaintainableType;

const STYLES: [&str; 4] = ["central", "heat-pump", "mini-split", "window"];

pub fn entry() -> Result<SubtypeSchemaEntry> {
    SubtypeBuilder::new(MaintainableType::System, "cooling", "cooling system")
        .question(
            "style",
            FieldDefinition::enumeration(STYLES).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER, true, "What kind of cooling is it?")
                .options(options_for(&STYLES)),
        )?
        .question(
            "tonnage",
            FieldDefinition::number()
                .positive()
                .max(20.0)
                .message("Tonnage seems unreasonably large")
                .optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 1, false, "What is its capacity in tons?")
                .skipable(),
        )?
        .question(
            "seer",
            FieldDefinition::number().positive().max(40.0).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 2, false, "What is its SEER rating?")
                .skipable(),
        )?
        .field("brand", common::brand())
        .field("installDate", common::install_date())
        .field("expectedLifespan", common::expected_lifespan())
        .build()
}
