//! Oven or range

use super::{FIRST_METADATA_ORDER, SubtypeBuilder, common, options_for};
use crate::model::FieldDefinition;
use crate::onboarding::OnboardingMetadata;
use crate::registry::SubtypeSchemaEntry;
use crate::Result;
use hearth_model::MaintainableType;

const FUELS: [&str; 3] = ["gas", "electric", "induction"];

pub fn entry() -> Result<SubtypeSchemaEntry> {
    SubtypeBuilder::new(MaintainableType::Appliance, "oven", "oven")
        .question(
            "fuel",
            FieldDefinition::enumeration(FUELS).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER, true, "How does it cook?")
                .options(options_for(&FUELS)),
        )?
        .question(
            "selfCleaning",
            FieldDefinition::boolean().optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 1, false, "Is it self-cleaning?")
                .skipable(),
        )?
        .field("brand", common::brand())
        .field("model", common::model())
        .field("purchaseDate", common::purchase_date())
        .field("expectedLifespan", common::expected_lifespan())
        .build()
}
