//! Clothes washer

use super::{FIRST_METADATA_ORDER, SubtypeBuilder, common, options_for};
use crate::model::FieldDefinition;
use crate::onboarding::OnboardingMetadata;
use crate::registry::SubtypeSchemaEntry;
use crate::Result;
use hearth_model::MaintainableType;

const LOADING: [&str; 2] = ["front", "top"];

pub fn entry() -> Result<SubtypeSchemaEntry> {
    SubtypeBuilder::new(MaintainableType::Appliance, "washer", "washer")
        .question(
            "loading",
            FieldDefinition::enumeration(LOADING).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER, false, "Is it front or top loading?")
                .options(options_for(&LOADING))
                .skipable(),
        )?
        .question(
            "capacity",
            FieldDefinition::number().positive().max(10.0).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 1, false, "What is its drum capacity in cubic feet?")
                .skipable(),
        )?
        .field("brand", common::brand())
        .field("model", common::model())
        .field("purchaseDate", common::purchase_date())
        .field("purchasePrice", common::purchase_price())
        .field("expectedLifespan", common::expected_lifespan())
        .build()
}
