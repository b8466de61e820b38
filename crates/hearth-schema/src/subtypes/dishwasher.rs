//! Dishwasher

use super::{FIRST_METADATA_ORDER, SubtypeBuilder, common};
use crate::model::FieldDefinition;
use crate::onboarding::OnboardingMetadata;
use crate::registry::SubtypeSchemaEntry;
use crate::Result;
use hearth_model::MaintainableType;

pub fn entry() -> Result<SubtypeSchemaEntry> {
    SubtypeBuilder::new(MaintainableType::Appliance, "dishwasher", "dishwasher")
        .question(
            "brand",
            common::brand(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER, false, "What brand is it?").skipable(),
        )?
        .question(
            "model",
            common::model(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 1, false, "What model is it?")
                .skipable(),
        )?
        .question(
            "placeSettings",
            FieldDefinition::number()
                .int()
                .positive()
                .max(20.0)
                .optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 2, false, "How many place settings does it hold?")
                .skipable(),
        )?
        .field("serialNumber", common::serial_number())
        .field("purchaseDate", common::purchase_date())
        .field("purchasePrice", common::purchase_price())
        .field("expectedLifespan", common::expected_lifespan())
        .field("warrantyExpiration", common::warranty_expiration())
        .build()
}
