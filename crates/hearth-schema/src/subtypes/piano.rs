//! Piano

use super::{FIRST_METADATA_ORDER, SubtypeBuilder, common, options_for};
use crate::model::FieldDefinition;
use crate::onboarding::OnboardingMetadata;
use crate::registry::SubtypeSchemaEntry;
use crate::Result;
use hearth_model::MaintainableType;

const STYLES: [&str; 3] = ["upright", "grand", "digital"];

pub fn entry() -> Result<SubtypeSchemaEntry> {
    SubtypeBuilder::new(MaintainableType::Instrument, "piano", "piano")
        .question(
            "style",
            FieldDefinition::enumeration(STYLES).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER, true, "What kind of piano is it?")
                .options(options_for(&STYLES)),
        )?
        .question(
            "lastTuned",
            FieldDefinition::string().iso_date().optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 1, false, "When was it last tuned?")
                .help_text("YYYY-MM-DD")
                .skipable(),
        )?
        .field("brand", common::brand())
        .field("serialNumber", common::serial_number())
        .build()
}
