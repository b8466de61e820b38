//! Windows

use super::{FIRST_METADATA_ORDER, SubtypeBuilder, common, options_for};
use crate::model::FieldDefinition;
use crate::onboarding::OnboardingMetadata;
use crate::registry::SubtypeSchemaEntry;
use crate::Result;
use hearth_model::MaintainableType;

const FRAMES: [&str; 4] = ["vinyl", "wood", "aluminum", "fiberglass"];
const GLAZING: [&str; 3] = ["single", "double", "triple"];

pub fn entry() -> Result<SubtypeSchemaEntry> {
    SubtypeBuilder::new(MaintainableType::Structure, "windows", "set of windows")
        .question(
            "count",
            FieldDefinition::number().int().positive().max(500.0).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER, false, "How many windows are there?")
                .skipable(),
        )?
        .question(
            "frame",
            FieldDefinition::enumeration(FRAMES).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 1, false, "What are the frames made of?")
                .options(options_for(&FRAMES))
                .skipable(),
        )?
        .question(
            "glazing",
            FieldDefinition::enumeration(GLAZING).optional(),
            OnboardingMetadata::new(FIRST_METADATA_ORDER + 2, false, "How many panes of glass?")
                .options(options_for(&GLAZING))
                .skipable(),
        )?
        .field("installDate", common::install_date())
        .build()
}
