//! Maintainable items and their closed enumerations

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level category of a maintainable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintainableType {
    Appliance,
    Structure,
    Utility,
    System,
    Vehicle,
    Instrument,
    Landscape,
    Other,
}

impl MaintainableType {
    /// Every category, in declaration order.
    pub const ALL: [MaintainableType; 8] = [
        MaintainableType::Appliance,
        MaintainableType::Structure,
        MaintainableType::Utility,
        MaintainableType::System,
        MaintainableType::Vehicle,
        MaintainableType::Instrument,
        MaintainableType::Landscape,
        MaintainableType::Other,
    ];

    /// Wire spelling of the category
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MaintainableType::Appliance => "appliance",
            MaintainableType::Structure => "structure",
            MaintainableType::Utility => "utility",
            MaintainableType::System => "system",
            MaintainableType::Vehicle => "vehicle",
            MaintainableType::Instrument => "instrument",
            MaintainableType::Landscape => "landscape",
            MaintainableType::Other => "other",
        }
    }

    /// Wire spellings of every category
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.as_str()).collect()
    }
}

impl fmt::Display for MaintainableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaintainableType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| crate::Error::unknown_variant("type", s, &Self::names()))
    }
}

/// Physical condition of a maintainable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Good,
    Fair,
    Poor,
    Critical,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::Good,
        Condition::Fair,
        Condition::Poor,
        Condition::Critical,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
            Condition::Critical => "critical",
        }
    }

    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| crate::Error::unknown_variant("condition", s, &Self::names()))
    }
}

/// Validated shape of a maintainable item.
///
/// `metadata` is kept as raw JSON: its effective shape depends on which
/// subtype schema accepted it. A present-but-null `metadata` is preserved as
/// `Some(Value::Null)` so a validated value serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintainableData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(rename = "type")]
    pub maintainable_type: MaintainableType,

    pub subtype: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<serde_json::Value>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl MaintainableData {
    /// Create a minimal item carrying only its discriminators
    pub fn new(maintainable_type: MaintainableType, subtype: impl Into<String>) -> Self {
        Self {
            label: None,
            maintainable_type,
            subtype: subtype.into(),
            condition: None,
            tags: None,
            location: None,
            metadata: None,
        }
    }

    /// Set the display label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the condition
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Set the location
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the subtype-specific metadata
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Look up a single metadata field, if metadata is an object
    #[must_use]
    pub fn metadata_field(&self, name: &str) -> Option<&serde_json::Value> {
        self.metadata.as_ref()?.as_object()?.get(name)
    }
}
