//! Home property records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of dwelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HomeType {
    SingleFamily,
    MultiFamily,
    Condo,
    Townhouse,
    Apartment,
    Mobile,
    Other,
}

impl HomeType {
    pub const ALL: [HomeType; 7] = [
        HomeType::SingleFamily,
        HomeType::MultiFamily,
        HomeType::Condo,
        HomeType::Townhouse,
        HomeType::Apartment,
        HomeType::Mobile,
        HomeType::Other,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HomeType::SingleFamily => "single-family",
            HomeType::MultiFamily => "multi-family",
            HomeType::Condo => "condo",
            HomeType::Townhouse => "townhouse",
            HomeType::Apartment => "apartment",
            HomeType::Mobile => "mobile",
            HomeType::Other => "other",
        }
    }

    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|h| h.as_str()).collect()
    }
}

impl fmt::Display for HomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| crate::Error::unknown_variant("home type", s, &Self::names()))
    }
}

/// A tracked home
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    pub address: String,
    pub home_type: HomeType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_footage: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,

    /// Half baths count as 0.5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stories: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garages: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
