//! Survey record types
//!
//! Every record is immutable once loaded. Serialized field names follow the
//! survey export format (`county`, `subcounty`, `ward`, ...), so the same types
//! read both the JSON payloads and CSV exports of the survey.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Label used for a categorical field that is absent from the input
pub const UNDEFINED: &str = "undefined";

fn undefined() -> String {
    UNDEFINED.to_string()
}

/// One of the four data categories shown by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Demographics,
    Crops,
    Livestock,
    Aquaculture,
}

impl Domain {
    /// All domains in tab order
    pub const ALL: [Domain; 4] = [
        Domain::Demographics,
        Domain::Crops,
        Domain::Livestock,
        Domain::Aquaculture,
    ];

    /// Stable lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Demographics => "demographics",
            Domain::Crops => "crops",
            Domain::Livestock => "livestock",
            Domain::Aquaculture => "aquaculture",
        }
    }

    /// Human readable title
    pub fn title(&self) -> &'static str {
        match self {
            Domain::Demographics => "Demographics",
            Domain::Crops => "Crops",
            Domain::Livestock => "Livestock",
            Domain::Aquaculture => "Aquaculture",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demographics" | "farmers" => Ok(Domain::Demographics),
            "crops" => Ok(Domain::Crops),
            "livestock" => Ok(Domain::Livestock),
            "aquaculture" => Ok(Domain::Aquaculture),
            _ => Err(ParseError::UnknownDomain(s.to_string())),
        }
    }
}

/// Records placed in the region → subregion → locality taxonomy
pub trait Located {
    fn region(&self) -> &str;
    fn subregion(&self) -> &str;
    fn locality(&self) -> &str;
}

impl<T: Located + ?Sized> Located for &T {
    fn region(&self) -> &str {
        (**self).region()
    }

    fn subregion(&self) -> &str {
        (**self).subregion()
    }

    fn locality(&self) -> &str {
        (**self).locality()
    }
}

macro_rules! impl_located {
    ($($t:ty),*) => {
        $(
            impl Located for $t {
                fn region(&self) -> &str {
                    &self.region
                }

                fn subregion(&self) -> &str {
                    &self.subregion
                }

                fn locality(&self) -> &str {
                    &self.locality
                }
            }
        )*
    }
}

/// Formal agricultural training answer
///
/// The survey encodes this as `0` (no), `1` (yes) and `2` (nothing recorded).
/// Missing data is kept as its own variant rather than folded into `No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TrainingStatus {
    No,
    Yes,
    #[default]
    NotRecorded,
}

impl TrainingStatus {
    /// Label shown in the training breakdown
    pub fn label(&self) -> &'static str {
        match self {
            TrainingStatus::No => "No",
            TrainingStatus::Yes => "Yes",
            TrainingStatus::NotRecorded => "None",
        }
    }
}

impl TryFrom<u8> for TrainingStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TrainingStatus::No),
            1 => Ok(TrainingStatus::Yes),
            2 => Ok(TrainingStatus::NotRecorded),
            other => Err(format!("invalid training code {}, expected 0, 1 or 2", other)),
        }
    }
}

impl From<TrainingStatus> for u8 {
    fn from(status: TrainingStatus) -> Self {
        match status {
            TrainingStatus::No => 0,
            TrainingStatus::Yes => 1,
            TrainingStatus::NotRecorded => 2,
        }
    }
}

/// A surveyed farmer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,

    pub name: String,

    #[serde(default = "undefined")]
    pub gender: String,

    pub year_of_birth: i32,

    #[serde(rename = "county", default = "undefined")]
    pub region: String,

    #[serde(rename = "subcounty", default = "undefined")]
    pub subregion: String,

    #[serde(rename = "ward", default = "undefined")]
    pub locality: String,

    /// Takes part in crop production
    #[serde(with = "flag")]
    pub crop_production: bool,

    /// Takes part in livestock production
    #[serde(with = "flag")]
    pub livestock_production: bool,

    #[serde(rename = "highest_level_of_formal_education", default = "undefined")]
    pub education: String,

    #[serde(rename = "formal_training_in_agriculture", default)]
    pub training: TrainingStatus,
}

impl Person {
    /// Age in whole years at `current_year`
    pub fn age_in(&self, current_year: i32) -> i32 {
        current_year - self.year_of_birth
    }

    /// Whether the person farms crops, livestock or both
    pub fn is_farming_household(&self) -> bool {
        self.crop_production || self.livestock_production
    }
}

/// One crop planted by a farmer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropPlanting {
    pub id: u64,

    /// Identifier of the owning [`Person`]
    pub farmer_id: u64,

    #[serde(default = "undefined")]
    pub crop_name: String,

    pub acreage: f64,

    #[serde(rename = "county", default = "undefined")]
    pub region: String,

    #[serde(rename = "subcounty", default = "undefined")]
    pub subregion: String,

    #[serde(rename = "ward", default = "undefined")]
    pub locality: String,

    #[serde(default = "undefined")]
    pub water_source: String,

    #[serde(default = "undefined")]
    pub production_system: String,

    #[serde(default = "undefined")]
    pub purpose: String,

    #[serde(rename = "use_of_certified_seeds", with = "flag")]
    pub certified_seeds: bool,
}

/// Animals of one species/sub-category kept by a farmer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivestockHolding {
    pub id: u64,

    /// Identifier of the owning [`Person`]
    pub farmer_id: u64,

    #[serde(rename = "livestock_name", default = "undefined")]
    pub species: String,

    #[serde(rename = "livestock_sub_category", default = "undefined")]
    pub sub_category: String,

    #[serde(rename = "county", default = "undefined")]
    pub region: String,

    #[serde(rename = "subcounty", default = "undefined")]
    pub subregion: String,

    #[serde(rename = "ward", default = "undefined")]
    pub locality: String,

    #[serde(rename = "male_livestock_count")]
    pub male_count: u32,

    #[serde(rename = "female_livestock_count")]
    pub female_count: u32,

    #[serde(default = "undefined")]
    pub production_system: String,

    #[serde(default = "undefined")]
    pub age_group: String,
}

impl LivestockHolding {
    /// Head count, always derived from the male and female counts
    pub fn total_head(&self) -> u64 {
        u64::from(self.male_count) + u64::from(self.female_count)
    }
}

/// A fish farming operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AquacultureOperation {
    pub id: u64,

    /// Identifier of the owning [`Person`]
    pub farmer_id: u64,

    #[serde(rename = "aquaculture_species", default = "undefined")]
    pub species: String,

    #[serde(rename = "aquaculture_species_category", default = "undefined")]
    pub species_category: String,

    #[serde(rename = "county", default = "undefined")]
    pub region: String,

    #[serde(rename = "subcounty", default = "undefined")]
    pub subregion: String,

    #[serde(rename = "ward", default = "undefined")]
    pub locality: String,

    #[serde(rename = "type_of_production_system", default = "undefined")]
    pub production_system: String,

    #[serde(rename = "estimated_no_of_fingerlings")]
    pub fingerlings: u64,
}

impl_located!(Person, CropPlanting, LivestockHolding, AquacultureOperation);

/// Boolean survey flags stored as `0`/`1`
mod flag {
    use std::fmt;

    use serde::de::{self, Unexpected, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        deserializer.deserialize_any(FlagVisitor)
    }

    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("0, 1, true or false")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(Unexpected::Unsigned(other), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(Unexpected::Signed(other), &self)),
            }
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
            match value.trim().to_ascii_lowercase().as_str() {
                "0" | "false" => Ok(false),
                "1" | "true" => Ok(true),
                _ => Err(E::invalid_value(Unexpected::Str(value), &self)),
            }
        }
    }
}
