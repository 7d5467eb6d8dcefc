//! Per-domain geographic filtering

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::records::Domain;
use crate::ParseError;

mod engine;
mod selection;
mod subscriber;

pub use engine::FilterEngine;
pub use selection::{FilterSelection, FilterState};
pub use subscriber::FilterSubscriber;

/// Sentinel meaning "no restriction" at a filter level
pub const ALL: &str = "All";

/// The three nested administrative levels a selection can restrict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterLevel {
    /// County
    Region,
    /// Subcounty
    Subregion,
    /// Ward
    Locality,
}

impl fmt::Display for FilterLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FilterLevel::Region => "region",
            FilterLevel::Subregion => "subregion",
            FilterLevel::Locality => "locality",
        })
    }
}

impl FromStr for FilterLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "region" | "county" => Ok(FilterLevel::Region),
            "subregion" | "subcounty" => Ok(FilterLevel::Subregion),
            "locality" | "ward" => Ok(FilterLevel::Locality),
            _ => Err(ParseError::UnknownLevel(s.to_string())),
        }
    }
}

/// Context passed to subscribers after a filter changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterContext {
    pub domain: Domain,
    pub selection: FilterSelection,
}
