use serde::{Deserialize, Serialize};

use super::{FilterLevel, ALL};
use crate::records::{Domain, Located};

/// A three-level geographic selection for one domain
///
/// Each level is either a concrete value or [`ALL`]. A selection is expected
/// to be consistent (no concrete level below an `All` level); the cascading
/// reset in [`FilterState::set_filter`] keeps it that way, but values injected
/// directly are not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(alias = "county")]
    pub region: String,

    #[serde(alias = "subcounty")]
    pub subregion: String,

    #[serde(alias = "ward")]
    pub locality: String,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            region: ALL.to_string(),
            subregion: ALL.to_string(),
            locality: ALL.to_string(),
        }
    }
}

impl FilterSelection {
    /// Build a selection from explicit values
    pub fn new(
        region: impl Into<String>,
        subregion: impl Into<String>,
        locality: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            subregion: subregion.into(),
            locality: locality.into(),
        }
    }

    /// Selection restricted to a single region
    pub fn region(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }

    /// Value at a level
    pub fn get(&self, level: FilterLevel) -> &str {
        match level {
            FilterLevel::Region => &self.region,
            FilterLevel::Subregion => &self.subregion,
            FilterLevel::Locality => &self.locality,
        }
    }

    /// Whether no level restricts anything
    pub fn is_all(&self) -> bool {
        self.region == ALL && self.subregion == ALL && self.locality == ALL
    }

    /// Whether no concrete value sits below an `All` level
    pub fn is_consistent(&self) -> bool {
        if self.region == ALL && (self.subregion != ALL || self.locality != ALL) {
            return false;
        }
        !(self.subregion == ALL && self.locality != ALL)
    }

    /// Copy of this selection with one level set back to `All`
    pub fn loosened(&self, level: FilterLevel) -> Self {
        let mut loosened = self.clone();
        match level {
            FilterLevel::Region => loosened.region = ALL.to_string(),
            FilterLevel::Subregion => loosened.subregion = ALL.to_string(),
            FilterLevel::Locality => loosened.locality = ALL.to_string(),
        }
        loosened
    }

    /// The shared filter predicate used by every view of a domain
    pub fn matches<R: Located + ?Sized>(&self, record: &R) -> bool {
        (self.region == ALL || record.region() == self.region)
            && (self.subregion == ALL || record.subregion() == self.subregion)
            && (self.locality == ALL || record.locality() == self.locality)
    }

    /// Apply a change at `level`, resetting every lower level to `All`
    fn set(&mut self, level: FilterLevel, value: String) {
        match level {
            FilterLevel::Region => {
                self.region = value;
                self.subregion = ALL.to_string();
                self.locality = ALL.to_string();
            }
            FilterLevel::Subregion => {
                self.subregion = value;
                self.locality = ALL.to_string();
            }
            FilterLevel::Locality => {
                self.locality = value;
            }
        }
    }
}

/// Independent filter selections for the four domains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub demographics: FilterSelection,
    pub crops: FilterSelection,
    pub livestock: FilterSelection,
    pub aquaculture: FilterSelection,
}

impl FilterState {
    /// Create a state with every level of every domain set to `All`
    pub fn new() -> Self {
        Self::default()
    }

    /// Current selection for a domain
    pub fn selection(&self, domain: Domain) -> &FilterSelection {
        match domain {
            Domain::Demographics => &self.demographics,
            Domain::Crops => &self.crops,
            Domain::Livestock => &self.livestock,
            Domain::Aquaculture => &self.aquaculture,
        }
    }

    fn selection_mut(&mut self, domain: Domain) -> &mut FilterSelection {
        match domain {
            Domain::Demographics => &mut self.demographics,
            Domain::Crops => &mut self.crops,
            Domain::Livestock => &mut self.livestock,
            Domain::Aquaculture => &mut self.aquaculture,
        }
    }

    /// Set one level of a domain's selection
    ///
    /// Changing the region resets subregion and locality; changing the
    /// subregion resets locality. Any value is accepted.
    pub fn set_filter(&mut self, domain: Domain, level: FilterLevel, value: impl Into<String>) {
        self.selection_mut(domain).set(level, value.into());
    }

    /// Replace a domain's selection wholesale, without validation
    pub fn replace(&mut self, domain: Domain, selection: FilterSelection) {
        *self.selection_mut(domain) = selection;
    }

    /// Reset one domain to all-`All`
    pub fn reset(&mut self, domain: Domain) {
        *self.selection_mut(domain) = FilterSelection::default();
    }

    /// Reset every domain to all-`All`
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }
}
