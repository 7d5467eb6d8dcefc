//! In-memory record store

use serde::{Deserialize, Serialize};

use crate::records::{AquacultureOperation, CropPlanting, Domain, LivestockHolding, Located, Person};

/// The full survey dataset, loaded once and never mutated afterwards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordStore {
    /// Surveyed farmers
    pub people: Vec<Person>,

    /// Crop plantings, each referencing a farmer by id
    pub crops: Vec<CropPlanting>,

    /// Livestock holdings, each referencing a farmer by id
    pub livestock: Vec<LivestockHolding>,

    /// Aquaculture operations, each referencing a farmer by id
    pub aquaculture: Vec<AquacultureOperation>,
}

impl RecordStore {
    /// Create a store from the four collections
    pub fn new(
        people: Vec<Person>,
        crops: Vec<CropPlanting>,
        livestock: Vec<LivestockHolding>,
        aquaculture: Vec<AquacultureOperation>,
    ) -> Self {
        Self {
            people,
            crops,
            livestock,
            aquaculture,
        }
    }

    /// Number of records held for a domain
    pub fn len(&self, domain: Domain) -> usize {
        match domain {
            Domain::Demographics => self.people.len(),
            Domain::Crops => self.crops.len(),
            Domain::Livestock => self.livestock.len(),
            Domain::Aquaculture => self.aquaculture.len(),
        }
    }

    /// Whether every collection is empty
    pub fn is_empty(&self) -> bool {
        Domain::ALL.iter().all(|domain| self.len(*domain) == 0)
    }

    /// Records of a domain viewed through their location only
    pub fn locations(&self, domain: Domain) -> Vec<&dyn Located> {
        match domain {
            Domain::Demographics => self.people.iter().map(|r| r as &dyn Located).collect(),
            Domain::Crops => self.crops.iter().map(|r| r as &dyn Located).collect(),
            Domain::Livestock => self.livestock.iter().map(|r| r as &dyn Located).collect(),
            Domain::Aquaculture => self.aquaculture.iter().map(|r| r as &dyn Located).collect(),
        }
    }
}
