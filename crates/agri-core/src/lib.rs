//! Core functionality for the farm survey dashboard
//!
//! This crate provides the survey record types, the per-domain geographic
//! filter state and the cascading option lists that every view is built on.

pub mod events;
pub mod filter;
pub mod options;
pub mod records;
pub mod state;
pub mod store;

use thiserror::Error;

// Re-export commonly used types
pub use filter::{
    FilterContext, FilterEngine, FilterLevel, FilterSelection, FilterState, FilterSubscriber, ALL,
};
pub use options::{locality_options, region_options, subregion_options, FilterOptions};
pub use records::{
    AquacultureOperation, CropPlanting, Domain, LivestockHolding, Located, Person, TrainingStatus,
};
pub use state::{DashboardState, LoadStatus, LoadedStore};
pub use store::RecordStore;
pub use data::DataSource;

/// Errors raised when parsing user-supplied names into core types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown domain '{0}' (expected demographics, crops, livestock or aquaculture)")]
    UnknownDomain(String),

    #[error("unknown filter level '{0}' (expected region, subregion or locality)")]
    UnknownLevel(String),
}

pub mod data {
    use crate::store::RecordStore;

    /// Trait for data sources that supply the full survey dataset
    #[async_trait::async_trait]
    pub trait DataSource: Send + Sync {
        /// Load every record collection
        async fn load(&self) -> anyhow::Result<RecordStore>;

        /// Get the source name/path
        fn source_name(&self) -> &str;
    }
}
