//! Aggregated views over the farm survey records
//!
//! Every view of a domain is derived from one filtered record set, so counts,
//! totals and percentages shown together always describe the same population.

mod cache;
mod dashboard;
pub mod export;
mod filter;
pub mod insights;
pub mod stats;
pub mod tables;

pub use cache::{CacheKey, SummaryCache};
pub use dashboard::Dashboard;
pub use filter::filter_records;
pub use insights::KeyInsight;
pub use stats::aquaculture::{AquacultureSummary, AquacultureSummaryRow};
pub use stats::crops::{CropSummaryRow, CropsSummary};
pub use stats::demographics::DemographicsSummary;
pub use stats::livestock::{LivestockSummary, LivestockSummaryRow};
pub use stats::{CategoryCount, CategoryTotal};
pub use tables::{SortDirection, SummaryTable};

use thiserror::Error;

/// Errors raised when a view cannot be produced
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("survey data is still loading")]
    NotReady,

    #[error("survey data failed to load: {0}")]
    LoadFailed(String),

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
}
