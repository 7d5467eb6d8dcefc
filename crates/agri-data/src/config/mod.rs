//! Dashboard and data source configuration

pub mod source_config;

pub use source_config::*;
