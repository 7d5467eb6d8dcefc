//! CSV directory data source
//!
//! Reads `farmers.csv`, `crops.csv`, `livestock.csv` and `aquaculture.csv`,
//! each with a header row of survey field names.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use agri_core::data::DataSource;
use agri_core::RecordStore;

use super::{collection_path, display_name};
use crate::DataError;

/// Loads every collection from a directory of CSV files
pub struct CsvSource {
    dir: PathBuf,
    name: String,
}

impl CsvSource {
    pub fn new(dir: PathBuf) -> Self {
        let name = dir.display().to_string();
        Self { dir, name }
    }

    /// Read all four collections synchronously
    pub fn read_all(dir: &Path) -> Result<RecordStore, DataError> {
        Ok(RecordStore::new(
            read_collection(&collection_path(dir, "farmers", "csv")?)?,
            read_collection(&collection_path(dir, "crops", "csv")?)?,
            read_collection(&collection_path(dir, "livestock", "csv")?)?,
            read_collection(&collection_path(dir, "aquaculture", "csv")?)?,
        ))
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DataError> {
    debug!("Reading {}", path.display());
    let csv_error = |e: csv::Error| DataError::Csv {
        file: display_name(path),
        message: e.to_string(),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    let records = reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(csv_error)?;

    if records.is_empty() {
        warn!("{} contains no records", display_name(path));
    }
    Ok(records)
}

#[async_trait]
impl DataSource for CsvSource {
    async fn load(&self) -> anyhow::Result<RecordStore> {
        let dir = self.dir.clone();
        let store = tokio::task::spawn_blocking(move || Self::read_all(&dir))
            .await
            .map_err(DataError::from)??;
        Ok(store)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
