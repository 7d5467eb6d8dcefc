//! JSON directory data source
//!
//! Reads the survey API payloads (`farmers.json`, `crops.json`,
//! `livestock.json`, `aquaculture.json`), each a JSON array of records.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use agri_core::data::DataSource;
use agri_core::RecordStore;

use super::{collection_path, display_name};
use crate::DataError;

/// Loads every collection from a directory of JSON files
pub struct JsonSource {
    dir: PathBuf,
    name: String,
}

impl JsonSource {
    pub fn new(dir: PathBuf) -> Self {
        let name = dir.display().to_string();
        Self { dir, name }
    }

    /// Read all four collections synchronously
    pub fn read_all(dir: &Path) -> Result<RecordStore, DataError> {
        Ok(RecordStore::new(
            read_collection(&collection_path(dir, "farmers", "json")?)?,
            read_collection(&collection_path(dir, "crops", "json")?)?,
            read_collection(&collection_path(dir, "livestock", "json")?)?,
            read_collection(&collection_path(dir, "aquaculture", "json")?)?,
        ))
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DataError> {
    debug!("Reading {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|e| DataError::Json {
        file: display_name(path),
        message: e.to_string(),
    })
}

#[async_trait]
impl DataSource for JsonSource {
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_fixture(dir: &Path) {
        fs::write(
            dir.join("farmers.json"),
            r#"[{"id": 1, "name": "Farmer 1", "gender": "Male", "year_of_birth": 1970,
                 "county": "Nairobi", "subcounty": "Westlands", "ward": "Kangemi",
                 "crop_production": 1, "livestock_production": 1,
                 "highest_level_of_formal_education": "Tertiary",
                 "formal_training_in_agriculture": 1}]"#,
        )
        .unwrap();
        fs::write(
            dir.join("crops.json"),
            r#"[{"id": 1, "farmer_id": 1, "crop_name": "Maize", "acreage": 2.5,
                 "county": "Nairobi", "subcounty": "Westlands", "ward": "Kangemi",
                 "water_source": "Irrigated", "production_system": "Commercial",
                 "purpose": "Both", "use_of_certified_seeds": 0}]"#,
        )
        .unwrap();
        fs::write(dir.join("livestock.json"), "[]").unwrap();
        fs::write(dir.join("aquaculture.json"), "[]").unwrap();
    }

    #[tokio::test]
    async fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let source = JsonSource::new(dir.path().to_path_buf());
        let store = source.load().await.unwrap();
        assert_eq!(store.people.len(), 1);
        assert_eq!(store.crops[0].crop_name, "Maize");
        assert!(store.livestock.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        fs::remove_file(dir.path().join("livestock.json")).unwrap();

        let err = JsonSource::new(dir.path().to_path_buf()).load().await.unwrap_err();
        assert!(err.to_string().contains("livestock.json"));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        fs::write(dir.path().join("crops.json"), "{not json").unwrap();

        let err = JsonSource::read_all(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::Json { ref file, .. } if file == "crops.json"));
    }
}
