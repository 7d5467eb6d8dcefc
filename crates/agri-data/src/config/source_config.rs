//! Source selection and dashboard settings

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use agri_core::data::DataSource;

use crate::sources::{CsvSource, JsonSource, MockSource};
use crate::DataError;

/// Settings for the synthetic data generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// RNG seed; the same seed always produces the same dataset
    pub seed: u64,

    pub farmers: usize,
    pub crops: usize,
    pub livestock: usize,
    pub aquaculture: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            farmers: 100,
            crops: 150,
            livestock: 120,
            aquaculture: 80,
        }
    }
}

/// Where the survey records come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Seeded synthetic data
    Mock(MockConfig),

    /// Directory of `farmers.json`, `crops.json`, `livestock.json`, `aquaculture.json`
    Json { dir: PathBuf },

    /// Directory of `farmers.csv`, `crops.csv`, `livestock.csv`, `aquaculture.csv`
    Csv { dir: PathBuf },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Mock(MockConfig::default())
    }
}

impl SourceConfig {
    /// Instantiate the configured data source
    pub fn build(&self) -> Result<Box<dyn DataSource>, DataError> {
        match self {
            SourceConfig::Mock(config) => Ok(Box::new(MockSource::new(config.clone()))),
            SourceConfig::Json { dir } => Ok(Box::new(JsonSource::new(checked_dir(dir)?))),
            SourceConfig::Csv { dir } => Ok(Box::new(CsvSource::new(checked_dir(dir)?))),
        }
    }
}

fn checked_dir(dir: &Path) -> Result<PathBuf, DataError> {
    if dir.is_dir() {
        Ok(dir.to_path_buf())
    } else {
        Err(DataError::InvalidConfig(format!(
            "data directory {} does not exist",
            dir.display()
        )))
    }
}

/// Top-level dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Data source settings
    pub source: SourceConfig,

    /// Rows per page of a summary table
    pub page_size: usize,

    /// Maximum memoized summaries kept per domain
    pub cache_entries: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            page_size: 10,
            cache_entries: 64,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text).map_err(|e| DataError::Json {
            file: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no view can work with
    pub fn validate(&self) -> Result<(), DataError> {
        if self.page_size == 0 {
            return Err(DataError::InvalidConfig("page_size must be at least 1".to_string()));
        }
        if self.cache_entries == 0 {
            return Err(DataError::InvalidConfig(
                "cache_entries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.source, SourceConfig::Mock(MockConfig::default()));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"source": {{"kind": "mock", "seed": 9, "farmers": 5}}, "page_size": 25}}"#
        )
        .unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.cache_entries, 64);
        match config.source {
            SourceConfig::Mock(mock) => {
                assert_eq!(mock.seed, 9);
                assert_eq!(mock.farmers, 5);
                assert_eq!(mock.crops, 150);
            }
            other => panic!("unexpected source {:?}", other),
        }
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"page_size": 0}}"#).unwrap();
        assert!(matches!(
            DashboardConfig::from_file(file.path()),
            Err(DataError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_missing_directory() {
        let config = SourceConfig::Csv {
            dir: PathBuf::from("/definitely/not/here"),
        };
        assert!(matches!(config.build(), Err(DataError::InvalidConfig(_))));
    }
}
