//! Command line arguments

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

use agri_core::Domain;
use agri_data::config::MockConfig;
use agri_data::{DashboardConfig, SourceConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    Mock,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "farmdash", about = "Farm survey dashboard summaries", version)]
pub struct CliArgs {
    #[arg(long, value_name = "FILE", help = "Path to a JSON configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, help = "Where to read survey records from")]
    pub source: Option<SourceKind>,

    #[arg(
        long,
        env = "FARMDASH_DATA_DIR",
        value_name = "DIR",
        help = "Directory holding farmers, crops, livestock and aquaculture files"
    )]
    pub data_dir: Option<PathBuf>,

    #[arg(long, help = "Seed for generated mock data")]
    pub seed: Option<u64>,

    #[arg(long, help = "Only report this domain (demographics, crops, livestock, aquaculture)")]
    pub domain: Option<Domain>,

    #[arg(long, alias = "county")]
    pub region: Option<String>,

    #[arg(long, alias = "subcounty")]
    pub subregion: Option<String>,

    #[arg(long, alias = "ward")]
    pub locality: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, value_name = "DIR", help = "Write every summary table as CSV into DIR")]
    pub export: Option<PathBuf>,

    #[arg(long, default_value_t = 0, help = "Zero-based page of each table to print")]
    pub page: usize,

    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub page_size: Option<usize>,

    #[arg(long, help = "Year ages are computed against (defaults to the current year)")]
    pub year: Option<i32>,
}

impl CliArgs {
    /// Configuration file (or defaults) with command line overrides applied
    pub fn resolve(&self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::from_file(path)?,
            None => DashboardConfig::default(),
        };

        match self.source {
            Some(SourceKind::Mock) => {
                if !matches!(config.source, SourceConfig::Mock(_)) {
                    config.source = SourceConfig::Mock(MockConfig::default());
                }
            }
            Some(kind @ (SourceKind::Json | SourceKind::Csv)) => {
                let Some(dir) = self.data_dir.clone() else {
                    bail!("--data-dir is required for the {:?} source", kind);
                };
                config.source = match kind {
                    SourceKind::Json => SourceConfig::Json { dir },
                    _ => SourceConfig::Csv { dir },
                };
            }
            None => {}
        }

        if let Some(seed) = self.seed {
            match &mut config.source {
                SourceConfig::Mock(mock) => mock.seed = seed,
                _ => bail!("--seed only applies to the mock source"),
            }
        }

        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }

        config.validate()?;
        Ok(config)
    }

    /// Domains to report on
    pub fn domains(&self) -> Vec<Domain> {
        match self.domain {
            Some(domain) => vec![domain],
            None => Domain::ALL.to_vec(),
        }
    }
}
