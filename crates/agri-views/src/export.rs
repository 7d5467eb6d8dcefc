//! CSV export of summary tables

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::tables::SummaryTable;
use crate::ViewError;

/// Write each table to `dir` under its export file name, creating `dir` if needed
pub fn export_tables(dir: &Path, tables: &[SummaryTable]) -> Result<Vec<PathBuf>, ViewError> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(tables.len());
    for table in tables {
        let path = dir.join(table.export_file_name());
        table.write_csv(BufWriter::new(File::create(&path)?))?;
        written.push(path);
    }

    info!("Exported {} tables to {}", written.len(), dir.display());
    Ok(written)
}
