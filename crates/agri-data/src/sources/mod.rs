pub mod csv_source;
pub mod json_source;
pub mod mock_source;

pub use csv_source::CsvSource;
pub use json_source::JsonSource;
pub use mock_source::MockSource;

use std::path::{Path, PathBuf};

use crate::DataError;

/// Path of a collection file, failing early if it is absent
pub(crate) fn collection_path(dir: &Path, name: &str, extension: &str) -> Result<PathBuf, DataError> {
    let path = dir.join(format!("{}.{}", name, extension));
    if path.is_file() {
        Ok(path)
    } else {
        Err(DataError::MissingFile(path))
    }
}

/// File name used in error messages
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("unknown")
        .to_string()
}
