//! CSV writers for pipeline outputs

use crate::error::PipelineError;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serialize rows to a CSV file, creating parent directories as needed.
///
/// Column order follows the row struct's field order; `Option` fields are
/// written as empty cells.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut wtr = csv::Writer::from_path(path).map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    for row in rows {
        wtr.serialize(row).map_err(|source| PipelineError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
