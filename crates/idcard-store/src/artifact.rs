//! `location.json` persistence.

use std::path::Path;

use idcard_core::AdministrativeCodeTable;

use crate::DataError;

/// Load a location table written by [`write_table`].
pub fn load_table(path: &Path) -> Result<AdministrativeCodeTable, DataError> {
    let bytes = std::fs::read(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Write `table` as JSON to `path`, replacing any existing file.
pub fn write_table(table: &AdministrativeCodeTable, path: &Path) -> Result<(), DataError> {
    let bytes = serde_json::to_vec_pretty(table)?;
    std::fs::write(path, bytes).map_err(|source| DataError::Write {
        path: path.to_path_buf(),
        source,
    })
}
