//! Builds the flat [`AdministrativeCodeTable`] from the nested `database.json`
//! dataset.
//!
//! The dataset maps hierarchical path keys to lists of `"name|code"` entries.
//! The number of path segments gives the administrative level:
//!
//! | key       | level    | table key                                   |
//! |-----------|----------|---------------------------------------------|
//! | `"3"`     | province | first 2 digits of the code                  |
//! | `"3_1"`   | city     | first 4 digits for `NNNN00`, else full code |
//! | `"3_1_4"` | county   | full code                                   |
//!
//! Segments may be separated by `_` or `.`. Keys of any other shape are
//! skipped.

use std::collections::BTreeMap;
use std::path::Path;

use idcard_core::AdministrativeCodeTable;
use tracing::{debug, info};

use crate::DataError;
use crate::artifact::write_table;

/// Raw dataset: path key → `"name|code"` entries.
pub type RawDataset = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Province,
    City,
    County,
}

fn level(key: &str) -> Option<Level> {
    let segments: Vec<&str> = key.split(['_', '.']).collect();
    if !segments
        .iter()
        .all(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }
    match segments.len() {
        1 if segments[0].len() == 1 => Some(Level::Province),
        1 => None,
        2 => Some(Level::City),
        _ => Some(Level::County),
    }
}

/// City codes of the form `NNNN00` are keyed by their 4-digit prefix.
fn city_key(code: &str) -> &str {
    if code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit()) && code.ends_with("00") {
        &code[..4]
    } else {
        code
    }
}

fn split_entry<'e>(key: &str, entry: &'e str) -> Result<(&'e str, &'e str), DataError> {
    match entry.split_once('|') {
        Some((name, code)) if !code.is_empty() => Ok((name, code)),
        _ => Err(DataError::MalformedEntry {
            key: key.to_string(),
            entry: entry.to_string(),
        }),
    }
}

/// Flatten a raw dataset into the three lookup mappings.
pub fn build_table(raw: &RawDataset) -> Result<AdministrativeCodeTable, DataError> {
    let mut table = AdministrativeCodeTable::new();

    for (key, entries) in raw {
        let Some(level) = level(key) else {
            debug!(key = %key, "skipping key with unrecognised level");
            continue;
        };

        for entry in entries {
            let (name, code) = split_entry(key, entry)?;
            match level {
                Level::Province => {
                    let prefix = code.get(0..2).ok_or_else(|| DataError::MalformedEntry {
                        key: key.clone(),
                        entry: entry.clone(),
                    })?;
                    table.provinces.insert(prefix.to_string(), name.to_string());
                }
                Level::City => {
                    table
                        .cities
                        .insert(city_key(code).to_string(), name.to_string());
                }
                Level::County => {
                    table.counties.insert(code.to_string(), name.to_string());
                }
            }
        }
    }

    Ok(table)
}

/// Parse raw dataset JSON and flatten it.
pub fn build_table_from_json(bytes: &[u8]) -> Result<AdministrativeCodeTable, DataError> {
    let raw: RawDataset = serde_json::from_slice(bytes)?;
    build_table(&raw)
}

/// Read `database`, flatten it, and write the location table to `output`.
pub fn build_location_file(
    database: &Path,
    output: &Path,
) -> Result<AdministrativeCodeTable, DataError> {
    let bytes = std::fs::read(database).map_err(|source| DataError::Read {
        path: database.to_path_buf(),
        source,
    })?;
    let table = build_table_from_json(&bytes)?;
    write_table(&table, output)?;
    info!(
        database = %database.display(),
        output = %output.display(),
        provinces = table.provinces.len(),
        cities = table.cities.len(),
        counties = table.counties.len(),
        "built location table"
    );
    Ok(table)
}
