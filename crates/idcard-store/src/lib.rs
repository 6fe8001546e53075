//! Administrative code table storage: building `location.json` from the raw
//! dataset, loading it, and lazy process-wide access for parsing.

mod error;
pub use error::DataError;

pub mod artifact;
pub mod builder;
pub mod scan;
pub mod service;

use std::sync::OnceLock;

use idcard_core::{IdCardError, IdentityRecord};

pub use artifact::{load_table, write_table};
pub use builder::{RawDataset, build_location_file, build_table, build_table_from_json};
pub use scan::{ScanHit, extract_ids, scan_file, scan_text};
pub use service::{CodeTableService, DEFAULT_LOCATION_PATH};

/// Default raw dataset path, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "database.json";

static DEFAULT_SERVICE: OnceLock<CodeTableService> = OnceLock::new();

/// Process-wide service over `./location.json`.
pub fn default_service() -> &'static CodeTableService {
    DEFAULT_SERVICE.get_or_init(CodeTableService::default)
}

/// Parse `id` against the process-wide table, loading it on first call.
///
/// Only a format-validation failure is returned as an error. Lookup, birthday
/// and sequence failures are logged and leave the field empty (or zero).
pub fn parse(id: &str) -> Result<IdentityRecord, IdCardError> {
    default_service().parse(id)
}
