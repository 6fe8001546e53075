//! Lazily loaded, process-lifetime access to the location table.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use idcard_core::{AdministrativeCodeTable, IdCardError, IdParser, IdentityRecord};
use tracing::{error, info};

use crate::DataError;
use crate::artifact::load_table;

/// Default location table path, relative to the working directory.
pub const DEFAULT_LOCATION_PATH: &str = "location.json";

/// Outcome of the one-time load: the table (empty on failure) and the
/// captured failure, if any.
#[derive(Debug)]
struct Loaded {
    table: AdministrativeCodeTable,
    failure: Option<DataError>,
}

/// Owns the location table and loads it on first use.
///
/// The load runs at most once per service. Concurrent first callers block
/// until it completes and then all observe the same table. A failed load is
/// logged and leaves an empty table, so every lookup fails per field rather
/// than failing the parse.
#[derive(Debug)]
pub struct CodeTableService {
    path: PathBuf,
    loaded: OnceLock<Loaded>,
}

impl Default for CodeTableService {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATION_PATH)
    }
}

impl CodeTableService {
    /// A service that will load `path` on first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: OnceLock::new(),
        }
    }

    /// A service over an already-built table; nothing is read from disk.
    pub fn from_table(table: AdministrativeCodeTable) -> Self {
        Self {
            path: PathBuf::new(),
            loaded: OnceLock::from(Loaded {
                table,
                failure: None,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the one-time load has already run.
    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    fn loaded(&self) -> &Loaded {
        self.loaded.get_or_init(|| match load_table(&self.path) {
            Ok(table) => {
                info!(
                    path = %self.path.display(),
                    provinces = table.provinces.len(),
                    cities = table.cities.len(),
                    counties = table.counties.len(),
                    "loaded location table"
                );
                Loaded {
                    table,
                    failure: None,
                }
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to load location table");
                Loaded {
                    table: AdministrativeCodeTable::new(),
                    failure: Some(e),
                }
            }
        })
    }

    /// The table, loading it first if needed. Empty if the load failed.
    pub fn table(&self) -> &AdministrativeCodeTable {
        &self.loaded().table
    }

    /// The load failure, if the one-time load failed.
    pub fn load_error(&self) -> Option<&DataError> {
        self.loaded().failure.as_ref()
    }

    pub fn parser(&self) -> IdParser<'_> {
        IdParser::new(self.table())
    }

    /// Parse `id` against this service's table; see [`IdParser::parse`].
    pub fn parse(&self, id: &str) -> Result<IdentityRecord, IdCardError> {
        self.parser().parse(id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::builder::build_location_file;

    const SAMPLE: &str = include_str!("../data/database.sample.json");

    fn built_location(tmp: &tempfile::TempDir) -> PathBuf {
        let database = tmp.path().join("database.json");
        let location = tmp.path().join("location.json");
        std::fs::write(&database, SAMPLE).unwrap();
        build_location_file(&database, &location).unwrap();
        location
    }

    #[test]
    fn loads_lazily_on_first_use() {
        let tmp = tempfile::TempDir::new().unwrap();
        let service = CodeTableService::new(built_location(&tmp));
        assert!(!service.is_loaded());

        let record = service.parse("510232195508152414").unwrap();
        assert!(service.is_loaded());
        assert!(service.load_error().is_none());
        assert_eq!(record.province(), "四川省");
        assert_eq!(record.city(), "重庆市");
        assert_eq!(record.county(), "璧山县");
    }

    #[test]
    fn load_is_not_repeated() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = built_location(&tmp);
        let service = CodeTableService::new(&path);
        assert!(!service.table().is_empty());

        // Removing the file after the first load has no effect.
        std::fs::remove_file(&path).unwrap();
        assert!(!service.table().is_empty());
        assert!(service.load_error().is_none());
    }

    #[test]
    fn failed_load_leaves_empty_table() {
        let tmp = tempfile::TempDir::new().unwrap();
        let service = CodeTableService::new(tmp.path().join("location.json"));

        let record = service.parse("510232195508152414").unwrap();
        assert!(service.table().is_empty());
        assert!(matches!(service.load_error(), Some(DataError::Read { .. })));
        assert_eq!(record.province(), "");
        assert_eq!(record.city(), "");
        assert_eq!(record.county(), "");
        assert!(record.age() > 0);
    }

    #[test]
    fn failure_is_captured_once() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("location.json");
        let service = CodeTableService::new(&path);
        assert!(service.load_error().is_some());

        // A table appearing later is not picked up.
        std::fs::write(&path, r#"{"provinces": {"51": "四川省"}}"#).unwrap();
        assert!(service.table().is_empty());
        assert!(service.load_error().is_some());
    }

    #[test]
    fn concurrent_first_use_sees_one_table() {
        let tmp = tempfile::TempDir::new().unwrap();
        let service = Arc::new(CodeTableService::new(built_location(&tmp)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || {
                    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
                    let record = service
                        .parser()
                        .parse_at("510232195508152414", today)
                        .unwrap();
                    (service.table() as *const AdministrativeCodeTable as usize, record)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let (first_ptr, first_record) = &results[0];
        for (ptr, record) in &results {
            assert_eq!(ptr, first_ptr);
            assert_eq!(record, first_record);
        }
        assert_eq!(first_record.age(), 68);
    }

    #[test]
    fn from_table_skips_disk() {
        let mut table = AdministrativeCodeTable::new();
        table.provinces.insert("11".into(), "北京市".into());
        let service = CodeTableService::from_table(table);
        assert!(service.is_loaded());
        assert_eq!(service.path(), Path::new(""));

        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let (record, errors) = service
            .parser()
            .parse_detailed_at("110101199003078034", today)
            .unwrap();
        assert_eq!(record.province(), "北京市");
        // Municipality: a missing county is not an error, a missing city is.
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn default_path() {
        assert_eq!(
            CodeTableService::default().path(),
            Path::new(DEFAULT_LOCATION_PATH)
        );
    }
}
