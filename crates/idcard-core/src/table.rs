//! Administrative code table: flat prefix → name mappings for the three
//! administrative levels.
//!
//! Serialised as the `location.json` artifact:
//!
//! ```json
//! { "provinces": { "11": "北京市" }, "cities": { "5102": "重庆市" }, "countries": { "510232": "璧山县" } }
//! ```
//!
//! The county mapping keeps the `countries` field name of the artifact.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Province-level cities without a distinct county layer in the table.
pub const MUNICIPALITIES: &[&str] = &["北京", "天津", "上海", "重庆"];

/// Read-only lookup table from administrative code prefixes to names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministrativeCodeTable {
    /// 2-digit prefix → province name
    #[serde(default)]
    pub provinces: BTreeMap<String, String>,
    /// 4-digit prefix (or full 6-digit code) → city name
    #[serde(default)]
    pub cities: BTreeMap<String, String>,
    /// 6-digit code → county name
    #[serde(default, rename = "countries")]
    pub counties: BTreeMap<String, String>,
}

impl AdministrativeCodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn province(&self, code: &str) -> Option<&str> {
        self.provinces.get(code).map(String::as_str)
    }

    pub fn city(&self, code: &str) -> Option<&str> {
        self.cities.get(code).map(String::as_str)
    }

    pub fn county(&self, code: &str) -> Option<&str> {
        self.counties.get(code).map(String::as_str)
    }

    /// True when none of the three mappings has an entry.
    pub fn is_empty(&self) -> bool {
        self.provinces.is_empty() && self.cities.is_empty() && self.counties.is_empty()
    }

    /// Total number of entries across all three mappings.
    pub fn len(&self) -> usize {
        self.provinces.len() + self.cities.len() + self.counties.len()
    }
}

/// Whether a province name denotes a municipality.
///
/// Matches with or without the trailing `市` ("北京" and "北京市").
pub fn is_municipality(province: &str) -> bool {
    let bare = province.strip_suffix('市').unwrap_or(province);
    MUNICIPALITIES.contains(&bare)
}
