//! Plain-text rendering of parsed identity records.

use idcard_core::{IdentityRecord, Sex};
use idcard_store::ScanHit;

const MISSING: &str = "-";

fn or_missing(value: &str) -> &str {
    if value.is_empty() { MISSING } else { value }
}

fn sex_label(sex: Sex) -> &'static str {
    match sex {
        Sex::Male => "male",
        Sex::Female => "female",
    }
}

/// Vertical card for a single record.
pub fn card(record: &IdentityRecord) -> String {
    let mut out = format!("{}\n", record.id_card());
    if !record.matches_pattern() {
        out.push_str("  (does not match the idcard format)\n");
    }
    for (label, value) in [
        ("province", or_missing(record.province())),
        ("city", or_missing(record.city())),
        ("county", or_missing(record.county())),
        ("sex", sex_label(record.sex())),
    ] {
        out.push_str(&format!("  {label:<9}{value}\n"));
    }
    out.push_str(&format!("  {:<9}{}\n", "age", record.age()));
    out
}

/// One tab-separated line per scan hit: line, id, province, city, county.
pub fn scan_line(hit: &ScanHit) -> String {
    let r = &hit.record;
    format!(
        "{}\t{}\t{}\t{}\t{}",
        hit.line,
        r.id_card(),
        or_missing(r.province()),
        or_missing(r.city()),
        or_missing(r.county()),
    )
}
