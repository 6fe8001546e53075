//! Extracts 18-digit identity numbers from free-form text (e.g. container
//! logs) and parses each one.

use std::path::Path;
use std::sync::OnceLock;

use idcard_core::{IdParser, IdentityRecord};
use regex::Regex;
use tracing::{error, info};

use crate::DataError;

static ID_RUN: OnceLock<Regex> = OnceLock::new();

fn id_run() -> &'static Regex {
    ID_RUN.get_or_init(|| Regex::new(r"[0-9]{18}").expect("static regex"))
}

/// One identity number found in scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanHit {
    /// 1-based line number.
    pub line: usize,
    pub record: IdentityRecord,
}

/// Every run of 18 ASCII digits in `text`, with its 1-based line number.
pub fn extract_ids(text: &str) -> Vec<(usize, &str)> {
    text.lines()
        .enumerate()
        .flat_map(|(i, line)| id_run().find_iter(line).map(move |m| (i + 1, m.as_str())))
        .collect()
}

/// Parse every identity number found in `text`.
///
/// IDs that fail format validation are logged and skipped.
pub fn scan_text(parser: &IdParser<'_>, text: &str) -> Vec<ScanHit> {
    extract_ids(text)
        .into_iter()
        .filter_map(|(line, id)| match parser.parse(id) {
            Ok(record) => Some(ScanHit { line, record }),
            Err(e) => {
                error!(line, id = %id, error = %e, "failed to parse idcard");
                None
            }
        })
        .collect()
}

/// Read `path` (lossily decoded as UTF-8) and [`scan_text`] its contents.
pub fn scan_file(parser: &IdParser<'_>, path: &Path) -> Result<Vec<ScanHit>, DataError> {
    let bytes = std::fs::read(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let hits = scan_text(parser, &String::from_utf8_lossy(&bytes));
    info!(path = %path.display(), count = hits.len(), "scanned file for idcards");
    Ok(hits)
}
