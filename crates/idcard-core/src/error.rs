use thiserror::Error;

/// Hard failure of a parse call.
///
/// Only format validation can fail a parse; every field-level problem is
/// reported as a [`FieldError`] instead.
#[derive(Debug, Clone, Error)]
pub enum IdCardError {
    #[error("idcard format error: {0}")]
    Format(#[from] regex::Error),
}

/// Which derived field a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Province,
    City,
    County,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Region::Province => "province",
            Region::City => "city",
            Region::County => "county",
        })
    }
}

/// Failure to derive a single field of an [`IdentityRecord`](crate::IdentityRecord).
///
/// The field stays at its zero value; the other fields are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{region} not found: {id}")]
    Lookup { region: Region, id: String },

    #[error("birthday invalid: {birthday:?} in {id}")]
    Birthday { id: String, birthday: String },

    #[error("sequence digit invalid: {id}")]
    Sequence { id: String },
}

impl FieldError {
    pub(crate) fn lookup(region: Region, id: &str) -> Self {
        FieldError::Lookup {
            region,
            id: id.to_string(),
        }
    }
}
