//! Field derivation for identity-card numbers.
//!
//! Each field (province, city, county, age, sex) is derived independently.
//! A failure in one leaves that field at its zero value and does not stop
//! the others.

use chrono::{Datelike, Local, NaiveDate};
use tracing::{error, warn};

use crate::error::{FieldError, Region};
use crate::pattern::check_format;
use crate::table::{AdministrativeCodeTable, is_municipality};
use crate::{IdCardError, IdentityRecord, Sex};

/// Parses identity-card numbers against a borrowed [`AdministrativeCodeTable`].
#[derive(Debug, Clone, Copy)]
pub struct IdParser<'a> {
    table: &'a AdministrativeCodeTable,
}

impl<'a> IdParser<'a> {
    pub fn new(table: &'a AdministrativeCodeTable) -> Self {
        Self { table }
    }

    /// Parse `id` using today's local date for the age.
    ///
    /// Field-level errors are logged and dropped; the returned error only
    /// reflects format validation. Inspect the record's fields to detect
    /// partial failures, or use [`parse_detailed`](Self::parse_detailed).
    pub fn parse(&self, id: &str) -> Result<IdentityRecord, IdCardError> {
        self.parse_at(id, Local::now().date_naive())
    }

    /// Like [`parse`](Self::parse), with an explicit current date.
    pub fn parse_at(&self, id: &str, today: NaiveDate) -> Result<IdentityRecord, IdCardError> {
        let (record, errors) = self.parse_detailed_at(id, today)?;
        for err in &errors {
            error!(id = %id, error = %err, "field derivation failed");
        }
        Ok(record)
    }

    /// Parse `id` and return the field-level errors alongside the record.
    pub fn parse_detailed(
        &self,
        id: &str,
    ) -> Result<(IdentityRecord, Vec<FieldError>), IdCardError> {
        self.parse_detailed_at(id, Local::now().date_naive())
    }

    pub fn parse_detailed_at(
        &self,
        id: &str,
        today: NaiveDate,
    ) -> Result<(IdentityRecord, Vec<FieldError>), IdCardError> {
        let matches_pattern = check_format(id)?;
        if !matches_pattern {
            // Mismatches are not rejected; lookups below fail per field instead.
            warn!(id = %id, "idcard does not match the expected format");
        }

        let mut record = IdentityRecord::new(id);
        record.matches_pattern = matches_pattern;
        let mut errors = Vec::new();

        match self.province(id) {
            Ok(province) => record.province = province.to_string(),
            Err(e) => errors.push(e),
        }
        match self.city(id) {
            Ok(city) => record.city = city.to_string(),
            Err(e) => errors.push(e),
        }
        match self.county(id, &record.province) {
            Ok(county) => record.county = county.unwrap_or_default().to_string(),
            Err(e) => errors.push(e),
        }
        match sex(id) {
            Ok(sex) => record.sex = sex,
            Err(e) => errors.push(e),
        }
        match age(id, today) {
            Ok(age) => record.age = age,
            Err(e) => errors.push(e),
        }

        Ok((record, errors))
    }

    fn province(&self, id: &str) -> Result<&'a str, FieldError> {
        id.get(0..2)
            .and_then(|code| self.table.province(code))
            .ok_or_else(|| FieldError::lookup(Region::Province, id))
    }

    /// 4-digit prefix first, then the full 6-digit code for cities recorded
    /// without a separate city level.
    fn city(&self, id: &str) -> Result<&'a str, FieldError> {
        id.get(0..4)
            .and_then(|code| self.table.city(code))
            .or_else(|| id.get(0..6).and_then(|code| self.table.city(code)))
            .ok_or_else(|| FieldError::lookup(Region::City, id))
    }

    /// `Ok(None)` for a municipality whose county code is not in the table.
    fn county(&self, id: &str, province: &str) -> Result<Option<&'a str>, FieldError> {
        match id.get(0..6).and_then(|code| self.table.county(code)) {
            Some(county) => Ok(Some(county)),
            None if is_municipality(province) => Ok(None),
            None => Err(FieldError::lookup(Region::County, id)),
        }
    }
}

/// The 8-digit YYYYMMDD birthday embedded in `id`.
///
/// 18-character IDs carry it at `[6..14]`; anything else is treated as a
/// 15-character ID with a 2-digit year at `[6..12]` in the 1900s.
fn birthday_digits(id: &str) -> Option<String> {
    if id.len() == 18 {
        id.get(6..14).map(str::to_string)
    } else {
        id.get(6..12).map(|digits| format!("19{digits}"))
    }
}

fn parse_birthday(birthday: &str) -> Option<NaiveDate> {
    if birthday.len() != 8 || !birthday.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = birthday[0..4].parse().ok()?;
    let month = birthday[4..6].parse().ok()?;
    let day = birthday[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn age(id: &str, today: NaiveDate) -> Result<i32, FieldError> {
    let birthday = birthday_digits(id).unwrap_or_default();
    let Some(date) = parse_birthday(&birthday) else {
        return Err(FieldError::Birthday {
            id: id.to_string(),
            birthday,
        });
    };

    let mut age = today.year() - date.year();
    if birthday_pending(today, &birthday[4..8]) {
        age -= 1;
    }
    Ok(age)
}

/// Compares today's unpadded `{month}{day}` against the zero-padded `MMDD`
/// birthday as strings.
///
/// The ordering is lexicographic on mismatched widths, so it disagrees with
/// the calendar for many dates (January 1st is "11", which sorts after
/// "0815" but before "1231"). Ages derived here follow that ordering.
fn birthday_pending(today: NaiveDate, month_day: &str) -> bool {
    format!("{}{}", today.month(), today.day()).as_str() > month_day
}

/// Sequence digit at `[16]` for 18-character IDs; the trailing digits from
/// `[14..]` otherwise.
fn sex(id: &str) -> Result<Sex, FieldError> {
    let digits = if id.len() == 18 {
        id.get(16..17)
    } else {
        id.get(14..)
    };
    digits
        .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|d| d.parse::<u32>().ok())
        .map(Sex::from_sequence)
        .ok_or_else(|| FieldError::Sequence { id: id.to_string() })
}
