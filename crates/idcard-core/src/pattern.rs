//! Format check for 18-digit (current) and 15-digit (legacy) identity numbers.

use std::sync::OnceLock;

use regex::Regex;

use crate::IdCardError;

/// 18 digits: 6-digit region, YYYYMMDD birthday, 3-digit sequence, check digit (0-9 or X).
/// 15 digits: 6-digit region, YYMMDD birthday, 3-digit sequence.
pub const ID_CARD_PATTERN: &str = concat!(
    r"^(?:",
    r"[1-9]\d{5}(?:18|19|20)\d{2}(?:0[1-9]|1[0-2])(?:0[1-9]|[12]\d|3[01])\d{3}[\dXx]",
    r"|",
    r"[1-9]\d{7}(?:0[1-9]|1[0-2])(?:0[1-9]|[12]\d|3[01])\d{3}",
    r")$",
);

static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

fn pattern() -> Result<&'static Regex, IdCardError> {
    PATTERN
        .get_or_init(|| Regex::new(ID_CARD_PATTERN))
        .as_ref()
        .map_err(|e| IdCardError::Format(e.clone()))
}

/// Check an ID against [`ID_CARD_PATTERN`].
///
/// `Err` only when the pattern itself fails to compile. `Ok(false)` means the
/// ID does not match; callers decide what a mismatch means.
pub fn check_format(id: &str) -> Result<bool, IdCardError> {
    Ok(pattern()?.is_match(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_compiles() {
        assert!(Regex::new(ID_CARD_PATTERN).is_ok());
    }

    #[test]
    fn accepts_eighteen_digit_ids() {
        assert!(check_format("510232195508152414").unwrap());
        assert!(check_format("460022197112162510").unwrap());
        assert!(check_format("11010119900307803X").unwrap());
        assert!(check_format("11010119900307803x").unwrap());
    }

    #[test]
    fn accepts_fifteen_digit_ids() {
        assert!(check_format("510232550815241").unwrap());
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(!check_format("").unwrap());
        assert!(!check_format("51023219550815241").unwrap());
        assert!(!check_format("010232195508152414").unwrap());
        assert!(!check_format("510232195513152414").unwrap());
        assert!(!check_format("51023219550815241Y").unwrap());
        assert!(!check_format("abc").unwrap());
    }
}
