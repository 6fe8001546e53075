use serde::Serialize;

/// Sex encoded by the parity of the sequence digit.
///
/// `Male` is the zero state: a record whose sequence digit could not be
/// parsed reports `Male`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    /// Sex from a sequence digit (or digits): even is female, odd is male.
    pub fn from_sequence(value: u32) -> Self {
        if value % 2 == 0 { Sex::Female } else { Sex::Male }
    }

    /// Integer encoding: 1 for male, 2 for female (even means female).
    pub fn code(self) -> i32 {
        match self {
            Sex::Male => 1,
            Sex::Female => 2,
        }
    }
}

/// Demographic attributes derived from one identity-card number.
///
/// Fields that could not be derived are left empty (or zero); see
/// [`IdParser::parse_detailed`](crate::IdParser::parse_detailed) for the
/// per-field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdentityRecord {
    pub(crate) id_card: String,
    pub(crate) province: String,
    pub(crate) city: String,
    pub(crate) county: String,
    pub(crate) sex: Sex,
    pub(crate) age: i32,
    pub(crate) matches_pattern: bool,
}

impl IdentityRecord {
    pub(crate) fn new(id_card: &str) -> Self {
        Self {
            id_card: id_card.to_string(),
            ..Self::default()
        }
    }

    pub fn id_card(&self) -> &str {
        &self.id_card
    }

    pub fn province(&self) -> &str {
        &self.province
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn county(&self) -> &str {
        &self.county
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    /// Whether the ID matched the 15/18-digit pattern.
    ///
    /// A non-matching ID is still parsed field by field; this flag is the
    /// only trace of the mismatch besides a `warn` log line.
    pub fn matches_pattern(&self) -> bool {
        self.matches_pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_decides_sex() {
        assert_eq!(Sex::from_sequence(0), Sex::Female);
        assert_eq!(Sex::from_sequence(1), Sex::Male);
        assert_eq!(Sex::from_sequence(4), Sex::Female);
        assert_eq!(Sex::from_sequence(9), Sex::Male);
        assert_eq!(Sex::from_sequence(12), Sex::Female);
    }

    #[test]
    fn female_code_is_even() {
        assert_eq!(Sex::Female.code() % 2, 0);
        assert_eq!(Sex::Male.code() % 2, 1);
    }

    #[test]
    fn zero_state() {
        let record = IdentityRecord::new("110101");
        assert_eq!(record.id_card(), "110101");
        assert_eq!(record.province(), "");
        assert_eq!(record.city(), "");
        assert_eq!(record.county(), "");
        assert_eq!(record.sex(), Sex::Male);
        assert_eq!(record.age(), 0);
        assert!(!record.matches_pattern());
    }
}
