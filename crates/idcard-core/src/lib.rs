//! Identity-card parsing: record types, the administrative code table, and
//! per-field derivation of province, city, county, sex and age.

mod error;
pub mod parser;
pub mod pattern;
mod record;
pub mod table;

pub use error::{FieldError, IdCardError, Region};
pub use parser::IdParser;
pub use pattern::{ID_CARD_PATTERN, check_format};
pub use record::{IdentityRecord, Sex};
pub use table::{AdministrativeCodeTable, MUNICIPALITIES, is_municipality};
