//! Validation, parsing and encoding of Romanian personal numbers: the CNP
//! (cod numeric personal) and the NIF issued to foreign residents.
//!
//! Both are 13 ASCII digits ending in a weighted mod-11 check digit. A leading
//! `9` marks a NIF; `1`-`8` mark a CNP and encode sex, century of birth and
//! birth abroad.
//!
//! ```
//! use cnp::{Cnp, PersonalNumber, Sex, Stringify};
//!
//! assert!(cnp::is_valid("1690509049993"));
//!
//! let Some(PersonalNumber::Cnp(parsed)) = cnp::parse("1690509049993") else {
//!     panic!("expected a CNP");
//! };
//! assert_eq!(parsed.county(), 4);
//!
//! let built = Cnp::new(Sex::Male, 1969, 5, 9, 4, 999, false).unwrap();
//! assert_eq!(built.stringify(), "1690509049993");
//! ```

mod checksum;
mod cnp;
mod consts;
mod generator;
mod nif;
mod prelude;
mod range;
mod types;

pub use checksum::{Stringify, check_digit};
pub use cnp::Cnp;
pub use consts::*;
pub use generator::{CnpGenerator, GeneratorConfig};
pub use nif::Nif;
pub use range::{BirthDateRange, Days, RangeError};
pub use types::{
    BirthDate, DateParseError, LeadingDigit, Sex, days_in_month, is_leap_year, is_valid_calendar_date,
};

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Either kind of personal number, told apart by the leading digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
pub enum PersonalNumber {
    #[display(fmt = "{_0}")]
    Cnp(Cnp),
    #[display(fmt = "{_0}")]
    Nif(Nif),
}

/// Why a string is not a valid personal number
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum ParseError {
    #[display(fmt = "Invalid length: {} (expected {})", "_0", NUMBER_LEN)]
    #[from(ignore)]
    InvalidLength(usize),
    #[display(fmt = "Non-digit character {found:?} at position {position}")]
    #[from(ignore)]
    NonDigit { position: usize, found: char },
    #[display(fmt = "Check digit mismatch: expected {expected}, found {found}")]
    #[from(ignore)]
    ChecksumMismatch { expected: char, found: char },
    #[display(fmt = "Invalid leading digit: {_0:?}")]
    #[from(ignore)]
    InvalidLeadingDigit(char),
    #[display(fmt = "{_0}")]
    Field(CnpError),
}

impl std::error::Error for ParseError {}

/// Invalid components passed when building a CNP
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CnpError {
    #[error("Invalid sex: {0:?} (expected m/male or f/female)")]
    InvalidSex(String),

    #[error("Invalid birth date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: u16, month: u8, day: u8 },

    #[error("Birth year {0} out of range ({min}-{max})", min = MIN_BIRTH_YEAR, max = MAX_BIRTH_YEAR)]
    BirthYearOutOfRange(u16),

    #[error(
        "Birth year {0} out of range for persons born abroad ({min}-{max})",
        min = MIN_BORN_ABROAD_YEAR,
        max = MAX_BORN_ABROAD_YEAR
    )]
    BornAbroadOutOfRange(u16),

    #[error("County {0} out of range (0-{max})", max = MAX_COUNTY)]
    CountyOutOfRange(u8),

    #[error("Ordinal {0} out of range (0-{max})", max = MAX_ORDINAL)]
    OrdinalOutOfRange(u16),
}

impl PersonalNumber {
    /// Parses either kind of personal number, returning `None` when the
    /// string is neither a valid CNP nor a valid NIF.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse()
            .inspect_err(|err| debug!(reason = %err, "rejected personal number"))
            .ok()
    }

    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_some()
    }

    pub const fn as_cnp(&self) -> Option<&Cnp> {
        match self {
            Self::Cnp(cnp) => Some(cnp),
            Self::Nif(_) => None,
        }
    }

    pub const fn as_nif(&self) -> Option<&Nif> {
        match self {
            Self::Nif(nif) => Some(nif),
            Self::Cnp(_) => None,
        }
    }

    pub const fn is_cnp(&self) -> bool {
        matches!(self, Self::Cnp(_))
    }

    pub const fn is_nif(&self) -> bool {
        matches!(self, Self::Nif(_))
    }
}

impl FromStr for PersonalNumber {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with(NIF_MARKER) {
            s.parse().map(Self::Nif)
        } else {
            s.parse().map(Self::Cnp)
        }
    }
}

impl Stringify for PersonalNumber {
    fn stringify12(&self) -> String {
        match self {
            Self::Cnp(cnp) => cnp.stringify12(),
            Self::Nif(nif) => nif.stringify12(),
        }
    }
}

impl Serialize for PersonalNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.stringify())
    }
}

impl<'de> Deserialize<'de> for PersonalNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses a CNP or a NIF. See [`PersonalNumber::parse`].
pub fn parse(s: &str) -> Option<PersonalNumber> {
    PersonalNumber::parse(s)
}

/// Whether `s` is a valid CNP or NIF
pub fn is_valid(s: &str) -> bool {
    PersonalNumber::is_valid(s)
}
