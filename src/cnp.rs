//! The structured personal number (CNP).
//!
//! Layout: `SAALLZZJJNNNC`
//! - `S`: sex digit, also encodes the century of birth and birth abroad
//! - `AA`, `LL`, `ZZ`: year of birth (last two digits), month, day
//! - `JJ`: county where the birth was registered (or, before 1978, where the
//!   holder lived when the number was issued)
//! - `NNN`: ordinal
//! - `C`: check digit

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::checksum::{self, Stringify};
use crate::consts::{MAX_COUNTY, MAX_ORDINAL};
use crate::types::{BirthDate, LeadingDigit, Sex};
use crate::{CnpError, ParseError};

/// A validated CNP, kept as its decoded fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cnp {
    leading:    LeadingDigit,
    birth_date: BirthDate,
    county:     u8,
    ordinal:    u16,
}

impl Cnp {
    /// Creates a CNP from its components.
    ///
    /// County codes are not checked against the list of issued codes; any
    /// two-digit value is kept as given.
    ///
    /// # Errors
    /// - `CnpError::InvalidDate` if the birth date is not a real date
    /// - `CnpError::BirthYearOutOfRange` if the birth year is outside 1800-2099
    /// - `CnpError::BornAbroadOutOfRange` if `born_abroad` is set outside 1900-1999
    /// - `CnpError::CountyOutOfRange` if the county needs more than two digits
    /// - `CnpError::OrdinalOutOfRange` if the ordinal needs more than three digits
    pub fn new(
        sex: Sex,
        birth_year: u16,
        birth_month: u8,
        birth_day: u8,
        county: u8,
        ordinal: u16,
        born_abroad: bool,
    ) -> Result<Self, CnpError> {
        let birth_date = BirthDate::new(birth_year, birth_month, birth_day)?;
        Self::with_birth_date(sex, birth_date, county, ordinal, born_abroad)
    }

    /// Same as [`Cnp::new`], for an already validated birth date.
    ///
    /// # Errors
    /// See [`Cnp::new`].
    pub fn with_birth_date(
        sex: Sex,
        birth_date: BirthDate,
        county: u8,
        ordinal: u16,
        born_abroad: bool,
    ) -> Result<Self, CnpError> {
        if born_abroad && !birth_date.allows_born_abroad() {
            return Err(CnpError::BornAbroadOutOfRange(birth_date.year()));
        }
        if county > MAX_COUNTY {
            return Err(CnpError::CountyOutOfRange(county));
        }
        if ordinal > MAX_ORDINAL {
            return Err(CnpError::OrdinalOutOfRange(ordinal));
        }
        let leading = LeadingDigit::encode(sex, birth_date.year(), born_abroad)
            .ok_or(CnpError::BirthYearOutOfRange(birth_date.year()))?;

        Ok(Self {
            leading,
            birth_date,
            county,
            ordinal,
        })
    }

    /// Parses a 13-digit string, returning `None` for anything that is not a
    /// valid CNP. Use [`str::parse`] to learn why a string was rejected.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse()
            .inspect_err(|err| debug!(reason = %err, "rejected CNP"))
            .ok()
    }

    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_some()
    }

    pub const fn sex(&self) -> Sex {
        self.leading.sex()
    }

    pub const fn birth_date(&self) -> BirthDate {
        self.birth_date
    }

    pub const fn birth_year(&self) -> u16 {
        self.birth_date.year()
    }

    pub const fn birth_month(&self) -> u8 {
        self.birth_date.month()
    }

    pub const fn birth_day(&self) -> u8 {
        self.birth_date.day()
    }

    pub const fn county(&self) -> u8 {
        self.county
    }

    pub const fn ordinal(&self) -> u16 {
        self.ordinal
    }

    pub const fn born_abroad(&self) -> bool {
        self.leading.born_abroad()
    }

    /// The sex/century digit this CNP starts with
    pub const fn leading_digit(&self) -> char {
        self.leading.digit()
    }
}

impl Stringify for Cnp {
    fn stringify12(&self) -> String {
        format!(
            "{}{:02}{:02}{:02}{:02}{:03}",
            self.leading.digit(),
            self.birth_date.year() % 100,
            self.birth_date.month(),
            self.birth_date.day(),
            self.county,
            self.ordinal
        )
    }
}

/// Value of the two ASCII digits starting at `at`
fn two_digits(bytes: &[u8], at: usize) -> u8 {
    (bytes[at] - b'0') * 10 + (bytes[at + 1] - b'0')
}

impl FromStr for Cnp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        checksum::check_shape(s)?;
        checksum::verify_check_digit(s)?;

        let bytes = s.as_bytes();
        let first = char::from(bytes[0]);
        let leading = LeadingDigit::decode(first).ok_or(ParseError::InvalidLeadingDigit(first))?;

        let year = leading.century_base() + u16::from(two_digits(bytes, 1));
        let month = two_digits(bytes, 3);
        let day = two_digits(bytes, 5);
        let county = two_digits(bytes, 7);
        let ordinal = u16::from(bytes[9] - b'0') * 100 + u16::from(two_digits(bytes, 10));

        Self::new(leading.sex(), year, month, day, county, ordinal, leading.born_abroad())
            .map_err(ParseError::from)
    }
}

impl fmt::Display for Cnp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl Serialize for Cnp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.stringify())
    }
}

impl<'de> Deserialize<'de> for Cnp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
