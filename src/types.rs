use crate::consts::{
    CENTURY_CYCLE, DATE_SEPARATOR, DAYS_IN_MONTH, DECEMBER, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, JANUARY, LEAP_YEAR_CYCLE, MAX_BIRTH_YEAR, MAX_BORN_ABROAD_YEAR, MAX_MONTH,
    MIN_BIRTH_YEAR, MIN_BORN_ABROAD_YEAR, MIN_DAY,
};
use crate::{CnpError, prelude::*};
use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use std::str::FromStr;

/// Sex of the holder, as encoded in the leading digit of a CNP
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[display(fmt = "male")]
    Male,
    #[display(fmt = "female")]
    Female,
}

impl FromStr for Sex {
    type Err = CnpError;

    /// Accepts `m`/`male` and `f`/`female`, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Self::Male),
            "f" | "female" => Ok(Self::Female),
            _ => Err(CnpError::InvalidSex(s.to_owned())),
        }
    }
}

/// One row of the leading-digit table: which sex, century and birthplace a
/// leading digit stands for.
///
/// Digit 9 has no row; it marks a NIF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeadingDigit {
    digit:        char,
    sex:          Sex,
    century_base: u16,
    born_abroad:  bool,
}

static LEADING_DIGITS: [LeadingDigit; 8] = [
    LeadingDigit::row('1', Sex::Male, 1900, false),
    LeadingDigit::row('2', Sex::Female, 1900, false),
    LeadingDigit::row('3', Sex::Male, 1800, false),
    LeadingDigit::row('4', Sex::Female, 1800, false),
    LeadingDigit::row('5', Sex::Male, 2000, false),
    LeadingDigit::row('6', Sex::Female, 2000, false),
    LeadingDigit::row('7', Sex::Male, 1900, true),
    LeadingDigit::row('8', Sex::Female, 1900, true),
];

impl LeadingDigit {
    const fn row(digit: char, sex: Sex, century_base: u16, born_abroad: bool) -> Self {
        Self {
            digit,
            sex,
            century_base,
            born_abroad,
        }
    }

    /// Looks up the row for a leading digit. Returns `None` for `9` and for
    /// anything that is not a digit in `1..=8`.
    pub fn decode(digit: char) -> Option<Self> {
        LEADING_DIGITS.iter().find(|row| row.digit == digit).copied()
    }

    /// Finds the leading digit for a holder. Returns `None` when no row
    /// covers the birth year (or birth abroad outside the 1900s).
    pub fn encode(sex: Sex, birth_year: u16, born_abroad: bool) -> Option<Self> {
        LEADING_DIGITS
            .iter()
            .find(|row| row.sex == sex && row.born_abroad == born_abroad && row.covers(birth_year))
            .copied()
    }

    const fn covers(&self, year: u16) -> bool {
        year >= self.century_base && year - self.century_base < CENTURY_CYCLE
    }

    #[inline]
    pub const fn digit(&self) -> char {
        self.digit
    }

    #[inline]
    pub const fn sex(&self) -> Sex {
        self.sex
    }

    /// First year of the century this digit encodes (1800, 1900 or 2000)
    #[inline]
    pub const fn century_base(&self) -> u16 {
        self.century_base
    }

    #[inline]
    pub const fn born_abroad(&self) -> bool {
        self.born_abroad
    }
}

/// A calendar date a CNP can encode: a real Gregorian date between
/// 1800-01-01 and 2099-12-31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year:04}-{month:02}-{day:02}")]
pub struct BirthDate {
    year:  u16,
    month: u8,
    day:   u8,
}

impl BirthDate {
    /// Earliest encodable birth date
    pub const MIN: Self = Self {
        year:  MIN_BIRTH_YEAR,
        month: JANUARY,
        day:   MIN_DAY,
    };

    /// Latest encodable birth date
    pub const MAX: Self = Self {
        year:  MAX_BIRTH_YEAR,
        month: DECEMBER,
        day:   DAYS_IN_MONTH[DECEMBER as usize],
    };

    /// Creates a birth date, validating the calendar date first and the
    /// encodable year range second.
    ///
    /// # Errors
    /// Returns `CnpError::InvalidDate` if the triple is not a real date, and
    /// `CnpError::BirthYearOutOfRange` if the year is outside 1800-2099.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, CnpError> {
        if !is_valid_calendar_date(year, month, day) {
            return Err(CnpError::InvalidDate { year, month, day });
        }
        if !(MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR).contains(&year) {
            return Err(CnpError::BirthYearOutOfRange(year));
        }
        Ok(Self { year, month, day })
    }

    #[inline]
    pub const fn year(self) -> u16 {
        self.year
    }

    #[inline]
    pub const fn month(self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(self) -> u8 {
        self.day
    }

    /// Whether a person born on this date can hold a born-abroad CNP
    pub const fn allows_born_abroad(self) -> bool {
        self.year >= MIN_BORN_ABROAD_YEAR && self.year <= MAX_BORN_ABROAD_YEAR
    }

    /// The following calendar day, or `None` past `BirthDate::MAX`.
    pub fn succ(self) -> Option<Self> {
        if self.day < days_in_month(self.year, self.month)? {
            return Some(Self {
                day: self.day + 1,
                ..self
            });
        }
        if self.month < DECEMBER {
            return Some(Self {
                month: self.month + 1,
                day: MIN_DAY,
                ..self
            });
        }
        if self.year >= MAX_BIRTH_YEAR {
            return None;
        }
        Some(Self {
            year:  self.year + 1,
            month: JANUARY,
            day:   MIN_DAY,
        })
    }
}

/// Why a string is not a `YYYY-MM-DD` birth date
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),

    /// Well-formed, but not an encodable birth date.
    #[error(transparent)]
    Date(#[from] CnpError),
}

impl FromStr for BirthDate {
    type Err = DateParseError;

    /// Parses `YYYY-MM-DD`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(DateParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD: {s}"
            )));
        };
        let invalid = |_: ParseIntError| DateParseError::InvalidFormat(s.to_owned());
        let year = year.parse::<u16>().map_err(invalid)?;
        let month = month.parse::<u8>().map_err(invalid)?;
        let day = day.parse::<u8>().map_err(invalid)?;
        Self::new(year, month, day).map_err(DateParseError::from)
    }
}

impl Serialize for BirthDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BirthDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `month` of `year`, or `None` for a month outside 1-12.
pub const fn days_in_month(year: u16, month: u8) -> Option<u8> {
    if month < JANUARY || month > MAX_MONTH {
        return None;
    }
    if month == FEBRUARY && is_leap_year(year) {
        Some(FEBRUARY_DAYS_LEAP)
    } else {
        Some(DAYS_IN_MONTH[month as usize])
    }
}

/// Whether `(year, month, day)` is a real date in the proleptic Gregorian
/// calendar. Out-of-range months and days are rejected, never rolled over.
pub const fn is_valid_calendar_date(year: u16, month: u8, day: u8) -> bool {
    match days_in_month(year, month) {
        Some(last) => day >= MIN_DAY && day <= last,
        None => false,
    }
}
