use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{BirthDate, DateParseError, RANGE_SEPARATOR, prelude::*};

/// Represents a range between two birth dates (inclusive).
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct BirthDateRange {
    start: BirthDate,
    end:   BirthDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: BirthDate, end: BirthDate },

    /// Error parsing one of the dates.
    #[error(transparent)]
    Date(#[from] DateParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl BirthDateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: BirthDate, end: BirthDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering a single day
    pub const fn day(date: BirthDate) -> Self {
        Self {
            start: date,
            end:   date,
        }
    }

    pub const fn start(&self) -> BirthDate {
        self.start
    }

    pub const fn end(&self) -> BirthDate {
        self.end
    }

    /// Checks if the range contains a given date
    pub fn contains(&self, date: &BirthDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Iterates over every calendar day in the range, both ends included
    pub const fn days(&self) -> Days {
        Days {
            next: Some(self.start),
            end:  self.end,
        }
    }
}

/// Iterator over the days of a [`BirthDateRange`]
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<BirthDate>,
    end:  BirthDate,
}

impl Iterator for Days {
    type Item = BirthDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if current < self.end {
            self.next = current.succ();
        }
        Some(current)
    }
}

impl std::iter::FusedIterator for Days {}

impl FromStr for BirthDateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // ISO 8601 extended format: use RANGE_SEPARATOR to separate start/end
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found: {s}"))
                })?;

                let start = start_str.trim().parse::<BirthDate>()?;
                let end = end_str.trim().parse::<BirthDate>()?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for BirthDateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BirthDateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
