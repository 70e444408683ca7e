//! The foreign-resident number (NIF): the marker `9`, eleven opaque digits and
//! a CNP-style check digit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ParseError;
use crate::checksum::{self, Stringify};
use crate::consts::{BODY_LEN, NIF_MARKER};

/// A foreign-resident number. Only parsing checks the digits.
///
/// ```
/// use cnp::Nif;
///
/// let short = Nif::new("0001234567");
/// assert!(!Nif::is_valid(&short.to_string()));
/// assert!(Nif::is_valid(&Nif::new("00012345678").to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nif {
    digits11: String,
}

impl Nif {
    /// Wraps the eleven digits between the marker and the check digit.
    ///
    /// Nothing is validated here: a NIF built from malformed digits
    /// stringifies to something [`Nif::parse`] will reject.
    pub fn new(digits11: impl Into<String>) -> Self {
        Self {
            digits11: digits11.into(),
        }
    }

    /// Parses a 13-digit string, returning `None` for anything that is not a
    /// valid NIF.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse()
            .inspect_err(|err| debug!(reason = %err, "rejected NIF"))
            .ok()
    }

    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_some()
    }

    pub fn digits11(&self) -> &str {
        &self.digits11
    }
}

impl Stringify for Nif {
    fn stringify12(&self) -> String {
        format!("{NIF_MARKER}{}", self.digits11)
    }
}

impl FromStr for Nif {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        checksum::check_shape(s)?;

        let first = s.chars().next().unwrap_or_default();
        if first != NIF_MARKER {
            return Err(ParseError::InvalidLeadingDigit(first));
        }
        checksum::verify_check_digit(s)?;

        Ok(Self::new(&s[1..BODY_LEN]))
    }
}

impl fmt::Display for Nif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl Serialize for Nif {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.stringify())
    }
}

impl<'de> Deserialize<'de> for Nif {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
