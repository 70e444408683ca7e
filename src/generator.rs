//! Enumerates every CNP that can be issued for the birth dates of a range.
//!
//! ```
//! use cnp::{BirthDateRange, CnpGenerator, GeneratorConfig, Sex, Stringify};
//!
//! let range: BirthDateRange = "1918-01-01/1918-01-02".parse().unwrap();
//! let config = GeneratorConfig::default()
//!     .with_sexes(vec![Sex::Female])
//!     .with_counties(vec![12])
//!     .with_ordinals(1, 2);
//! let generator = CnpGenerator::new(range, config).unwrap();
//!
//! let numbers: Vec<String> = generator.iter().map(|cnp| cnp.stringify()).collect();
//! assert_eq!(numbers.len(), generator.count());
//! assert_eq!(numbers.len(), 4);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::consts::{DOCUMENTED_COUNTIES, MAX_COUNTY, MAX_ORDINAL};
use crate::{BirthDate, BirthDateRange, Cnp, CnpError, Sex};

/// Which CNPs to produce for each birth date.
///
/// Defaults: both sexes, the documented county codes, ordinals 0-999, not
/// born abroad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    sexes:       Vec<Sex>,
    counties:    Vec<u8>,
    min_ordinal: u16,
    max_ordinal: u16,
    born_abroad: bool,
}

impl GeneratorConfig {
    pub fn with_sexes(mut self, sexes: Vec<Sex>) -> Self {
        self.sexes = sexes;
        self
    }

    pub fn with_counties(mut self, counties: Vec<u8>) -> Self {
        self.counties = counties;
        self
    }

    /// Sets the inclusive ordinal range. An empty range yields nothing.
    pub fn with_ordinals(mut self, min: u16, max: u16) -> Self {
        self.min_ordinal = min;
        self.max_ordinal = max;
        self
    }

    /// Generates born-abroad CNPs; dates outside 1900-1999 are skipped.
    pub fn with_born_abroad(mut self, born_abroad: bool) -> Self {
        self.born_abroad = born_abroad;
        self
    }

    pub fn sexes(&self) -> &[Sex] {
        &self.sexes
    }

    pub fn counties(&self) -> &[u8] {
        &self.counties
    }

    pub const fn ordinals(&self) -> (u16, u16) {
        (self.min_ordinal, self.max_ordinal)
    }

    pub const fn born_abroad(&self) -> bool {
        self.born_abroad
    }

    /// Validates this configuration.
    ///
    /// # Errors
    /// Returns `CnpError::CountyOutOfRange` for a county above 99 and
    /// `CnpError::OrdinalOutOfRange` for an ordinal bound above 999.
    pub fn validate(&self) -> Result<(), CnpError> {
        if let Some(&county) = self.counties.iter().find(|&&county| county > MAX_COUNTY) {
            return Err(CnpError::CountyOutOfRange(county));
        }
        for ordinal in [self.min_ordinal, self.max_ordinal] {
            if ordinal > MAX_ORDINAL {
                return Err(CnpError::OrdinalOutOfRange(ordinal));
            }
        }
        Ok(())
    }

    fn per_day(&self) -> usize {
        let ordinals = if self.min_ordinal > self.max_ordinal {
            0
        } else {
            usize::from(self.max_ordinal - self.min_ordinal) + 1
        };
        self.sexes.len() * self.counties.len() * ordinals
    }

    const fn issues_for(&self, date: BirthDate) -> bool {
        !self.born_abroad || date.allows_born_abroad()
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sexes:       vec![Sex::Male, Sex::Female],
            counties:    DOCUMENTED_COUNTIES.to_vec(),
            min_ordinal: 0,
            max_ordinal: MAX_ORDINAL,
            born_abroad: false,
        }
    }
}

/// Produces CNPs for every day of a [`BirthDateRange`], in date order, then
/// by sex, county and ordinal as listed in the [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct CnpGenerator {
    range:  BirthDateRange,
    config: GeneratorConfig,
}

impl CnpGenerator {
    /// # Errors
    /// Returns the error from [`GeneratorConfig::validate`].
    pub fn new(range: BirthDateRange, config: GeneratorConfig) -> Result<Self, CnpError> {
        config.validate()?;
        debug!(%range, per_day = config.per_day(), "configured CNP generator");
        Ok(Self { range, config })
    }

    pub const fn range(&self) -> BirthDateRange {
        self.range
    }

    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn iter(&self) -> impl Iterator<Item = Cnp> + '_ {
        let config = &self.config;
        let (min_ordinal, max_ordinal) = config.ordinals();
        let born_abroad = config.born_abroad;

        self.range
            .days()
            .filter(move |&date| config.issues_for(date))
            .flat_map(move |date| {
                trace!(%date, "generating CNPs");
                config.sexes.iter().flat_map(move |&sex| {
                    config.counties.iter().flat_map(move |&county| {
                        // validate() and issues_for() keep this infallible; count() relies on it
                        (min_ordinal..=max_ordinal).filter_map(move |ordinal| {
                            Cnp::with_birth_date(sex, date, county, ordinal, born_abroad)
                                .inspect_err(|err| debug!(%date, reason = %err, "skipped CNP"))
                                .ok()
                        })
                    })
                })
            })
    }

    /// Number of CNPs [`CnpGenerator::iter`] yields
    pub fn count(&self) -> usize {
        let days = self
            .range
            .days()
            .filter(|&date| self.config.issues_for(date))
            .count();
        days * self.config.per_day()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Stringify;
    use crate::test_utils::date;

    fn range(start: (u16, u8, u8), end: (u16, u8, u8)) -> BirthDateRange {
        BirthDateRange::new(date(start.0, start.1, start.2), date(end.0, end.1, end.2))
            .expect("valid range")
    }

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.sexes(), [Sex::Male, Sex::Female]);
        assert_eq!(config.counties().len(), 48);
        assert_eq!(config.ordinals(), (0, 999));
        assert!(!config.born_abroad());
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.per_day(), 2 * 48 * 1000);
    }

    #[test]
    fn test_validate_rejections() {
        let config = GeneratorConfig::default().with_counties(vec![4, 100]);
        assert_eq!(config.validate(), Err(CnpError::CountyOutOfRange(100)));

        let config = GeneratorConfig::default().with_ordinals(1, 1000);
        assert_eq!(config.validate(), Err(CnpError::OrdinalOutOfRange(1000)));

        let generator = CnpGenerator::new(range((1918, 1, 1), (1918, 1, 1)), config);
        assert!(generator.is_err());
    }

    #[test]
    fn test_generates_in_order() {
        let config = GeneratorConfig::default()
            .with_counties(vec![4, 99])
            .with_ordinals(998, 999);
        let generator = CnpGenerator::new(range((1969, 5, 9), (1969, 5, 10)), config).expect("valid generator");

        let numbers: Vec<String> = generator.iter().map(|cnp| cnp.stringify()).collect();
        assert_eq!(numbers.len(), 2 * 2 * 2 * 2);
        assert_eq!(numbers.len(), generator.count());
        assert_eq!(numbers[0], Cnp::new(Sex::Male, 1969, 5, 9, 4, 998, false).unwrap().stringify());
        assert_eq!(numbers[1], "1690509049993");
        assert_eq!(numbers[2], Cnp::new(Sex::Male, 1969, 5, 9, 99, 998, false).unwrap().stringify());
        assert!(numbers[4].starts_with("2690509"));
        assert!(numbers[8].starts_with("1690510"));

        for number in &numbers {
            assert!(Cnp::is_valid(number), "{number}");
        }
    }

    #[test]
    fn test_born_abroad_skips_dates_outside_window() {
        let config = GeneratorConfig::default()
            .with_sexes(vec![Sex::Female])
            .with_counties(vec![1])
            .with_ordinals(1, 1)
            .with_born_abroad(true);
        let generator = CnpGenerator::new(range((1999, 12, 30), (2000, 1, 2)), config).expect("valid generator");

        let cnps: Vec<Cnp> = generator.iter().collect();
        assert_eq!(cnps.len(), 2);
        assert_eq!(generator.count(), 2);
        for cnp in &cnps {
            assert!(cnp.born_abroad());
            assert_eq!(cnp.leading_digit(), '8');
            assert_eq!(cnp.birth_year(), 1999);
        }
    }

    #[test]
    fn test_iter_agrees_with_count_at_boundaries() {
        let config = GeneratorConfig::default()
            .with_counties(vec![0, 99])
            .with_ordinals(0, 999)
            .with_born_abroad(true);
        let generator = CnpGenerator::new(range((1899, 12, 31), (1900, 1, 1)), config).expect("valid generator");
        assert_eq!(generator.iter().count(), generator.count());
        assert_eq!(generator.count(), 2 * 2 * 1000);

        let generator = CnpGenerator::new(range((2099, 12, 31), (2099, 12, 31)), GeneratorConfig::default())
            .expect("valid generator");
        assert_eq!(generator.iter().count(), generator.count());
    }

    #[test]
    fn test_empty_ordinal_range_yields_nothing() {
        let config = GeneratorConfig::default().with_ordinals(5, 4);
        let generator = CnpGenerator::new(range((1918, 1, 1), (1918, 1, 31)), config).expect("valid generator");
        assert_eq!(generator.iter().next(), None);
        assert_eq!(generator.count(), 0);
    }

    #[test]
    fn test_config_from_json() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"sexes": ["female"], "counties": [40], "born_abroad": true}"#)
                .expect("failed to deserialize config");
        assert_eq!(config.sexes(), [Sex::Female]);
        assert_eq!(config.counties(), [40]);
        assert_eq!(config.ordinals(), (0, 999));
        assert!(config.born_abroad());
    }
}
