//! Check digit shared by CNPs and NIFs.

use crate::ParseError;
use crate::consts::{
    BODY_LEN, CHECK_DIGIT_MODULUS, CHECK_DIGIT_OVERFLOW, CHECK_DIGIT_OVERFLOW_SUBSTITUTE,
    CHECK_DIGIT_WEIGHTS, NUMBER_LEN,
};

/// Computes the check digit of a 12-digit body.
///
/// Each digit is multiplied by its weight in [`CHECK_DIGIT_WEIGHTS`]; the sum
/// is reduced modulo 11 and a remainder of 10 becomes `1`.
///
/// The body must consist of ASCII digits. Other input does not panic but
/// yields a meaningless digit.
pub fn check_digit(body12: &str) -> char {
    let sum: u32 = body12
        .bytes()
        .zip(CHECK_DIGIT_WEIGHTS.iter())
        .map(|(b, weight)| u32::from(b.wrapping_sub(b'0')) * weight)
        .sum();

    let remainder = match sum % CHECK_DIGIT_MODULUS {
        CHECK_DIGIT_OVERFLOW => CHECK_DIGIT_OVERFLOW_SUBSTITUTE,
        r => r,
    };
    // remainder < 10 here
    char::from_digit(remainder, 10).unwrap_or('0')
}

/// Encoding shared by every personal number: a 12-character body followed
/// by its check digit.
pub trait Stringify {
    /// The first 12 characters: everything but the check digit
    fn stringify12(&self) -> String;

    /// The full 13-character number
    fn stringify(&self) -> String {
        let mut number = self.stringify12();
        let digit = check_digit(&number);
        number.push(digit);
        number
    }
}

/// Rejects anything that is not exactly 13 ASCII digits.
pub(crate) fn check_shape(s: &str) -> Result<(), ParseError> {
    let len = s.chars().count();
    if len != NUMBER_LEN {
        return Err(ParseError::InvalidLength(len));
    }
    match s.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
        Some((position, found)) => Err(ParseError::NonDigit { position, found }),
        None => Ok(()),
    }
}

/// Compares the last character against the check digit of the first 12.
/// Expects input that already passed [`check_shape`].
pub(crate) fn verify_check_digit(s: &str) -> Result<(), ParseError> {
    let (body, tail) = s.split_at(BODY_LEN);
    let expected = check_digit(body);
    let found = tail.chars().next().unwrap_or_default();
    if expected == found {
        Ok(())
    } else {
        Err(ParseError::ChecksumMismatch { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_digit_reference_bodies() {
        assert_eq!(check_digit("169050904999"), '3');
        assert_eq!(check_digit("169050999001"), '1');
        assert_eq!(check_digit("900012345678"), '5');
    }

    #[test]
    fn test_check_digit_remainder_ten_becomes_one() {
        // 5*2 = 10
        assert_eq!(check_digit("500000000000"), '1');
        // 2*2 + 1*7 = 11
        assert_eq!(check_digit("210000000000"), '0');
    }

    #[test]
    fn test_check_digit_all_zeros() {
        assert_eq!(check_digit("000000000000"), '0');
    }

    #[test]
    fn test_check_digit_always_single_digit() {
        for first in 0..=9u8 {
            for last in 0..=9u8 {
                let body = format!("{first}0000000000{last}");
                assert!(check_digit(&body).is_ascii_digit(), "body {body}");
            }
        }
    }

    struct Body(&'static str);

    impl Stringify for Body {
        fn stringify12(&self) -> String {
            self.0.to_owned()
        }
    }

    #[test]
    fn test_stringify_appends_check_digit() {
        assert_eq!(Body("169050904999").stringify(), "1690509049993");
        assert_eq!(Body("900012345678").stringify(), "9000123456785");
    }

    #[test]
    fn test_check_shape() {
        assert_eq!(check_shape("1690509049993"), Ok(()));
        assert_eq!(check_shape(""), Err(ParseError::InvalidLength(0)));
        assert_eq!(check_shape("16905090499930"), Err(ParseError::InvalidLength(14)));
        assert_eq!(
            check_shape("1j91301049995"),
            Err(ParseError::NonDigit { position: 1, found: 'j' })
        );
        // 13 characters, but not 13 bytes
        assert_eq!(
            check_shape("169050904999ș"),
            Err(ParseError::NonDigit { position: 12, found: 'ș' })
        );
    }

    #[test]
    fn test_verify_check_digit() {
        assert_eq!(verify_check_digit("1690509049993"), Ok(()));
        assert_eq!(
            verify_check_digit("1690509049990"),
            Err(ParseError::ChecksumMismatch { expected: '3', found: '0' })
        );
    }
}
