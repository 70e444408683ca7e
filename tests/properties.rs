use cnp::{BirthDate, Cnp, Nif, Sex, Stringify, check_digit};
use proptest::prelude::*;

fn sex() -> impl Strategy<Value = Sex> {
    prop_oneof![Just(Sex::Male), Just(Sex::Female)]
}

/// Valid CNP components: (sex, year, month, day, county, ordinal, born_abroad)
fn components() -> impl Strategy<Value = (Sex, u16, u8, u8, u8, u16, bool)> {
    (sex(), 1800u16..=2099, 1u8..=12, 1u8..=31, 0u8..=99, 0u16..=999, any::<bool>()).prop_filter_map(
        "not an issuable CNP",
        |(sex, year, month, day, county, ordinal, abroad)| {
            let abroad = abroad && (1900..=1999).contains(&year);
            cnp::is_valid_calendar_date(year, month, day)
                .then_some((sex, year, month, day, county, ordinal, abroad))
        },
    )
}

proptest! {
    #[test]
    fn check_digit_is_one_decimal_digit(body in "[0-9]{12}") {
        let digit = check_digit(&body);
        prop_assert!(digit.is_ascii_digit());
    }

    #[test]
    fn cnp_round_trips((sex, year, month, day, county, ordinal, abroad) in components()) {
        let built = Cnp::new(sex, year, month, day, county, ordinal, abroad).unwrap();
        let number = built.stringify();
        prop_assert_eq!(number.len(), 13);

        let parsed = Cnp::parse(&number).unwrap();
        prop_assert_eq!(parsed, built);
        prop_assert_eq!(parsed.sex(), sex);
        prop_assert_eq!(parsed.birth_date(), BirthDate::new(year, month, day).unwrap());
        prop_assert_eq!(parsed.county(), county);
        prop_assert_eq!(parsed.ordinal(), ordinal);
        prop_assert_eq!(parsed.born_abroad(), abroad);
        prop_assert!(cnp::is_valid(&number));
    }

    #[test]
    fn nif_round_trips(digits in "[0-9]{11}") {
        let number = Nif::new(digits.clone()).stringify();
        let parsed = Nif::parse(&number).unwrap();
        prop_assert_eq!(parsed.digits11(), digits.as_str());
        prop_assert!(cnp::parse(&number).is_some_and(|n| n.is_nif()));
    }

    #[test]
    fn wrong_length_is_invalid(s in "[0-9]{0,12}|[0-9]{14,20}") {
        prop_assert!(!cnp::is_valid(&s));
    }

    #[test]
    fn non_digit_is_invalid(prefix in "[0-9]{0,12}", junk in "[^0-9]") {
        let mut s: String = prefix;
        s.push_str(&junk);
        while s.chars().count() < 13 {
            s.push('0');
        }
        prop_assert!(!cnp::is_valid(&s));
    }

    #[test]
    fn corrupted_check_digit_is_invalid(body in "[1-9][0-9]{11}", last in 0u32..10) {
        let replacement = char::from_digit(last, 10).unwrap();
        prop_assume!(replacement != check_digit(&body));
        let number = format!("{body}{replacement}");
        prop_assert!(!cnp::is_valid(&number));
    }

    #[test]
    fn parse_never_panics(s in "\\PC{0,20}") {
        let _ = cnp::parse(&s);
        let _ = Cnp::parse(&s);
        let _ = Nif::parse(&s);
    }
}
