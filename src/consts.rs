/// Number of characters in a full personal number
pub const NUMBER_LEN: usize = 13;

/// Number of characters covered by the check digit
pub const BODY_LEN: usize = 12;

/// Number of opaque digits carried by a NIF (between the marker and the check digit)
pub const NIF_DIGITS_LEN: usize = 11;

/// Leading digit reserved for NIFs
pub const NIF_MARKER: char = '9';

/// Weights applied to the 12 body digits when computing the check digit
pub static CHECK_DIGIT_WEIGHTS: [u32; BODY_LEN] = [2, 7, 9, 1, 4, 6, 3, 5, 8, 2, 7, 9];

/// Modulus of the weighted digit sum
pub(crate) const CHECK_DIGIT_MODULUS: u32 = 11;

/// A remainder of 10 cannot be written as one digit and is encoded as 1
pub(crate) const CHECK_DIGIT_OVERFLOW: u32 = 10;
pub(crate) const CHECK_DIGIT_OVERFLOW_SUBSTITUTE: u32 = 1;

/// Earliest birth year a CNP can encode (inclusive)
pub const MIN_BIRTH_YEAR: u16 = 1800;
/// Latest birth year a CNP can encode (inclusive)
pub const MAX_BIRTH_YEAR: u16 = 2099;

/// Earliest birth year for persons born abroad (inclusive)
pub const MIN_BORN_ABROAD_YEAR: u16 = 1900;
/// Latest birth year for persons born abroad (inclusive)
pub const MAX_BORN_ABROAD_YEAR: u16 = 1999;

/// Highest county code the two-digit field can hold
pub const MAX_COUNTY: u8 = 99;

/// Highest ordinal the three-digit field can hold
pub const MAX_ORDINAL: u16 = 999;

/// County codes documented as issued: 01-46, plus 51 and 52 since 1981.
/// CNPs with other county codes exist and still parse.
pub const DOCUMENTED_COUNTIES: [u8; 48] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, //
    11, 12, 13, 14, 15, 16, 17, 18, 19, 20, //
    21, 22, 23, 24, 25, 26, 27, 28, 29, 30, //
    31, 32, 33, 34, 35, 36, 37, 38, 39, 40, //
    41, 42, 43, 44, 45, 46, //
    51, 52,
];

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
