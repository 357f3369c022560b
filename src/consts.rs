/// Minimum valid Gregorian year (inclusive)
pub const MIN_YEAR: u16 = 1;
/// Maximum valid Gregorian year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December, or the twelfth lunar month)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

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

/// First lunar year covered by the year table
pub const LUNAR_MIN_YEAR: i32 = 1900;
/// Last lunar year covered by the year table
pub const LUNAR_MAX_YEAR: i32 = 2100;

/// Length of a short (small) lunar month
pub const SHORT_MONTH_DAYS: u8 = 29;
/// Length of a long (big) lunar month
pub const LONG_MONTH_DAYS: u8 = 30;
/// Twelve short months, the floor of every lunar year length
pub const BASE_YEAR_DAYS: u16 = 12 * SHORT_MONTH_DAYS as u16;

/// Lunar New Year's Day of lunar year 1900, in (year, month, day)
pub const LUNAR_EPOCH: (u16, u8, u8) = (1900, 1, 31);
/// Reference day of the sexagenary day cycle
pub const SEXAGENARY_EPOCH: (u16, u8, u8) = (1900, 1, 1);
/// Position of `SEXAGENARY_EPOCH` in the 60-day cycle (0 = 甲子; 1900-01-01 is 甲戌)
pub const SEXAGENARY_EPOCH_INDEX: i64 = 10;

/// Julian Day of J2000.0 (2000-01-01T12:00 TT)
pub const J2000: f64 = 2_451_545.0;
/// Days per Julian century
pub const DAYS_PER_CENTURY: f64 = 36525.0;
/// Civil day boundaries for solar terms are taken at UTC+8 midnight
pub const TERM_TZ_OFFSET_MINUTES: i32 = 480;

/// Number of solar terms per tropical year
pub const SOLAR_TERM_COUNT: usize = 24;
/// Ecliptic longitude of the first term of the Gregorian year (小寒)
pub const FIRST_TERM_LONGITUDE: f64 = 285.0;
/// Ecliptic spacing between consecutive terms
pub const TERM_SPACING: f64 = 15.0;

/// Forward search window of the event resolver, in days
pub const DEFAULT_EVENT_WINDOW_DAYS: u16 = 60;
/// Largest accepted event search window
pub const MAX_EVENT_WINDOW_DAYS: u16 = 366;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
