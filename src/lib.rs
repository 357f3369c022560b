//! Gregorian to Chinese lunisolar calendar conversion.
//!
//! The crate covers lunar years 1900..=2100 through a packed month-length
//! table, derives the sexagenary (stem-branch) designators and zodiac sign
//! of a day, approximates the 24 solar terms of any Gregorian year from a
//! truncated model of the sun's ecliptic longitude, and finds the nearest
//! upcoming festival or solar term.
//!
//! # Examples
//!
//! ```
//! use lunisolar::{SolarDate, Zodiac};
//!
//! let date = SolarDate::new(2024, 2, 10).unwrap();
//! let lunar = date.lunar().unwrap();
//!
//! assert_eq!((2024, 1, 1, false), (lunar.year(), lunar.month(), lunar.day(), lunar.is_leap()));
//! assert_eq!(Zodiac::Dragon, lunar.zodiac());
//! assert_eq!("甲辰年正月初一", lunar.to_string());
//! ```
//!
//! Upcoming events:
//!
//! ```
//! use lunisolar::{FestivalKind, SolarDate, next_event};
//!
//! let event = next_event(SolarDate::new(2024, 2, 9).unwrap()).unwrap();
//! assert_eq!("春节", event.name());
//! assert_eq!(1, event.days_until());
//! assert_eq!(FestivalKind::LunarFestival, event.kind());
//! ```
//!
//! All tables are immutable constants; every function is pure and may be
//! called from any thread.

mod consts;
mod date;
pub mod festival;
pub mod fmt;
pub mod lunar;
mod prelude;
mod range;
pub mod sexagenary;
pub mod solar_term;
pub mod table;
mod types;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use date::{ParseError, SolarDate};
pub use festival::{
    EventConfig, EventConfigError, FestivalEvent, FestivalKind, next_event, next_event_with,
};
pub use lunar::{LunarDate, lunar_to_solar, solar_to_lunar};
pub use range::{RangeError, SolarDateRange};
pub use sexagenary::{Branch, Stem, StemBranch, Zodiac};
pub use solar_term::{SolarTerm, SolarTermKind, solar_longitude, terms_for_year};
pub use table::YearInfo;
pub use types::{Day, LunarDay, LunarMonth, Month, Year};

/// Failures of the calendar computations.
///
/// All computations are deterministic, so retrying a failed call yields the
/// same error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The year lies outside the range the requested computation supports.
    #[error("Unsupported year: {0}")]
    UnsupportedYear(i32),

    /// Forward conversion ran past the end of the year table.
    #[error("Date {0} is beyond the lunar year table")]
    DateOutOfRange(SolarDate),

    /// The month, leap flag and day do not name a day of that lunar year.
    #[error("Invalid lunar date: {year} month {month}{} day {day}", leap_suffix(.leap))]
    InvalidLunarDate {
        year:  i32,
        month: u8,
        day:   u8,
        leap:  bool,
    },
}

const fn leap_suffix(leap: &bool) -> &'static str {
    if *leap { " (leap)" } else { "" }
}
