//! Gregorian calendar days.
//!
//! A [`SolarDate`] is stored as a Julian Day Number, so day arithmetic and
//! ordering are plain integer operations; the Gregorian fields are derived on
//! demand.

use crate::consts::{DATE_SEPARATOR, LONG_MONTH_DAYS, MAX_MONTH, MAX_YEAR, MIN_YEAR};
use crate::lunar::{self, LunarDate};
use crate::prelude::*;
use crate::types::{Day, Month, Year};
use crate::CalendarError;
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Invalid lunar day: {} (must be 1-{})", "_0", LONG_MONTH_DAYS)]
    InvalidLunarDay(u8),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

const MIN_JDN: i32 = gregorian_to_jdn(MIN_YEAR as i32, 1, 1);
const MAX_JDN: i32 = gregorian_to_jdn(MAX_YEAR as i32, 12, 31);

/// A day of the proleptic Gregorian calendar between 0001-01-01 and 9999-12-31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SolarDate {
    jdn: i32,
}

impl SolarDate {
    /// Creates a date from Gregorian components.
    ///
    /// # Errors
    /// Returns `ParseError` if any component is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use lunisolar::SolarDate;
    ///
    /// let date = SolarDate::new(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// ```
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        Self::from_parts(year, month, Day::new(day, year, month)?)
    }

    /// Creates a date from validated components.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if `day` does not exist in `year`-`month`.
    pub fn from_parts(year: Year, month: Month, day: Day) -> Result<Self, ParseError> {
        let day = Day::new(day.get(), year, month)?;
        Ok(Self {
            jdn: gregorian_to_jdn(
                i32::from(year.get()),
                i32::from(month.get()),
                i32::from(day.get()),
            ),
        })
    }

    /// Creates a date from a Julian Day Number.
    ///
    /// Returns `None` if the day falls outside years 1..=9999.
    pub fn from_jdn(jdn: i32) -> Option<Self> {
        (MIN_JDN..=MAX_JDN).contains(&jdn).then_some(Self { jdn })
    }

    /// Returns the Julian Day Number (the JD at noon UT of this day).
    #[inline]
    pub const fn jdn(&self) -> i32 {
        self.jdn
    }

    /// Returns `(year, month, day)`.
    pub fn ymd(&self) -> (u16, u8, u8) {
        let (y, m, d) = jdn_to_gregorian(self.jdn);
        // SolarDate is only ever built inside MIN_YEAR..=MAX_YEAR
        (y as u16, m as u8, d as u8)
    }

    pub fn year(&self) -> u16 {
        self.ymd().0
    }

    pub fn month(&self) -> u8 {
        self.ymd().1
    }

    pub fn day(&self) -> u8 {
        self.ymd().2
    }

    /// ISO-8601 day of week, `1..=7` for Monday through Sunday.
    ///
    /// ```
    /// use lunisolar::SolarDate;
    ///
    /// assert_eq!(6, SolarDate::new(2024, 2, 10).unwrap().day_of_week()); // Saturday
    /// ```
    pub const fn day_of_week(&self) -> u8 {
        (self.jdn.rem_euclid(7) + 1) as u8
    }

    /// Returns the date `days` days later (earlier if negative), or `None`
    /// when leaving the supported range.
    pub fn checked_add_days(self, days: i32) -> Option<Self> {
        self.jdn.checked_add(days).and_then(Self::from_jdn)
    }

    /// Whole days from `self` to `later`; negative when `later` is earlier.
    pub const fn days_until(self, later: Self) -> i32 {
        later.jdn - self.jdn
    }

    /// Converts this date to the lunisolar calendar.
    ///
    /// # Errors
    /// See [`lunar::solar_to_lunar`].
    pub fn lunar(self) -> Result<LunarDate, CalendarError> {
        lunar::solar_to_lunar(self)
    }

    fn parse_component<T: FromStr>(s: &str) -> Result<T, ParseError> {
        s.trim()
            .parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl Sub for SolarDate {
    type Output = i32;

    fn sub(self, rhs: Self) -> Self::Output {
        self.jdn - rhs.jdn
    }
}

impl fmt::Display for SolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{y:04}{DATE_SEPARATOR}{m:02}{DATE_SEPARATOR}{d:02}")
    }
}

impl FromStr for SolarDate {
    type Err = ParseError;

    /// Parses `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} component(s)",
                parts.len()
            )));
        };

        Self::new(
            Self::parse_component(year)?,
            Self::parse_component(month)?,
            Self::parse_component(day)?,
        )
    }
}

impl TryFrom<(u16, u8, u8)> for SolarDate {
    type Error = ParseError;

    fn try_from((year, month, day): (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl serde::Serialize for SolarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for SolarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Julian Day Number of a proleptic Gregorian date (astronomical year numbering).
pub(crate) const fn gregorian_to_jdn(y: i32, m: i32, d: i32) -> i32 {
    (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
        - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
        + d
        - 32075
}

pub(crate) const fn jdn_to_gregorian(jdn: i32) -> (i32, i32, i32) {
    let f = jdn + 1401 + (((4 * jdn + 274_277) / 146_097) * 3) / 4 - 38;
    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
    (year, month, day)
}
