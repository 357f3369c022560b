use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    LONG_MONTH_DAYS, MAX_MONTH, MAX_YEAR,
};
use crate::date::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{NonZeroU8, NonZeroU16};

/// A Gregorian year in `MIN_YEAR..=MAX_YEAR` (1..=9999).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        NonZeroU16::new(value)
            .filter(|_| value <= MAX_YEAR)
            .map(Self)
            .ok_or(ParseError::InvalidYear(value))
    }

    /// Returns the year number.
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Returns `true` for Gregorian leap years.
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }
}

/// A month number in `1..=12`, shared by the Gregorian and lunar calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        NonZeroU8::new(value)
            .filter(|_| value <= MAX_MONTH)
            .map(Self)
            .ok_or(ParseError::InvalidMonth(value))
    }

    /// Returns the month number.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

/// A Gregorian day of month, validated against its year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day for the given year and month.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, ParseError> {
        NonZeroU8::new(value)
            .filter(|_| value <= days_in_month(year.get(), month.get()))
            .map(Self)
            .ok_or(ParseError::InvalidDay {
                year: year.get(),
                month: month.get(),
                day: value,
            })
    }

    /// Returns the day number.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

/// A lunar month number in `1..=12`.
///
/// A leap month carries the number of the regular month it follows; whether
/// it exists depends on the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LunarMonth(NonZeroU8);

impl LunarMonth {
    /// Creates a new `LunarMonth`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        NonZeroU8::new(value)
            .filter(|_| value <= MAX_MONTH)
            .map(Self)
            .ok_or(ParseError::InvalidMonth(value))
    }

    /// Returns the lunar month number.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

/// A lunar day of month in `1..=30`. Day 30 only exists in long months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LunarDay(NonZeroU8);

impl LunarDay {
    /// Creates a new `LunarDay`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidLunarDay` if the value is 0 or > 30.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        NonZeroU8::new(value)
            .filter(|_| value <= LONG_MONTH_DAYS)
            .map(Self)
            .ok_or(ParseError::InvalidLunarDay(value))
    }

    /// Returns the lunar day number.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u8> for LunarMonth {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u8> for LunarDay {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LunarMonth> for u8 {
    fn from(month: LunarMonth) -> Self {
        month.get()
    }
}

impl From<LunarDay> for u8 {
    fn from(day: LunarDay) -> Self {
        day.get()
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.get())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.get())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.get())
    }
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
