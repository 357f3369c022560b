//! Conversion between Gregorian days and lunar dates.
//!
//! Both directions count days from the lunar epoch, Lunar New Year 1900
//! (Gregorian 1900-01-31), and walk the decoded year table.

use crate::consts::{LUNAR_EPOCH, LUNAR_MAX_YEAR, LUNAR_MIN_YEAR};
use crate::date::gregorian_to_jdn;
use crate::sexagenary::{self, StemBranch, Zodiac};
use crate::table::{self, YearInfo};
use crate::types::{LunarDay, LunarMonth};
use crate::{CalendarError, SolarDate, fmt};
use serde::Serialize;
use std::fmt as std_fmt;

const LUNAR_EPOCH_JDN: i32 = gregorian_to_jdn(
    LUNAR_EPOCH.0 as i32,
    LUNAR_EPOCH.1 as i32,
    LUNAR_EPOCH.2 as i32,
);

/// A day of the lunisolar calendar together with its designators.
///
/// Always produced by conversion, so the month and day exist in the year
/// table and the designators agree with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LunarDate {
    year:         i32,
    month:        u8,
    day:          u8,
    leap:         bool,
    year_pillar:  StemBranch,
    month_pillar: StemBranch,
    day_pillar:   StemBranch,
    zodiac:       Zodiac,
    solar:        SolarDate,
}

impl LunarDate {
    fn new(year: i32, month: u8, day: u8, leap: bool, solar: SolarDate) -> Self {
        Self {
            year,
            month,
            day,
            leap,
            year_pillar: sexagenary::year_pillar(year),
            month_pillar: sexagenary::month_pillar(year, month),
            day_pillar: sexagenary::day_pillar(solar),
            zodiac: sexagenary::zodiac(year),
            solar,
        }
    }

    /// Returns the lunar year number.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month number `1..=12`; a leap month carries the number of the month it follows.
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day of the month, `1..=30`.
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// `true` for the inserted second occurrence of the month number.
    pub const fn is_leap(&self) -> bool {
        self.leap
    }

    /// Returns the stem-branch designator of the lunar year.
    pub const fn year_pillar(&self) -> StemBranch {
        self.year_pillar
    }

    /// Returns the stem-branch designator of the lunar month.
    pub const fn month_pillar(&self) -> StemBranch {
        self.month_pillar
    }

    /// Returns the stem-branch designator of the day.
    pub const fn day_pillar(&self) -> StemBranch {
        self.day_pillar
    }

    /// Returns the zodiac sign of the lunar year.
    pub const fn zodiac(&self) -> Zodiac {
        self.zodiac
    }

    /// The Gregorian day this date was converted from.
    pub const fn solar(&self) -> SolarDate {
        self.solar
    }

    /// Length of the month this date falls in.
    pub fn month_len(&self) -> u8 {
        table::decode(self.year)
            .ok()
            .and_then(|info| info.month_len(self.month, self.leap))
            .unwrap_or_default()
    }

    /// Month name such as 正月 or 闰二月.
    pub fn month_name(&self) -> String {
        fmt::month_name(self.month, self.leap).unwrap_or_default()
    }

    /// Day name such as 初一 or 廿九.
    pub fn day_name(&self) -> String {
        fmt::day_name(self.day).unwrap_or_default()
    }
}

impl std_fmt::Display for LunarDate {
    /// Traditional form, e.g. `甲辰年正月初一`.
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        write!(
            f,
            "{}年{}{}",
            self.year_pillar,
            self.month_name(),
            self.day_name()
        )
    }
}

/// Converts a Gregorian day to the lunar calendar.
///
/// # Errors
/// - `UnsupportedYear` if the day falls before Lunar New Year 1900 or after
///   the end of lunar year 2100. The year reported is the Gregorian year,
///   except 1899 for January 1900.
/// - `DateOutOfRange` if the table walk ends without resolving the day.
///
/// # Example
///
/// ```
/// use lunisolar::{SolarDate, solar_to_lunar};
///
/// let lunar = solar_to_lunar(SolarDate::new(2017, 7, 23).unwrap()).unwrap();
/// assert_eq!((2017, 6, 1, true), (lunar.year(), lunar.month(), lunar.day(), lunar.is_leap()));
/// ```
pub fn solar_to_lunar(date: SolarDate) -> Result<LunarDate, CalendarError> {
    let mut offset = date.jdn() - LUNAR_EPOCH_JDN;
    if offset < 0 {
        // January 1900 still belongs to lunar 1899
        let year = i32::from(date.year()).min(LUNAR_MIN_YEAR - 1);
        return Err(CalendarError::UnsupportedYear(year));
    }

    let mut info = table::decode(LUNAR_MIN_YEAR)?;
    loop {
        let total = i32::from(info.total_days());
        if offset < total {
            break;
        }
        offset -= total;
        if info.year() == LUNAR_MAX_YEAR {
            return Err(past_table_end(date));
        }
        info = table::decode(info.year() + 1)?;
    }

    for (month, leap, len) in info.months() {
        let len = i32::from(len);
        if offset < len {
            // offset < len <= 30
            let day = (offset + 1) as u8;
            return Ok(LunarDate::new(info.year(), month, day, leap, date));
        }
        offset -= len;
    }

    Err(CalendarError::DateOutOfRange(date))
}

fn past_table_end(date: SolarDate) -> CalendarError {
    let year = i32::from(date.year());
    if year > LUNAR_MAX_YEAR {
        CalendarError::UnsupportedYear(year)
    } else {
        CalendarError::DateOutOfRange(date)
    }
}

/// Converts a lunar date to its Gregorian day.
///
/// # Errors
/// - `UnsupportedYear` if `year` is outside 1900..=2100.
/// - `InvalidLunarDate` if the month (or requested leap month) does not exist
///   that year, or `day` is zero or past the end of the month.
///
/// # Example
///
/// ```
/// use lunisolar::{SolarDate, lunar_to_solar};
///
/// let date = lunar_to_solar(2023, 2, 1, true).unwrap();
/// assert_eq!(SolarDate::new(2023, 3, 22).unwrap(), date);
/// ```
pub fn lunar_to_solar(year: i32, month: u8, day: u8, leap: bool) -> Result<SolarDate, CalendarError> {
    let info = table::decode(year)?;
    let invalid = CalendarError::InvalidLunarDate {
        year,
        month,
        day,
        leap,
    };
    let month = LunarMonth::new(month).map_err(|_| invalid)?;
    let day = LunarDay::new(day).map_err(|_| invalid)?;
    let month_len = info.month_len(month.get(), leap).ok_or(invalid)?;
    if day.get() > month_len {
        return Err(invalid);
    }

    let offset = days_before_year(year)? + days_before_month(&info, month, leap) + i32::from(day.get()) - 1;
    SolarDate::from_jdn(LUNAR_EPOCH_JDN + offset).ok_or(CalendarError::UnsupportedYear(year))
}

/// Days from the lunar epoch to New Year's Day of `year`.
fn days_before_year(year: i32) -> Result<i32, CalendarError> {
    (LUNAR_MIN_YEAR..year)
        .map(|y| table::decode(y).map(|info| i32::from(info.total_days())))
        .sum()
}

fn days_before_month(info: &YearInfo, month: LunarMonth, leap: bool) -> i32 {
    info.months()
        .take_while(|&(m, l, _)| (m, l) != (month.get(), leap))
        .map(|(_, _, len)| i32::from(len))
        .sum()
}
