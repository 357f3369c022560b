use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ParseError, RANGE_SEPARATOR, SolarDate, prelude::*};

/// An inclusive span of Gregorian days.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct SolarDateRange {
    start: SolarDate,
    end:   SolarDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: SolarDate, end: SolarDate },

    /// Error parsing date component.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl SolarDateRange {
    /// Creates a new range.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: SolarDate, end: SolarDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The window `start..=start + days`, cut short at the last representable day.
    pub fn starting_at(start: SolarDate, days: u16) -> Self {
        let end = (0..=i32::from(days))
            .rev()
            .find_map(|offset| start.checked_add_days(offset))
            .unwrap_or(start);
        Self { start, end }
    }

    /// Returns the start date of the range.
    pub const fn start(&self) -> SolarDate {
        self.start
    }

    /// Returns the end date of the range.
    pub const fn end(&self) -> SolarDate {
        self.end
    }

    /// Returns `true` if `date` lies within the range, both ends included.
    pub fn contains(&self, date: &SolarDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Number of days in the range, both ends included.
    pub const fn len_days(&self) -> u32 {
        // end >= start is enforced by construction
        (self.end.jdn() - self.start.jdn()) as u32 + 1
    }

    /// Iterates over every day of the range in order.
    pub fn days(&self) -> impl Iterator<Item = SolarDate> + '_ {
        (self.start.jdn()..=self.end.jdn()).filter_map(SolarDate::from_jdn)
    }
}

impl FromStr for SolarDateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        match trimmed.split_once(RANGE_SEPARATOR) {
            None => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            Some((_, end)) if end.contains(RANGE_SEPARATOR) => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: {s}"
            ))),
            Some((start, end)) => Self::new(start.parse()?, end.parse()?),
        }
    }
}

impl Serialize for SolarDateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SolarDateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
