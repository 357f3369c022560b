//! Packed month-length table for lunar years 1900..=2100.
//!
//! Each entry packs one lunar year into 17 bits:
//!
//! | bits    | meaning                                                     |
//! |---------|-------------------------------------------------------------|
//! | `0..4`  | leap month number, 0 if the year has none                   |
//! | `4..16` | one bit per regular month, bit 15 is month 1; set = 30 days |
//! | `16`    | set if the leap month has 30 days                           |
//!
//! Nothing outside this module touches the raw bits; callers work with the
//! decoded [`YearInfo`].

use crate::consts::{
    BASE_YEAR_DAYS, LONG_MONTH_DAYS, LUNAR_MAX_YEAR, LUNAR_MIN_YEAR, MAX_MONTH, SHORT_MONTH_DAYS,
};
use crate::CalendarError;
use serde::Serialize;

const LEAP_MONTH_MASK: u32 = 0xF;
const LEAP_LONG_BIT: u32 = 0x1_0000;
const MONTH_ONE_BIT: u32 = 0x8000;

#[rustfmt::skip]
const YEAR_TABLE: [u32; (LUNAR_MAX_YEAR - LUNAR_MIN_YEAR + 1) as usize] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520,                                                                                  // 2100
];

/// Decoded month structure of one lunar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct YearInfo {
    year: i32,
    /// Length of months 1..=12, index 0 is month 1.
    month_lengths: [u8; 12],
    /// `(month number, length)` of the leap month, which follows the regular
    /// month of the same number.
    leap: Option<(u8, u8)>,
}

/// Decodes the table entry of lunar year `year`.
///
/// # Errors
/// Returns `CalendarError::UnsupportedYear` outside 1900..=2100.
///
/// # Example
///
/// ```
/// use lunisolar::table;
///
/// let info = table::decode(2023).unwrap();
/// assert_eq!(info.leap_month(), Some(2));
/// assert_eq!(info.total_days(), 384);
/// ```
pub fn decode(year: i32) -> Result<YearInfo, CalendarError> {
    if !(LUNAR_MIN_YEAR..=LUNAR_MAX_YEAR).contains(&year) {
        return Err(CalendarError::UnsupportedYear(year));
    }
    let packed = YEAR_TABLE[(year - LUNAR_MIN_YEAR) as usize];

    let month_lengths = std::array::from_fn(|i| length_for(packed & (MONTH_ONE_BIT >> i) != 0));
    // low nibble is always 0..=12 in the table
    let leap = match (packed & LEAP_MONTH_MASK) as u8 {
        0 => None,
        month => Some((month, length_for(packed & LEAP_LONG_BIT != 0))),
    };

    Ok(YearInfo {
        year,
        month_lengths,
        leap,
    })
}

const fn length_for(long: bool) -> u8 {
    if long { LONG_MONTH_DAYS } else { SHORT_MONTH_DAYS }
}

impl YearInfo {
    /// Returns the lunar year this entry describes.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Number of the month that is followed by a leap month, if any.
    pub fn leap_month(&self) -> Option<u8> {
        self.leap.map(|(month, _)| month)
    }

    /// Length of the leap month, if any.
    pub fn leap_month_len(&self) -> Option<u8> {
        self.leap.map(|(_, len)| len)
    }

    /// Lengths of the twelve regular months.
    pub const fn month_lengths(&self) -> &[u8; 12] {
        &self.month_lengths
    }

    /// Length of month `month`, or of its leap month when `leap` is set.
    ///
    /// Returns `None` if that month does not exist this year.
    pub fn month_len(&self, month: u8, leap: bool) -> Option<u8> {
        if !(1..=MAX_MONTH).contains(&month) {
            return None;
        }
        if leap {
            self.leap
                .filter(|&(leap_month, _)| leap_month == month)
                .map(|(_, len)| len)
        } else {
            Some(self.month_lengths[usize::from(month - 1)])
        }
    }

    /// Days in the whole lunar year, leap month included.
    pub fn total_days(&self) -> u16 {
        let long_months = self
            .month_lengths
            .iter()
            .filter(|&&len| len == LONG_MONTH_DAYS)
            .count() as u16;
        BASE_YEAR_DAYS + long_months + self.leap_month_len().map_or(0, u16::from)
    }

    /// Months of the year in calendar order as `(month, is_leap, length)`,
    /// with the leap month placed after its regular namesake.
    pub fn months(&self) -> impl Iterator<Item = (u8, bool, u8)> + '_ {
        (1..=MAX_MONTH).flat_map(move |month| {
            let regular = (month, false, self.month_lengths[usize::from(month - 1)]);
            let leap = self
                .leap
                .filter(|&(leap_month, _)| leap_month == month)
                .map(|(_, len)| (month, true, len));
            std::iter::once(regular).chain(leap)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bounds() {
        assert!(matches!(
            decode(1899),
            Err(CalendarError::UnsupportedYear(1899))
        ));
        assert!(matches!(
            decode(2101),
            Err(CalendarError::UnsupportedYear(2101))
        ));
        assert!(decode(1900).is_ok());
        assert!(decode(2100).is_ok());
    }

    #[test]
    fn test_decode_known_years() {
        struct TestCase {
            year:        i32,
            leap:        Option<(u8, u8)>,
            total:       u16,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        1900,
                leap:        Some((8, 29)),
                total:       384,
                description: "epoch year, leap eighth month",
            },
            TestCase {
                year:        2017,
                leap:        Some((6, 30)),
                total:       384,
                description: "long leap month",
            },
            TestCase {
                year:        2023,
                leap:        Some((2, 29)),
                total:       384,
                description: "short leap month",
            },
            TestCase {
                year:        2024,
                leap:        None,
                total:       354,
                description: "common year",
            },
        ];

        for case in &cases {
            let info = decode(case.year).unwrap();
            assert_eq!(info.year(), case.year);
            assert_eq!(info.leap, case.leap, "{}: {}", case.year, case.description);
            assert_eq!(
                info.total_days(),
                case.total,
                "{}: {}",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_month_bits_are_msb_first() {
        // 2024 = 0x04b60: months 2, 5, 7, 8, 10, 11 are long
        let info = decode(2024).unwrap();
        assert_eq!(
            info.month_lengths(),
            &[29, 30, 29, 29, 30, 29, 30, 30, 29, 30, 30, 29]
        );
    }

    #[test]
    fn test_month_len() {
        let info = decode(2023).unwrap();
        assert_eq!(info.month_len(2, false), Some(30));
        assert_eq!(info.month_len(2, true), Some(29));
        assert_eq!(info.month_len(3, true), None);
        assert_eq!(info.month_len(0, false), None);
        assert_eq!(info.month_len(13, false), None);
        assert_eq!(decode(2024).unwrap().month_len(1, true), None);
    }

    #[test]
    fn test_months_places_leap_after_namesake() {
        let info = decode(2023).unwrap();
        let months: Vec<_> = info.months().map(|(m, leap, _)| (m, leap)).collect();
        assert_eq!(months.len(), 13);
        assert_eq!(&months[..4], &[(1, false), (2, false), (2, true), (3, false)]);
        assert_eq!(decode(2024).unwrap().months().count(), 12);
    }

    #[test]
    fn test_every_year_is_consistent() {
        for year in LUNAR_MIN_YEAR..=LUNAR_MAX_YEAR {
            let info = decode(year).unwrap();
            let regular: u16 = info.month_lengths().iter().map(|&l| u16::from(l)).sum();
            let leap = info.leap_month_len().map_or(0, u16::from);
            assert_eq!(regular + leap, info.total_days(), "year {year}");
            assert_eq!(
                info.months().map(|(_, _, l)| u16::from(l)).sum::<u16>(),
                info.total_days(),
                "year {year}"
            );
            assert!(
                (353..=355).contains(&info.total_days()) || (383..=385).contains(&info.total_days()),
                "year {year} has {} days",
                info.total_days()
            );
            assert!(info.leap_month().is_none_or(|m| (1..=12).contains(&m)));
            assert_eq!(info.leap_month().is_some(), info.leap_month_len().is_some());
        }
    }
}
