//! Heavenly stems, earthly branches and the zodiac.
//!
//! Year and day designators follow the 60-day and 60-year cycles. The month
//! designator uses index arithmetic on the lunar month number: it changes at
//! the lunar month boundary rather than at the solar term, and its stem runs
//! one position behind the traditional assignment (甲 years open with 乙寅,
//! not 丙寅). Values stay compatible with what earlier releases displayed.

use crate::consts::{SEXAGENARY_EPOCH, SEXAGENARY_EPOCH_INDEX};
use crate::date::gregorian_to_jdn;
use crate::prelude::*;
use crate::SolarDate;
use serde::Serialize;

const SEXAGENARY_EPOCH_JDN: i32 = gregorian_to_jdn(
    SEXAGENARY_EPOCH.0 as i32,
    SEXAGENARY_EPOCH.1 as i32,
    SEXAGENARY_EPOCH.2 as i32,
);

/// The ten heavenly stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Stem {
    #[display(fmt = "甲")]
    Jia,
    #[display(fmt = "乙")]
    Yi,
    #[display(fmt = "丙")]
    Bing,
    #[display(fmt = "丁")]
    Ding,
    #[display(fmt = "戊")]
    Wu,
    #[display(fmt = "己")]
    Ji,
    #[display(fmt = "庚")]
    Geng,
    #[display(fmt = "辛")]
    Xin,
    #[display(fmt = "壬")]
    Ren,
    #[display(fmt = "癸")]
    Gui,
}

/// The twelve earthly branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Branch {
    #[display(fmt = "子")]
    Zi,
    #[display(fmt = "丑")]
    Chou,
    #[display(fmt = "寅")]
    Yin,
    #[display(fmt = "卯")]
    Mao,
    #[display(fmt = "辰")]
    Chen,
    #[display(fmt = "巳")]
    Si,
    #[display(fmt = "午")]
    Wu,
    #[display(fmt = "未")]
    Wei,
    #[display(fmt = "申")]
    Shen,
    #[display(fmt = "酉")]
    You,
    #[display(fmt = "戌")]
    Xu,
    #[display(fmt = "亥")]
    Hai,
}

/// Animal sign of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Zodiac {
    #[display(fmt = "鼠")]
    Rat,
    #[display(fmt = "牛")]
    Ox,
    #[display(fmt = "虎")]
    Tiger,
    #[display(fmt = "兔")]
    Rabbit,
    #[display(fmt = "龙")]
    Dragon,
    #[display(fmt = "蛇")]
    Snake,
    #[display(fmt = "马")]
    Horse,
    #[display(fmt = "羊")]
    Goat,
    #[display(fmt = "猴")]
    Monkey,
    #[display(fmt = "鸡")]
    Rooster,
    #[display(fmt = "狗")]
    Dog,
    #[display(fmt = "猪")]
    Pig,
}

impl Stem {
    /// All stems in cycle order.
    pub const ALL: [Self; 10] = [
        Self::Jia,
        Self::Yi,
        Self::Bing,
        Self::Ding,
        Self::Wu,
        Self::Ji,
        Self::Geng,
        Self::Xin,
        Self::Ren,
        Self::Gui,
    ];

    /// Stem at `index`, taken modulo 10.
    pub const fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(10) as usize]
    }

    /// Position in the stem cycle, `0` for 甲.
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl Branch {
    /// All branches in cycle order.
    pub const ALL: [Self; 12] = [
        Self::Zi,
        Self::Chou,
        Self::Yin,
        Self::Mao,
        Self::Chen,
        Self::Si,
        Self::Wu,
        Self::Wei,
        Self::Shen,
        Self::You,
        Self::Xu,
        Self::Hai,
    ];

    /// Branch at `index`, taken modulo 12.
    pub const fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    /// Position in the branch cycle, `0` for 子.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the animal sign of this branch.
    pub const fn zodiac(self) -> Zodiac {
        Zodiac::ALL[self as usize]
    }
}

impl Zodiac {
    /// All signs in branch order.
    pub const ALL: [Self; 12] = [
        Self::Rat,
        Self::Ox,
        Self::Tiger,
        Self::Rabbit,
        Self::Dragon,
        Self::Snake,
        Self::Horse,
        Self::Goat,
        Self::Monkey,
        Self::Rooster,
        Self::Dog,
        Self::Pig,
    ];

    /// Returns the English name of the sign.
    pub const fn english(self) -> &'static str {
        match self {
            Self::Rat => "Rat",
            Self::Ox => "Ox",
            Self::Tiger => "Tiger",
            Self::Rabbit => "Rabbit",
            Self::Dragon => "Dragon",
            Self::Snake => "Snake",
            Self::Horse => "Horse",
            Self::Goat => "Goat",
            Self::Monkey => "Monkey",
            Self::Rooster => "Rooster",
            Self::Dog => "Dog",
            Self::Pig => "Pig",
        }
    }
}

/// A two-character stem-branch designator such as 甲辰.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[display(fmt = "{stem}{branch}")]
pub struct StemBranch {
    pub stem:   Stem,
    pub branch: Branch,
}

impl StemBranch {
    /// Pairs a stem with a branch.
    pub const fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Member `index` of the sexagenary cycle, `0` being 甲子.
    pub const fn from_cycle(index: i64) -> Self {
        Self::new(Stem::from_index(index), Branch::from_index(index))
    }
}

/// Designator of a lunar year: stem `(year - 4) mod 10`, branch `(year - 4) mod 12`.
///
/// ```
/// use lunisolar::sexagenary::year_pillar;
///
/// assert_eq!("甲辰", year_pillar(2024).to_string());
/// ```
pub const fn year_pillar(lunar_year: i32) -> StemBranch {
    StemBranch::from_cycle(lunar_year as i64 - 4)
}

/// Zodiac sign of a lunar year, from its branch.
pub const fn zodiac(lunar_year: i32) -> Zodiac {
    year_pillar(lunar_year).branch.zodiac()
}

/// Designator of a lunar month: stem `(2 * year stem + month) mod 10`,
/// branch `(month + 1) mod 12`. A leap month shares the designator of its
/// regular namesake.
pub const fn month_pillar(lunar_year: i32, lunar_month: u8) -> StemBranch {
    let year_stem = year_pillar(lunar_year).stem.index() as i64;
    StemBranch::new(
        Stem::from_index(year_stem * 2 + lunar_month as i64),
        Branch::from_index(lunar_month as i64 + 1),
    )
}

/// Designator of a civil day, counted from 1900-01-01 (甲戌).
///
/// ```
/// use lunisolar::{SolarDate, sexagenary::day_pillar};
///
/// assert_eq!("戊午", day_pillar(SolarDate::new(2000, 1, 1).unwrap()).to_string());
/// ```
pub fn day_pillar(date: SolarDate) -> StemBranch {
    let offset = i64::from(date.jdn() - SEXAGENARY_EPOCH_JDN);
    StemBranch::from_cycle(offset + SEXAGENARY_EPOCH_INDEX)
}
