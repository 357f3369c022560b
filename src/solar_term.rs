//! Solar terms from a truncated model of the sun's ecliptic longitude.
//!
//! The longitude is the sun's geometric mean longitude plus a three-term
//! equation of center, good to a fraction of a degree over several
//! centuries around J2000. Terms are resolved to the civil day (UTC+8) on
//! which the modelled longitude passes each multiple of 15°; that is not
//! almanac-grade, and days close to midnight may land one day off.

use crate::consts::{
    DAYS_PER_CENTURY, FIRST_TERM_LONGITUDE, J2000, MAX_YEAR, MIN_YEAR, SOLAR_TERM_COUNT,
    TERM_SPACING, TERM_TZ_OFFSET_MINUTES,
};
use crate::date::gregorian_to_jdn;
use crate::prelude::*;
use crate::{CalendarError, SolarDate};
use serde::Serialize;
use tracing::{trace, warn};

/// The 24 solar terms in Gregorian-year order, starting with 小寒 at 285°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
pub enum SolarTermKind {
    #[display(fmt = "小寒")]
    MinorCold,
    #[display(fmt = "大寒")]
    MajorCold,
    #[display(fmt = "立春")]
    StartOfSpring,
    #[display(fmt = "雨水")]
    RainWater,
    #[display(fmt = "惊蛰")]
    AwakeningOfInsects,
    #[display(fmt = "春分")]
    SpringEquinox,
    #[display(fmt = "清明")]
    PureBrightness,
    #[display(fmt = "谷雨")]
    GrainRain,
    #[display(fmt = "立夏")]
    StartOfSummer,
    #[display(fmt = "小满")]
    GrainBuds,
    #[display(fmt = "芒种")]
    GrainInEar,
    #[display(fmt = "夏至")]
    SummerSolstice,
    #[display(fmt = "小暑")]
    MinorHeat,
    #[display(fmt = "大暑")]
    MajorHeat,
    #[display(fmt = "立秋")]
    StartOfAutumn,
    #[display(fmt = "处暑")]
    EndOfHeat,
    #[display(fmt = "白露")]
    WhiteDew,
    #[display(fmt = "秋分")]
    AutumnEquinox,
    #[display(fmt = "寒露")]
    ColdDew,
    #[display(fmt = "霜降")]
    FrostsDescent,
    #[display(fmt = "立冬")]
    StartOfWinter,
    #[display(fmt = "小雪")]
    MinorSnow,
    #[display(fmt = "大雪")]
    MajorSnow,
    #[display(fmt = "冬至")]
    WinterSolstice,
}

impl SolarTermKind {
    /// All terms in Gregorian-year order.
    pub const ALL: [Self; SOLAR_TERM_COUNT] = [
        Self::MinorCold,
        Self::MajorCold,
        Self::StartOfSpring,
        Self::RainWater,
        Self::AwakeningOfInsects,
        Self::SpringEquinox,
        Self::PureBrightness,
        Self::GrainRain,
        Self::StartOfSummer,
        Self::GrainBuds,
        Self::GrainInEar,
        Self::SummerSolstice,
        Self::MinorHeat,
        Self::MajorHeat,
        Self::StartOfAutumn,
        Self::EndOfHeat,
        Self::WhiteDew,
        Self::AutumnEquinox,
        Self::ColdDew,
        Self::FrostsDescent,
        Self::StartOfWinter,
        Self::MinorSnow,
        Self::MajorSnow,
        Self::WinterSolstice,
    ];

    /// Position in Gregorian-year order, `0` for 小寒.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Ecliptic longitude the sun reaches at this term, in degrees.
    ///
    /// ```
    /// use lunisolar::SolarTermKind;
    ///
    /// assert_eq!(0.0, SolarTermKind::SpringEquinox.angle());
    /// assert_eq!(270.0, SolarTermKind::WinterSolstice.angle());
    /// ```
    pub fn angle(self) -> f64 {
        (self.index() as f64).mul_add(TERM_SPACING, FIRST_TERM_LONGITUDE) % 360.0
    }

    /// Returns the English name of the term.
    pub const fn english(self) -> &'static str {
        match self {
            Self::MinorCold => "Minor Cold",
            Self::MajorCold => "Major Cold",
            Self::StartOfSpring => "Start of Spring",
            Self::RainWater => "Rain Water",
            Self::AwakeningOfInsects => "Awakening of Insects",
            Self::SpringEquinox => "Spring Equinox",
            Self::PureBrightness => "Pure Brightness",
            Self::GrainRain => "Grain Rain",
            Self::StartOfSummer => "Start of Summer",
            Self::GrainBuds => "Grain Buds",
            Self::GrainInEar => "Grain in Ear",
            Self::SummerSolstice => "Summer Solstice",
            Self::MinorHeat => "Minor Heat",
            Self::MajorHeat => "Major Heat",
            Self::StartOfAutumn => "Start of Autumn",
            Self::EndOfHeat => "End of Heat",
            Self::WhiteDew => "White Dew",
            Self::AutumnEquinox => "Autumn Equinox",
            Self::ColdDew => "Cold Dew",
            Self::FrostsDescent => "Frost's Descent",
            Self::StartOfWinter => "Start of Winter",
            Self::MinorSnow => "Minor Snow",
            Self::MajorSnow => "Major Snow",
            Self::WinterSolstice => "Winter Solstice",
        }
    }
}

/// A solar term and the civil day it falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[display(fmt = "{kind} {date}")]
pub struct SolarTerm {
    kind: SolarTermKind,
    date: SolarDate,
}

impl SolarTerm {
    /// Returns which term this is.
    pub const fn kind(&self) -> SolarTermKind {
        self.kind
    }

    /// Returns the civil day (UTC+8) the term falls on.
    pub const fn date(&self) -> SolarDate {
        self.date
    }
}

/// Approximate geometric ecliptic longitude of the sun in degrees, `[0, 360)`.
///
/// `julian_day` is a Julian Date; time is taken as Julian centuries from J2000.0.
///
/// ```
/// use lunisolar::solar_longitude;
///
/// let lon = solar_longitude(2_451_545.0);
/// assert!((lon - 280.37).abs() < 0.05);
/// ```
pub fn solar_longitude(julian_day: f64) -> f64 {
    let t = (julian_day - J2000) / DAYS_PER_CENTURY;
    let mean_longitude = 0.000_303_2f64.mul_add(t * t, 36_000.769_83f64.mul_add(t, 280.466_46));
    let mean_anomaly = (-0.000_153_7f64)
        .mul_add(t * t, 35_999.050_29f64.mul_add(t, 357.529_11))
        .to_radians();

    let center = (-0.000_014f64).mul_add(t * t, (-0.004_817f64).mul_add(t, 1.914_602))
        * mean_anomaly.sin()
        + (-0.000_101f64).mul_add(t, 0.019_993) * (2.0 * mean_anomaly).sin()
        + 0.000_289 * (3.0 * mean_anomaly).sin();

    (mean_longitude + center).rem_euclid(360.0)
}

/// Julian Date of the civil midnight opening day `jdn`.
fn day_start(jdn: i32) -> f64 {
    f64::from(jdn) - 0.5 - f64::from(TERM_TZ_OFFSET_MINUTES) / 1440.0
}

/// The term whose angle the sun passes while moving from `from` to `to`
/// degrees, if any. The sweep is about one degree per day, so at most one
/// term can match.
fn crossed_term(from: f64, to: f64) -> Option<SolarTermKind> {
    let sweep = (to - from).rem_euclid(360.0);
    SolarTermKind::ALL.into_iter().find(|kind| {
        let ahead = (kind.angle() - from).rem_euclid(360.0);
        ahead > 0.0 && ahead <= sweep
    })
}

/// Computes the dates of the 24 solar terms in Gregorian year `year`, in order.
///
/// The search steps day by day from December 21 of the previous year to
/// January 10 of the next, and keeps the terms landing inside `year`.
///
/// # Errors
/// Returns `CalendarError::UnsupportedYear` outside years 1..=9999.
///
/// # Example
///
/// ```
/// use lunisolar::{SolarDate, SolarTermKind, terms_for_year};
///
/// let terms = terms_for_year(2024).unwrap();
/// assert_eq!(24, terms.len());
/// assert_eq!(SolarTermKind::StartOfSpring, terms[2].kind());
/// assert_eq!(SolarDate::new(2024, 2, 4).unwrap(), terms[2].date());
/// ```
#[tracing::instrument(level = "debug")]
pub fn terms_for_year(year: i32) -> Result<Vec<SolarTerm>, CalendarError> {
    if !(i32::from(MIN_YEAR)..=i32::from(MAX_YEAR)).contains(&year) {
        return Err(CalendarError::UnsupportedYear(year));
    }

    let first = gregorian_to_jdn(year - 1, 12, 21);
    let last = gregorian_to_jdn(year + 1, 1, 10);

    let mut terms = Vec::with_capacity(SOLAR_TERM_COUNT);
    let mut previous: Option<SolarTermKind> = None;
    let mut longitude = solar_longitude(day_start(first));
    for jdn in first..=last {
        let next = solar_longitude(day_start(jdn + 1));
        if let Some(kind) = crossed_term(longitude, next).filter(|&k| previous != Some(k)) {
            previous = Some(kind);
            if let Some(date) = SolarDate::from_jdn(jdn).filter(|d| i32::from(d.year()) == year) {
                trace!(%kind, %date, "solar term");
                terms.push(SolarTerm { kind, date });
            }
        }
        longitude = next;
    }

    if terms.len() != SOLAR_TERM_COUNT {
        warn!(year, found = terms.len(), "unexpected number of solar terms");
    }
    Ok(terms)
}

/// The solar term falling on `date`, if any.
///
/// ```
/// use lunisolar::{SolarDate, SolarTermKind, solar_term::term_on};
///
/// let date = SolarDate::new(2024, 12, 21).unwrap();
/// assert_eq!(Some(SolarTermKind::WinterSolstice), term_on(date));
/// ```
pub fn term_on(date: SolarDate) -> Option<SolarTermKind> {
    let longitude = solar_longitude(day_start(date.jdn()));
    crossed_term(longitude, solar_longitude(day_start(date.jdn() + 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::solar;

    #[test]
    fn test_angles() {
        assert!((SolarTermKind::MinorCold.angle() - 285.0).abs() < 1e-9);
        assert!((SolarTermKind::MajorCold.angle() - 300.0).abs() < 1e-9);
        assert!((SolarTermKind::StartOfSpring.angle() - 315.0).abs() < 1e-9);
        assert!((SolarTermKind::SpringEquinox.angle()).abs() < 1e-9);
        assert!((SolarTermKind::SummerSolstice.angle() - 90.0).abs() < 1e-9);
        assert!((SolarTermKind::AutumnEquinox.angle() - 180.0).abs() < 1e-9);
        for (i, kind) in SolarTermKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(SolarTermKind::MinorCold.to_string(), "小寒");
        assert_eq!(SolarTermKind::WinterSolstice.to_string(), "冬至");
        assert_eq!(SolarTermKind::GrainInEar.english(), "Grain in Ear");
    }

    #[test]
    fn test_longitude_range_and_motion() {
        let start = solar(2024, 1, 1).jdn();
        for jdn in start..start + 366 {
            let a = solar_longitude(f64::from(jdn));
            let b = solar_longitude(f64::from(jdn + 1));
            assert!((0.0..360.0).contains(&a));
            let daily = (b - a).rem_euclid(360.0);
            assert!((0.94..1.03).contains(&daily), "motion {daily} at {jdn}");
        }
    }

    #[test]
    fn test_equinox_longitude() {
        // March equinox 2024: 2024-03-20 03:06 UTC
        let jd = f64::from(solar(2024, 3, 20).jdn()) - 0.5 + 3.1 / 24.0;
        let lon = solar_longitude(jd);
        let off = if lon > 180.0 { lon - 360.0 } else { lon };
        assert!(off.abs() < 0.05, "longitude {lon}");
    }

    #[test]
    fn test_terms_2024_match_almanac() {
        let expected = [
            (1, 6),
            (1, 20),
            (2, 4),
            (2, 19),
            (3, 5),
            (3, 20),
            (4, 4),
            (4, 19),
            (5, 5),
            (5, 20),
            (6, 5),
            (6, 21),
            (7, 6),
            (7, 22),
            (8, 7),
            (8, 22),
            (9, 7),
            (9, 22),
            (10, 8),
            (10, 23),
            (11, 7),
            (11, 22),
            (12, 6),
            (12, 21),
        ];
        let terms = terms_for_year(2024).unwrap();
        assert_eq!(terms.len(), 24);
        for ((term, (m, d)), kind) in terms.iter().zip(expected).zip(SolarTermKind::ALL) {
            assert_eq!(term.kind(), kind);
            assert_eq!(term.date(), solar(2024, m, d), "{kind}");
        }
        assert_eq!(terms[0].to_string(), "小寒 2024-01-06");
    }

    #[test]
    fn test_every_table_year_has_24_ordered_unique_terms() {
        for year in 1900..=2100 {
            let terms = terms_for_year(year).unwrap();
            assert_eq!(terms.len(), 24, "year {year}");
            for pair in terms.windows(2) {
                assert!(pair[0].date() < pair[1].date(), "year {year}");
            }
            for (term, kind) in terms.iter().zip(SolarTermKind::ALL) {
                assert_eq!(term.kind(), kind, "year {year}");
            }
        }
    }

    #[test]
    fn test_years_far_from_the_table() {
        for year in [1, 2, 500, 1582, 3000, 9998, 9999] {
            assert_eq!(terms_for_year(year).unwrap().len(), 24, "year {year}");
        }
    }

    #[test]
    fn test_unsupported_years() {
        assert!(matches!(
            terms_for_year(0),
            Err(CalendarError::UnsupportedYear(0))
        ));
        assert!(matches!(
            terms_for_year(10000),
            Err(CalendarError::UnsupportedYear(10000))
        ));
    }

    #[test]
    fn test_term_on() {
        assert_eq!(term_on(solar(2024, 2, 4)), Some(SolarTermKind::StartOfSpring));
        assert_eq!(term_on(solar(2024, 2, 5)), None);
        assert_eq!(term_on(solar(2024, 2, 3)), None);
        let terms = terms_for_year(2031).unwrap();
        for term in &terms {
            assert_eq!(term_on(term.date()), Some(term.kind()));
        }
    }
}
