//! Fixed festivals and the upcoming-event resolver.
//!
//! Three sources feed the resolver: the solar terms, festivals pinned to a
//! Gregorian day, and festivals pinned to a lunar day. Lunar festivals are
//! only produced for lunar years inside the year table.

use crate::consts::{DEFAULT_EVENT_WINDOW_DAYS, MAX_EVENT_WINDOW_DAYS};
use crate::prelude::*;
use crate::{SolarDate, SolarDateRange, lunar_to_solar, terms_for_year};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A festival pinned to a month and day of some calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Festival {
    pub month: u8,
    pub day:   u8,
    pub name:  &'static str,
}

const fn festival(month: u8, day: u8, name: &'static str) -> Festival {
    Festival { month, day, name }
}

/// Festivals on fixed Gregorian days.
pub const SOLAR_FESTIVALS: &[Festival] = &[
    festival(1, 1, "元旦"),
    festival(2, 14, "情人节"),
    festival(3, 8, "妇女节"),
    festival(3, 12, "植树节"),
    festival(4, 1, "愚人节"),
    festival(5, 1, "劳动节"),
    festival(5, 4, "青年节"),
    festival(6, 1, "儿童节"),
    festival(7, 1, "建党节"),
    festival(8, 1, "建军节"),
    festival(9, 10, "教师节"),
    festival(10, 1, "国庆节"),
    festival(12, 24, "平安夜"),
    festival(12, 25, "圣诞节"),
];

/// Festivals on fixed days of regular (non-leap) lunar months.
pub const LUNAR_FESTIVALS: &[Festival] = &[
    festival(1, 1, "春节"),
    festival(1, 15, "元宵节"),
    festival(2, 2, "龙抬头"),
    festival(5, 5, "端午节"),
    festival(7, 7, "七夕"),
    festival(7, 15, "中元节"),
    festival(8, 15, "中秋节"),
    festival(9, 9, "重阳节"),
    festival(12, 8, "腊八节"),
    festival(12, 23, "小年"),
];

/// Where an event comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum FestivalKind {
    #[display(fmt = "solar term")]
    SolarTerm,
    #[display(fmt = "solar festival")]
    SolarFestival,
    #[display(fmt = "lunar festival")]
    LunarFestival,
}

impl FestivalKind {
    /// Tie-break order between events on the same day; lower wins.
    const fn priority(self) -> u8 {
        match self {
            Self::SolarFestival => 0,
            Self::LunarFestival => 1,
            Self::SolarTerm => 2,
        }
    }
}

/// A festival or solar term on a given day, relative to a reference day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FestivalEvent {
    name:       String,
    date:       SolarDate,
    days_until: u16,
    kind:       FestivalKind,
}

impl FestivalEvent {
    /// Returns the festival or solar term name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the day of the event.
    pub const fn date(&self) -> SolarDate {
        self.date
    }

    /// Days from the reference day; `0` when the event is on that day.
    pub const fn days_until(&self) -> u16 {
        self.days_until
    }

    /// Returns where the event comes from.
    pub const fn kind(&self) -> FestivalKind {
        self.kind
    }
}

/// Errors raised when validating an [`EventConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventConfigError {
    #[error("window_days must be at most {max}, got {window_days}")]
    WindowTooLong { window_days: u16, max: u16 },
}

/// Search settings for [`next_event_with`].
///
/// Missing fields take their defaults when deserialized, so a host can embed
/// a partial table in its own settings file.
///
/// # Example
///
/// ```
/// use lunisolar::EventConfig;
///
/// let config = EventConfig::new()
///     .with_window_days(30)
///     .with_solar_terms(false);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(30, config.window_days());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Days ahead of the reference day to search, inclusive.
    window_days:     u16,
    solar_terms:     bool,
    solar_festivals: bool,
    lunar_festivals: bool,
}

impl EventConfig {
    /// Defaults: a 60-day window with every event source enabled.
    pub const fn new() -> Self {
        Self {
            window_days:     DEFAULT_EVENT_WINDOW_DAYS,
            solar_terms:     true,
            solar_festivals: true,
            lunar_festivals: true,
        }
    }

    /// Sets how many days ahead of the reference day to search.
    pub const fn with_window_days(mut self, window_days: u16) -> Self {
        self.window_days = window_days;
        self
    }

    /// Enables or disables solar terms.
    pub const fn with_solar_terms(mut self, enabled: bool) -> Self {
        self.solar_terms = enabled;
        self
    }

    /// Enables or disables festivals on fixed Gregorian days.
    pub const fn with_solar_festivals(mut self, enabled: bool) -> Self {
        self.solar_festivals = enabled;
        self
    }

    /// Enables or disables festivals on fixed lunar days.
    pub const fn with_lunar_festivals(mut self, enabled: bool) -> Self {
        self.lunar_festivals = enabled;
        self
    }

    /// Returns the search window in days.
    pub const fn window_days(&self) -> u16 {
        self.window_days
    }

    /// Returns whether solar terms are searched.
    pub const fn solar_terms(&self) -> bool {
        self.solar_terms
    }

    /// Returns whether Gregorian festivals are searched.
    pub const fn solar_festivals(&self) -> bool {
        self.solar_festivals
    }

    /// Returns whether lunar festivals are searched.
    pub const fn lunar_festivals(&self) -> bool {
        self.lunar_festivals
    }

    /// Validates this configuration.
    ///
    /// # Errors
    /// Returns `EventConfigError::WindowTooLong` past 366 days.
    pub const fn validate(&self) -> Result<(), EventConfigError> {
        if self.window_days > MAX_EVENT_WINDOW_DAYS {
            return Err(EventConfigError::WindowTooLong {
                window_days: self.window_days,
                max:         MAX_EVENT_WINDOW_DAYS,
            });
        }
        Ok(())
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the nearest festival or solar term on or after `from`, at most 60
/// days ahead.
///
/// On a tie the Gregorian festival wins over the lunar festival, and either
/// festival wins over a solar term.
///
/// # Example
///
/// ```
/// use lunisolar::{FestivalKind, SolarDate, next_event};
///
/// let event = next_event(SolarDate::new(2024, 12, 20).unwrap()).unwrap();
/// assert_eq!("冬至", event.name());
/// assert_eq!(FestivalKind::SolarTerm, event.kind());
/// assert_eq!(1, event.days_until());
/// ```
#[tracing::instrument(level = "debug")]
pub fn next_event(from: SolarDate) -> Option<FestivalEvent> {
    resolve(from, &EventConfig::new())
}

/// Like [`next_event`], with an explicit search window and event sources.
///
/// # Errors
/// Returns the validation error of an invalid `config`.
#[tracing::instrument(level = "debug", skip(config), fields(window = config.window_days()))]
pub fn next_event_with(
    from: SolarDate,
    config: &EventConfig,
) -> Result<Option<FestivalEvent>, EventConfigError> {
    config.validate()?;
    Ok(resolve(from, config))
}

/// Every festival and solar term falling on `date`, in tie-break order.
///
/// ```
/// use lunisolar::{SolarDate, festival::festivals_on};
///
/// let names: Vec<_> = festivals_on(SolarDate::new(2020, 10, 1).unwrap())
///     .iter()
///     .map(|event| event.name().to_owned())
///     .collect();
/// assert_eq!(vec!["国庆节", "中秋节"], names);
/// ```
pub fn festivals_on(date: SolarDate) -> Vec<FestivalEvent> {
    let mut events = events_in(&SolarDateRange::starting_at(date, 0), &EventConfig::new());
    events.sort_by_key(|event| event.kind.priority());
    events
}

fn resolve(from: SolarDate, config: &EventConfig) -> Option<FestivalEvent> {
    let window = SolarDateRange::starting_at(from, config.window_days);
    let next = events_in(&window, config)
        .into_iter()
        .min_by_key(|event| (event.days_until, event.kind.priority()));
    debug!(%from, event = ?next.as_ref().map(FestivalEvent::name), "resolved next event");
    next
}

/// Collects the events of every enabled source that fall inside `window`.
fn events_in(window: &SolarDateRange, config: &EventConfig) -> Vec<FestivalEvent> {
    let first_year = i32::from(window.start().year());
    let last_year = i32::from(window.end().year());
    let mut found: Vec<(SolarDate, String, FestivalKind)> = Vec::new();

    if config.solar_terms {
        for year in first_year..=last_year {
            match terms_for_year(year) {
                Ok(terms) => found.extend(
                    terms
                        .iter()
                        .map(|term| (term.date(), term.kind().to_string(), FestivalKind::SolarTerm)),
                ),
                Err(err) => debug!(%err, "no solar terms"),
            }
        }
    }

    if config.solar_festivals {
        for year in first_year..=last_year {
            let Ok(year) = u16::try_from(year) else { continue };
            found.extend(SOLAR_FESTIVALS.iter().filter_map(|f| {
                let date = SolarDate::new(year, f.month, f.day).ok()?;
                Some((date, f.name.to_owned(), FestivalKind::SolarFestival))
            }));
        }
    }

    // A lunar year starts between late January and mid February, so the
    // lunar year before the window's first Gregorian year may still reach it.
    if config.lunar_festivals {
        for year in first_year - 1..=last_year {
            found.extend(LUNAR_FESTIVALS.iter().filter_map(|f| {
                let date = lunar_to_solar(year, f.month, f.day, false).ok()?;
                Some((date, f.name.to_owned(), FestivalKind::LunarFestival))
            }));
        }
    }

    found
        .into_iter()
        .filter(|(date, ..)| window.contains(date))
        .filter_map(|(date, name, kind)| {
            let days_until = u16::try_from(window.start().days_until(date)).ok()?;
            trace!(%date, name = %name, %kind, days_until, "candidate event");
            Some(FestivalEvent { name, date, days_until, kind })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::solar;

    #[test]
    fn test_next_event_cases() {
        struct TestCase {
            from:        (u16, u8, u8),
            name:        &'static str,
            days_until:  u16,
            kind:        FestivalKind,
            description: &'static str,
        }

        let cases = [
            TestCase {
                from:        (2024, 2, 9),
                name:        "春节",
                days_until:  1,
                kind:        FestivalKind::LunarFestival,
                description: "eve of the lunar new year",
            },
            TestCase {
                from:        (2024, 9, 10),
                name:        "教师节",
                days_until:  0,
                kind:        FestivalKind::SolarFestival,
                description: "festival on the reference day",
            },
            TestCase {
                from:        (2024, 6, 8),
                name:        "端午节",
                days_until:  2,
                kind:        FestivalKind::LunarFestival,
                description: "dragon boat festival",
            },
            TestCase {
                from:        (2023, 12, 30),
                name:        "元旦",
                days_until:  2,
                kind:        FestivalKind::SolarFestival,
                description: "window crosses the Gregorian new year",
            },
            TestCase {
                from:        (2024, 12, 20),
                name:        "冬至",
                days_until:  1,
                kind:        FestivalKind::SolarTerm,
                description: "solar term ahead of Christmas eve",
            },
            TestCase {
                from:        (2020, 9, 25),
                name:        "国庆节",
                days_until:  6,
                kind:        FestivalKind::SolarFestival,
                description: "national day shares its date with mid-autumn",
            },
            TestCase {
                from:        (2015, 2, 18),
                name:        "春节",
                days_until:  1,
                kind:        FestivalKind::LunarFestival,
                description: "festival beats a solar term on the same day",
            },
            TestCase {
                from:        (2024, 1, 15),
                name:        "腊八节",
                days_until:  3,
                kind:        FestivalKind::LunarFestival,
                description: "festival of the previous lunar year",
            },
            TestCase {
                from:        (2100, 12, 20),
                name:        "冬至",
                days_until:  2,
                kind:        FestivalKind::SolarTerm,
                description: "last year of the table",
            },
        ];

        for case in &cases {
            let (y, m, d) = case.from;
            let event = next_event(solar(y, m, d)).unwrap();
            assert_eq!(event.name(), case.name, "{}", case.description);
            assert_eq!(event.days_until(), case.days_until, "{}", case.description);
            assert_eq!(event.kind(), case.kind, "{}", case.description);
            assert_eq!(
                solar(y, m, d).checked_add_days(i32::from(case.days_until)),
                Some(event.date()),
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_next_event_within_window_every_day() {
        let range = SolarDateRange::new(solar(2023, 1, 1), solar(2025, 12, 31)).unwrap();
        for day in range.days() {
            let event = next_event(day).unwrap();
            assert!(event.days_until() <= 60, "{day}");
            assert_eq!(day.days_until(event.date()), i32::from(event.days_until()));
        }
    }

    #[test]
    fn test_next_event_outside_lunar_table() {
        // no lunar festivals after 2101-01-28, solar events remain
        let event = next_event(solar(2150, 9, 9)).unwrap();
        assert_eq!((event.name(), event.days_until()), ("教师节", 1));

        let event = next_event(solar(9999, 12, 25)).unwrap();
        assert_eq!(event.name(), "圣诞节");
        assert_eq!(event.days_until(), 0);

        // window clipped to the last representable day
        assert_eq!(next_event(solar(9999, 12, 31)), None);
    }

    #[test]
    fn test_festivals_on() {
        let events = festivals_on(solar(2015, 2, 19));
        let names: Vec<_> = events.iter().map(FestivalEvent::name).collect();
        assert_eq!(names, ["春节", "雨水"]);
        assert!(events.iter().all(|event| event.days_until() == 0));

        assert!(festivals_on(solar(2024, 2, 9)).is_empty());

        let events = festivals_on(solar(2024, 12, 21));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), FestivalKind::SolarTerm);
    }

    #[test]
    fn test_config_sources() {
        let from = solar(2024, 2, 9);

        let terms_only = EventConfig::new()
            .with_solar_festivals(false)
            .with_lunar_festivals(false);
        let event = next_event_with(from, &terms_only).unwrap().unwrap();
        assert_eq!((event.name(), event.days_until()), ("雨水", 10));

        let solar_only = EventConfig::new()
            .with_solar_terms(false)
            .with_lunar_festivals(false);
        let event = next_event_with(from, &solar_only).unwrap().unwrap();
        assert_eq!((event.name(), event.days_until()), ("情人节", 5));

        let nothing = EventConfig::new()
            .with_solar_terms(false)
            .with_solar_festivals(false)
            .with_lunar_festivals(false);
        assert_eq!(next_event_with(from, &nothing).unwrap(), None);
    }

    #[test]
    fn test_config_window() {
        let today_only = EventConfig::new().with_window_days(0);
        assert_eq!(next_event_with(solar(2024, 2, 9), &today_only).unwrap(), None);
        let event = next_event_with(solar(2024, 2, 10), &today_only).unwrap().unwrap();
        assert_eq!((event.name(), event.days_until()), ("春节", 0));

        let short = EventConfig::new()
            .with_window_days(4)
            .with_solar_terms(false)
            .with_solar_festivals(false);
        let event = next_event_with(solar(2024, 2, 10), &short).unwrap().unwrap();
        assert_eq!(event.name(), "春节");
        assert_eq!(next_event_with(solar(2024, 2, 11), &short).unwrap(), None);

        let year = EventConfig::new().with_window_days(366);
        assert!(next_event_with(solar(2024, 2, 9), &year).is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = EventConfig::new().with_window_days(367);
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            EventConfigError::WindowTooLong { window_days: 367, max: 366 }
        );
        assert_eq!(err.to_string(), "window_days must be at most 366, got 367");
        assert!(next_event_with(solar(2024, 2, 9), &config).is_err());
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: EventConfig = serde_json::from_str(r#"{"window_days": 30}"#).unwrap();
        assert_eq!(config, EventConfig::new().with_window_days(30));

        let config: EventConfig = serde_json::from_str(r#"{"lunar_festivals": false}"#).unwrap();
        assert_eq!(config.window_days(), 60);
        assert!(config.solar_terms());
        assert!(config.solar_festivals());
        assert!(!config.lunar_festivals());

        let config: EventConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EventConfig::default());
    }

    #[test]
    fn test_event_serialize() {
        let event = next_event(solar(2024, 2, 9)).unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "春节",
                "date": "2024-02-10",
                "days_until": 1,
                "kind": "LunarFestival"
            })
        );
    }

    #[test]
    fn test_festival_tables_are_well_formed() {
        for f in SOLAR_FESTIVALS {
            assert!(SolarDate::new(2024, f.month, f.day).is_ok(), "{}", f.name);
        }
        for f in LUNAR_FESTIVALS {
            assert!((1..=12).contains(&f.month) && (1..=29).contains(&f.day), "{}", f.name);
        }
    }
}
