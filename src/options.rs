//! Configuration options for calendars.
//!
//! A `Calendar` is constructed from a `CalendarOptions` record: a calendar
//! system, a clock type, an optional time zone and a locale.

use core::{fmt, str::FromStr};

use icu_calendar::AnyCalendarKind;
use icu_locale::Locale;

use crate::{
    error::{CalendarError, ErrorMessage},
    iso::IsoDate,
    tz::TimeZone,
    CalendarResult,
};

// ==== CalendarSystem ====

/// The calendar systems supported by `Calendar`.
///
/// Every supported system shares its months, days and year boundaries with
/// the ISO calendar and differs only in how years are grouped into eras.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarSystem {
    /// The Gregorian calendar, one era (`ce`).
    #[default]
    Gregorian,
    /// The Japanese imperial calendar, from Meiji onwards.
    Japanese,
    /// The Thai Buddhist calendar, one era (`be`).
    Buddhist,
    /// The Republic of China calendar, from Minguo 1 onwards.
    Roc,
}

impl CalendarSystem {
    /// Returns the canonical identifier of this calendar system.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Gregorian => "gregorian",
            Self::Japanese => "japanese",
            Self::Buddhist => "buddhist",
            Self::Roc => "roc",
        }
    }

    /// Returns the ISO dates bounding the supported range of this system.
    #[must_use]
    pub const fn supported_range(self) -> (IsoDate, IsoDate) {
        match self {
            Self::Gregorian | Self::Buddhist => (IsoDate::MIN, IsoDate::MAX),
            Self::Japanese => (IsoDate::new_unchecked(1868, 10, 23), IsoDate::MAX),
            Self::Roc => (IsoDate::new_unchecked(1912, 1, 1), IsoDate::MAX),
        }
    }

    pub(crate) const fn icu_kind(self) -> AnyCalendarKind {
        match self {
            Self::Gregorian => AnyCalendarKind::Gregorian,
            Self::Japanese => AnyCalendarKind::Japanese,
            Self::Buddhist => AnyCalendarKind::Buddhist,
            Self::Roc => AnyCalendarKind::Roc,
        }
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.identifier().fmt(f)
    }
}

impl FromStr for CalendarSystem {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gregorian" | "gregory" => Ok(Self::Gregorian),
            "japanese" => Ok(Self::Japanese),
            "buddhist" => Ok(Self::Buddhist),
            "roc" => Ok(Self::Roc),
            _ => Err(CalendarError::range().with_enum(ErrorMessage::CalendarIdentifierInvalid)),
        }
    }
}

// ==== ClockType ====

/// The clock used to express hours within a day.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockType {
    /// A 12-hour clock: two periods per day, hours 1 through 12.
    TwelveHour,
    /// A 24-hour clock: one period per day, hours 0 through 23.
    #[default]
    TwentyFourHour,
}

impl ClockType {
    /// Returns the number of periods in a day.
    #[must_use]
    pub const fn periods_in_day(self) -> u8 {
        match self {
            Self::TwelveHour => 2,
            Self::TwentyFourHour => 1,
        }
    }

    /// Returns the first hour shown in a period: 12 or 0.
    #[must_use]
    pub const fn first_hour(self) -> u8 {
        match self {
            Self::TwelveHour => 12,
            Self::TwentyFourHour => 0,
        }
    }

    /// Returns the last hour shown in a period: 11 or 23.
    #[must_use]
    pub const fn last_hour(self) -> u8 {
        match self {
            Self::TwelveHour => 11,
            Self::TwentyFourHour => 23,
        }
    }

    /// Returns the smallest and largest valid hour numbers within a period.
    ///
    /// On a 12-hour clock the period starts at 12, so this is not the same
    /// as `(first_hour, last_hour)`.
    #[must_use]
    pub const fn hour_range(self) -> (u8, u8) {
        match self {
            Self::TwelveHour => (1, 12),
            Self::TwentyFourHour => (0, 23),
        }
    }

    /// Splits a 0..=23 hour of day into a one-based period and clock hour.
    pub(crate) const fn split_hour(self, hour_of_day: u8) -> (u8, u8) {
        match self {
            Self::TwentyFourHour => (1, hour_of_day),
            Self::TwelveHour => {
                let period = hour_of_day / 12 + 1;
                let hour = match hour_of_day % 12 {
                    0 => 12,
                    h => h,
                };
                (period, hour)
            }
        }
    }

    /// Joins a one-based period and clock hour into a 0..=23 hour of day.
    pub(crate) fn join_hour(self, period: u8, hour: u8) -> CalendarResult<u8> {
        if period == 0 || period > self.periods_in_day() {
            return Err(CalendarError::range().with_enum(ErrorMessage::PeriodOutOfRange));
        }
        let (first, last) = self.hour_range();
        if !(first..=last).contains(&hour) {
            return Err(CalendarError::range().with_enum(ErrorMessage::HourOutOfRange));
        }
        Ok(match self {
            Self::TwentyFourHour => hour,
            Self::TwelveHour => (period - 1) * 12 + hour % 12,
        })
    }
}

impl fmt::Display for ClockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwelveHour => "12",
            Self::TwentyFourHour => "24",
        }
        .fmt(f)
    }
}

impl FromStr for ClockType {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "12" | "12h" | "12HourClock" => Ok(Self::TwelveHour),
            "24" | "24h" | "24HourClock" => Ok(Self::TwentyFourHour),
            _ => Err(CalendarError::range().with_enum(ErrorMessage::ClockIdentifierInvalid)),
        }
    }
}

// ==== Disambiguation ====

/// How a wall-clock time that is skipped or repeated by a time zone
/// transition resolves to an exact time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disambiguation {
    /// Repeated times take the earlier instant; skipped times move forward
    /// by the length of the gap.
    #[default]
    Compatible,
    /// Take the earlier of the candidate instants.
    Earlier,
    /// Take the later of the candidate instants.
    Later,
    /// Fail on repeated or skipped times.
    Reject,
}

impl fmt::Display for Disambiguation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compatible => "compatible",
            Self::Earlier => "earlier",
            Self::Later => "later",
            Self::Reject => "reject",
        }
        .fmt(f)
    }
}

impl FromStr for Disambiguation {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compatible" => Ok(Self::Compatible),
            "earlier" => Ok(Self::Earlier),
            "later" => Ok(Self::Later),
            "reject" => Ok(Self::Reject),
            _ => Err(CalendarError::range().with_enum(ErrorMessage::DisambiguationInvalid)),
        }
    }
}

// ==== CalendarOptions ====

/// The configuration a `Calendar` is created from.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct CalendarOptions {
    pub system: CalendarSystem,
    pub clock: ClockType,
    /// The time zone; `None` resolves to UTC.
    pub time_zone: Option<TimeZone>,
    pub locale: Locale,
    pub disambiguation: Disambiguation,
}

impl CalendarOptions {
    /// Creates options for `system` with a 24-hour clock, UTC and the `en-US` locale.
    #[must_use]
    pub fn new(system: CalendarSystem) -> Self {
        Self {
            system,
            clock: ClockType::default(),
            time_zone: None,
            locale: icu_locale::locale!("en-US"),
            disambiguation: Disambiguation::default(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: ClockType) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = Some(time_zone);
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Parses and sets a BCP-47 locale tag.
    pub fn with_locale_str(self, locale: &str) -> CalendarResult<Self> {
        let locale = Locale::from_str(locale)
            .map_err(|_| CalendarError::range().with_enum(ErrorMessage::LocaleInvalid))?;
        Ok(self.with_locale(locale))
    }

    #[must_use]
    pub fn with_disambiguation(mut self, disambiguation: Disambiguation) -> Self {
        self.disambiguation = disambiguation;
        self
    }
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self::new(CalendarSystem::default())
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::{CalendarOptions, CalendarSystem, ClockType, Disambiguation};
    use crate::error::ErrorKind;

    #[test]
    fn calendar_system_identifiers() {
        assert_eq!(
            CalendarSystem::from_str("japanese").unwrap(),
            CalendarSystem::Japanese
        );
        assert_eq!(
            CalendarSystem::from_str("gregory").unwrap(),
            CalendarSystem::Gregorian
        );
        assert_eq!(CalendarSystem::Roc.to_string(), "roc");
        let err = CalendarSystem::from_str("hebrew").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn clock_hours() {
        let twelve = ClockType::TwelveHour;
        assert_eq!(twelve.split_hour(0), (1, 12));
        assert_eq!(twelve.split_hour(11), (1, 11));
        assert_eq!(twelve.split_hour(12), (2, 12));
        assert_eq!(twelve.split_hour(23), (2, 11));
        assert_eq!(twelve.join_hour(1, 12).unwrap(), 0);
        assert_eq!(twelve.join_hour(2, 12).unwrap(), 12);
        assert_eq!(twelve.join_hour(2, 1).unwrap(), 13);
        assert!(twelve.join_hour(3, 1).is_err());
        assert!(twelve.join_hour(1, 0).is_err());
        assert_eq!((twelve.first_hour(), twelve.last_hour()), (12, 11));
        assert_eq!(twelve.join_hour(1, twelve.first_hour()).unwrap(), 0);
        assert_eq!(twelve.join_hour(2, twelve.last_hour()).unwrap(), 23);

        let twenty_four = ClockType::TwentyFourHour;
        assert_eq!(twenty_four.split_hour(17), (1, 17));
        assert_eq!(twenty_four.join_hour(1, 0).unwrap(), 0);
        assert!(twenty_four.join_hour(2, 0).is_err());
        assert_eq!((twenty_four.first_hour(), twenty_four.last_hour()), (0, 23));
        assert_eq!(ClockType::from_str("12").unwrap(), twelve);
    }

    #[test]
    fn options_builder() {
        let options = CalendarOptions::new(CalendarSystem::Buddhist)
            .with_clock(ClockType::TwelveHour)
            .with_disambiguation(Disambiguation::Reject)
            .with_locale_str("ja-JP")
            .unwrap();
        assert_eq!(options.system, CalendarSystem::Buddhist);
        assert_eq!(options.locale.id.language.as_str(), "ja");
        assert!(options.time_zone.is_none());
        assert!(CalendarOptions::default().with_locale_str("!!").is_err());
        assert_eq!(Disambiguation::from_str("later").unwrap(), Disambiguation::Later);
    }
}
