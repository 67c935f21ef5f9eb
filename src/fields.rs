//! Calendar field records.
//!
//! `DateTimeFields` is the complete set of calendar fields of a
//! `CalendarDateTime`. `PartialDateTime` is the builder used to derive a new
//! `CalendarDateTime` from an existing one: every supplied field replaces the
//! current value, and the merged record is validated from the coarsest field
//! (era) to the finest (nanosecond).

use tinystr::TinyAsciiStr;

/// The calendar fields of a `CalendarDateTime`.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeFields {
    /// The one-based ordinal of the era within its calendar.
    pub era: u8,
    /// The era code, for example `meiji` or `ce`.
    pub era_code: TinyAsciiStr<16>,
    /// The year within the era.
    pub era_year: i32,
    pub month: u8,
    pub day: u8,
    /// The one-based period of the day: always 1 on a 24-hour clock, 1 (AM)
    /// or 2 (PM) on a 12-hour clock.
    pub period: u8,
    /// The hour within the period, as shown on the clock.
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
}

/// A `PartialDateTime` represents partially filled calendar fields.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PartialDateTime {
    // A potentially set `era` ordinal.
    pub era: Option<u8>,
    // A potentially set `era_year` field.
    pub era_year: Option<i32>,
    // A potentially set `month` field.
    pub month: Option<u8>,
    // A potentially set `day` field.
    pub day: Option<u8>,
    // A potentially set `period` field.
    pub period: Option<u8>,
    // A potentially set `hour` field.
    pub hour: Option<u8>,
    // A potentially set `minute` field.
    pub minute: Option<u8>,
    // A potentially set `second` field.
    pub second: Option<u8>,
    // A potentially set `nanosecond` field.
    pub nanosecond: Option<u32>,
}

impl PartialDateTime {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns whether any field finer than a day is set.
    pub fn has_time(&self) -> bool {
        self.period.is_some()
            || self.hour.is_some()
            || self.minute.is_some()
            || self.second.is_some()
            || self.nanosecond.is_some()
    }
}

/// Convenience methods for building a `PartialDateTime`
impl PartialDateTime {
    pub const fn new() -> Self {
        Self {
            era: None,
            era_year: None,
            month: None,
            day: None,
            period: None,
            hour: None,
            minute: None,
            second: None,
            nanosecond: None,
        }
    }

    pub const fn with_era(mut self, era: Option<u8>) -> Self {
        self.era = era;
        self
    }

    pub const fn with_era_year(mut self, era_year: Option<i32>) -> Self {
        self.era_year = era_year;
        self
    }

    pub const fn with_month(mut self, month: Option<u8>) -> Self {
        self.month = month;
        self
    }

    pub const fn with_day(mut self, day: Option<u8>) -> Self {
        self.day = day;
        self
    }

    pub const fn with_period(mut self, period: Option<u8>) -> Self {
        self.period = period;
        self
    }

    pub const fn with_hour(mut self, hour: Option<u8>) -> Self {
        self.hour = hour;
        self
    }

    pub const fn with_minute(mut self, minute: Option<u8>) -> Self {
        self.minute = minute;
        self
    }

    pub const fn with_second(mut self, second: Option<u8>) -> Self {
        self.second = second;
        self
    }

    pub const fn with_nanosecond(mut self, nanosecond: Option<u32>) -> Self {
        self.nanosecond = nanosecond;
        self
    }

    /// Zeroes the minute, second and nanosecond fields.
    pub const fn with_zeroed_time(self) -> Self {
        self.with_minute(Some(0))
            .with_second(Some(0))
            .with_nanosecond(Some(0))
    }
}
