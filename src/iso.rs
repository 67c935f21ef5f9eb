//! This module implements the ISO wall-clock records.
//!
//! The three record types are:
//!   - `IsoDate`
//!   - `IsoTime`
//!   - `IsoDateTime`
//!
//! The records carry no calendar system or time zone. They are the common
//! currency between the calendar service, time zone providers and `Instant`.

use core::fmt;

use icu_calendar::{Date as IcuDate, Iso};
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    error::{CalendarError, ErrorMessage},
    utils, CalendarResult,
};

/// The earliest supported ISO year.
pub(crate) const MIN_YEAR: i32 = 1;
/// The latest supported ISO year.
pub(crate) const MAX_YEAR: i32 = 9999;

// ==== `IsoDate` section ====

/// A proleptic Gregorian date within the years 1..=9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl IsoDate {
    /// The earliest supported date, 0001-01-01.
    pub const MIN: Self = Self::new_unchecked(MIN_YEAR, 1, 1);
    /// The latest supported date, 9999-12-31.
    pub const MAX: Self = Self::new_unchecked(MAX_YEAR, 12, 31);

    /// Creates a new `IsoDate` without determining the validity.
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a new validated `IsoDate`.
    pub fn try_new(year: i32, month: u8, day: u8) -> CalendarResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::range().with_enum(ErrorMessage::MonthOutOfRange));
        }
        if day == 0 || day > utils::iso_days_in_month(year, month) {
            return Err(CalendarError::range().with_enum(ErrorMessage::DayOutOfRange));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::range().with_enum(ErrorMessage::DateOutOfRange));
        }
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Creates an `IsoDate` from days since 1970-01-01.
    pub fn from_epoch_days(epoch_days: i64) -> CalendarResult<Self> {
        if !(Self::MIN.to_epoch_days()..=Self::MAX.to_epoch_days()).contains(&epoch_days) {
            return Err(CalendarError::range().with_enum(ErrorMessage::DateOutOfRange));
        }
        let (year, month, day) = utils::ymd_from_epoch_days(epoch_days);
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Returns the days since 1970-01-01 for this date.
    #[inline]
    #[must_use]
    pub const fn to_epoch_days(&self) -> i64 {
        utils::epoch_days_from_gregorian_date(self.year, self.month, self.day)
    }

    /// Returns the date `days` days away from this one.
    pub fn add_days(&self, days: i64) -> CalendarResult<Self> {
        Self::from_epoch_days(self.to_epoch_days() + days)
    }

    /// Returns the date `years` years away from this one.
    ///
    /// February 29th is constrained to February 28th in non-leap years.
    pub fn add_years(&self, years: i32) -> CalendarResult<Self> {
        let year = self
            .year
            .checked_add(years)
            .ok_or(CalendarError::range().with_enum(ErrorMessage::DateOutOfRange))?;
        let day = self.day.min(utils::iso_days_in_month(year, self.month));
        Self::try_new(year, self.month, day)
    }

    /// Returns the number of days in this date's month.
    #[inline]
    #[must_use]
    pub const fn days_in_month(&self) -> u8 {
        utils::iso_days_in_month(self.year, self.month)
    }

    /// Returns whether this date's year is a leap year.
    #[inline]
    #[must_use]
    pub const fn in_leap_year(&self) -> bool {
        utils::is_leap(self.year)
    }

    /// Returns the day of the week, where 0 is Sunday and 6 is Saturday.
    #[inline]
    #[must_use]
    pub const fn day_of_week(&self) -> u8 {
        utils::epoch_days_to_day_of_week(self.to_epoch_days())
    }

    /// Returns the one-based day of the year.
    #[inline]
    #[must_use]
    pub const fn day_of_year(&self) -> u16 {
        utils::month_to_day(self.month - 1, utils::is_leap(self.year)) + self.day as u16
    }

    /// Creates an ICU4X `Date<Iso>` from this date.
    pub(crate) fn to_icu4x(self) -> CalendarResult<IcuDate<Iso>> {
        IcuDate::try_new_iso(self.year, self.month, self.day)
            .map_err(|_| CalendarError::range().with_enum(ErrorMessage::DateOutOfRange))
    }
}

impl Writeable for IsoDate {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        write_padded_year(self.year, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.month, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.day, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(10)
    }
}

impl_display_with_writeable!(IsoDate);

// ==== `IsoTime` section ====

/// A wall-clock time of day with nanosecond precision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoTime {
    pub hour: u8,        // 0..=23
    pub minute: u8,      // 0..=59
    pub second: u8,      // 0..=59
    pub nanosecond: u32, // 0..=999_999_999
}

impl IsoTime {
    /// Midnight, the first instant of a day.
    pub const MIDNIGHT: Self = Self::new_unchecked(0, 0, 0, 0);

    pub(crate) const fn new_unchecked(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            nanosecond,
        }
    }

    /// Creates a new validated `IsoTime`.
    pub fn try_new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> CalendarResult<Self> {
        if hour > 23 {
            return Err(CalendarError::range().with_enum(ErrorMessage::HourOutOfRange));
        }
        if minute > 59 || second > 59 || nanosecond > 999_999_999 {
            return Err(CalendarError::range().with_enum(ErrorMessage::TimeOutOfRange));
        }
        Ok(Self::new_unchecked(hour, minute, second, nanosecond))
    }

    /// Returns the nanoseconds elapsed since midnight.
    #[must_use]
    pub const fn to_nanoseconds_of_day(&self) -> i128 {
        (self.hour as i128 * 3_600 + self.minute as i128 * 60 + self.second as i128)
            * utils::NS_PER_SECOND
            + self.nanosecond as i128
    }

    /// Creates a time from nanoseconds since midnight, in `0..NS_PER_DAY`.
    pub(crate) const fn from_nanoseconds_of_day(nanoseconds: i128) -> Self {
        let seconds = (nanoseconds / utils::NS_PER_SECOND) as u32;
        Self::new_unchecked(
            (seconds / 3_600) as u8,
            (seconds / 60 % 60) as u8,
            (seconds % 60) as u8,
            (nanoseconds % utils::NS_PER_SECOND) as u32,
        )
    }
}

impl Writeable for IsoTime {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.second, sink)?;
        if self.nanosecond == 0 {
            return Ok(());
        }
        sink.write_char('.')?;
        let mut value = self.nanosecond;
        let mut divisor = 100_000_000;
        while value != 0 {
            sink.write_char(char::from(b'0' + (value / divisor) as u8))?;
            value %= divisor;
            divisor /= 10;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        if self.nanosecond == 0 {
            return LengthHint::exact(8);
        }
        LengthHint::between(10, 18)
    }
}

impl_display_with_writeable!(IsoTime);

// ==== `IsoDateTime` section ====

/// `IsoDateTime` is the record of an `IsoDate` and an `IsoTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDateTime {
    pub date: IsoDate,
    pub time: IsoTime,
}

impl IsoDateTime {
    /// Creates a new `IsoDateTime` from already validated records.
    #[must_use]
    pub const fn new(date: IsoDate, time: IsoTime) -> Self {
        Self { date, time }
    }

    /// Creates a new `IsoDateTime` from its components.
    pub fn try_new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> CalendarResult<Self> {
        Ok(Self::new(
            IsoDate::try_new(year, month, day)?,
            IsoTime::try_new(hour, minute, second, 0)?,
        ))
    }

    /// Returns the nanoseconds of this wall-clock time as if it were UTC.
    #[must_use]
    pub const fn to_local_epoch_nanoseconds(&self) -> i128 {
        self.date.to_epoch_days() as i128 * utils::NS_PER_DAY + self.time.to_nanoseconds_of_day()
    }

    /// Returns the whole seconds of this wall-clock time as if it were UTC.
    #[must_use]
    pub const fn to_local_epoch_seconds(&self) -> i64 {
        self.to_local_epoch_nanoseconds()
            .div_euclid(utils::NS_PER_SECOND) as i64
    }

    /// Creates an `IsoDateTime` from local epoch nanoseconds.
    pub fn from_local_epoch_nanoseconds(nanoseconds: i128) -> CalendarResult<Self> {
        let days = nanoseconds.div_euclid(utils::NS_PER_DAY);
        let days = i64::try_from(days)
            .map_err(|_| CalendarError::range().with_enum(ErrorMessage::DateOutOfRange))?;
        let date = IsoDate::from_epoch_days(days)?;
        let time = IsoTime::from_nanoseconds_of_day(nanoseconds.rem_euclid(utils::NS_PER_DAY));
        Ok(Self::new(date, time))
    }
}

impl Writeable for IsoDateTime {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        self.date.write_to(sink)?;
        sink.write_char('T')?;
        self.time.write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.date.writeable_length_hint() + 1 + self.time.writeable_length_hint()
    }
}

impl_display_with_writeable!(IsoDateTime);

pub(crate) fn write_padded_u8<W: fmt::Write + ?Sized>(num: u8, sink: &mut W) -> fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

fn write_padded_year<W: fmt::Write + ?Sized>(year: i32, sink: &mut W) -> fmt::Result {
    let mut divisor = 1000;
    while divisor > 1 && year < divisor {
        sink.write_char('0')?;
        divisor /= 10;
    }
    year.write_to(sink)
}
