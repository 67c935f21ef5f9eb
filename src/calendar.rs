//! This module implements `Calendar` and the `CalendarDateTime` cursor.
//!
//! `Calendar` is the concrete calendar service of this crate. It combines a
//! calendar system's eras (discovered through ICU4X), a clock type, a time
//! zone and a locale, and implements `CalendarProvider` on top of them.

use core::fmt;
use std::sync::Arc;

use icu_locale::Locale;
use tinystr::TinyAsciiStr;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    error::{CalendarError, ErrorMessage},
    fields::{DateTimeFields, PartialDateTime},
    instant::Instant,
    iso::{IsoDate, IsoDateTime, IsoTime},
    options::{CalendarOptions, CalendarSystem, ClockType, Disambiguation},
    provider::CalendarProvider,
    tz::{TimeZone, UtcOffset},
    utils, CalendarResult, CalendarUnwrap,
};

mod eras;
mod names;

use eras::EraInfo;

// ==== CalendarDateTime ====

/// A position in a calendar: an exact time together with its calendar
/// fields in a `Calendar`'s system, clock and time zone.
///
/// A `CalendarDateTime` is an immutable value. It is created and moved by a
/// `CalendarProvider`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDateTime {
    fields: DateTimeFields,
    iso: IsoDateTime,
    offset_seconds: i64,
    instant: Instant,
}

impl CalendarDateTime {
    /// Returns the one-based ordinal of the era.
    #[inline]
    #[must_use]
    pub const fn era(&self) -> u8 {
        self.fields.era
    }

    #[inline]
    #[must_use]
    pub const fn era_code(&self) -> TinyAsciiStr<16> {
        self.fields.era_code
    }

    /// Returns the year within the era.
    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.fields.era_year
    }

    #[inline]
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.fields.month
    }

    #[inline]
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.fields.day
    }

    /// Returns the one-based period of the day.
    #[inline]
    #[must_use]
    pub const fn period(&self) -> u8 {
        self.fields.period
    }

    /// Returns the hour as shown on the calendar's clock.
    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.fields.hour
    }

    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.fields.minute
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.fields.second
    }

    #[inline]
    #[must_use]
    pub const fn nanosecond(&self) -> u32 {
        self.fields.nanosecond
    }

    /// Returns the calendar fields of this cursor.
    #[inline]
    #[must_use]
    pub const fn fields(&self) -> &DateTimeFields {
        &self.fields
    }

    /// Returns the ISO wall-clock time of this cursor.
    #[inline]
    #[must_use]
    pub const fn iso_date_time(&self) -> IsoDateTime {
        self.iso
    }

    /// Returns the ISO date of this cursor.
    #[inline]
    #[must_use]
    pub const fn iso_date(&self) -> IsoDate {
        self.iso.date
    }

    /// Returns the UTC offset in seconds in effect at this cursor.
    #[inline]
    #[must_use]
    pub const fn offset_seconds(&self) -> i64 {
        self.offset_seconds
    }

    #[inline]
    #[must_use]
    pub const fn instant(&self) -> Instant {
        self.instant
    }
}

impl Writeable for CalendarDateTime {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        self.iso.write_to(sink)?;
        UtcOffset::from_seconds(self.offset_seconds)
            .map_err(|_| fmt::Error)?
            .write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.iso.writeable_length_hint() + LengthHint::between(6, 9)
    }
}

impl_display_with_writeable!(CalendarDateTime);

// ==== Calendar ====

/// A calendar service over one calendar system, clock, time zone and locale.
///
/// `Calendar` is cheap to clone: clones share the discovered era table.
#[derive(Debug, Clone)]
pub struct Calendar {
    inner: Arc<CalendarInner>,
}

#[derive(Debug)]
struct CalendarInner {
    system: CalendarSystem,
    clock: ClockType,
    time_zone: TimeZone,
    locale: Locale,
    disambiguation: Disambiguation,
    eras: Vec<EraInfo>,
}

impl Calendar {
    /// Creates a new `Calendar` from `options`, discovering the eras of its system.
    pub fn try_new(options: CalendarOptions) -> CalendarResult<Self> {
        let CalendarOptions {
            system,
            clock,
            time_zone,
            locale,
            disambiguation,
        } = options;
        let eras = eras::discover_eras(system)?;

        #[cfg(feature = "log")]
        log::debug!(
            "Created {system} calendar with {} era(s), {clock}-hour clock, locale {locale}",
            eras.len()
        );

        Ok(Self {
            inner: Arc::new(CalendarInner {
                system,
                clock,
                time_zone: time_zone.unwrap_or_default(),
                locale,
                disambiguation,
                eras,
            }),
        })
    }

    #[inline]
    #[must_use]
    pub fn system(&self) -> CalendarSystem {
        self.inner.system
    }

    #[inline]
    #[must_use]
    pub fn clock(&self) -> ClockType {
        self.inner.clock
    }

    #[inline]
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.inner.locale
    }

    #[inline]
    #[must_use]
    pub fn disambiguation(&self) -> Disambiguation {
        self.inner.disambiguation
    }

    /// Returns the era codes of this calendar, in chronological order.
    pub fn era_codes(&self) -> impl Iterator<Item = TinyAsciiStr<16>> + '_ {
        self.inner.eras.iter().map(|era| era.code)
    }

    /// Returns the cursor at which the wall clock of this calendar reads `local`.
    pub fn date_time_for(&self, local: &IsoDateTime) -> CalendarResult<CalendarDateTime> {
        let instant = self
            .inner
            .time_zone
            .instant_for(local, self.inner.disambiguation)?;
        self.date_time_at(&instant)
    }

    fn era_info(&self, era: u8) -> CalendarResult<&EraInfo> {
        era.checked_sub(1)
            .and_then(|idx| self.inner.eras.get(usize::from(idx)))
            .ok_or(CalendarError::range().with_enum(ErrorMessage::EraOutOfRange))
    }

    /// Returns the one-based ordinal of the era containing `date`.
    fn era_ordinal_for(&self, date: IsoDate) -> CalendarResult<u8> {
        let idx = self.inner.eras.partition_point(|era| era.start <= date);
        match idx.checked_sub(1).and_then(|i| self.inner.eras.get(i)) {
            Some(era) if era.contains(date) => Ok(idx as u8),
            _ => Err(CalendarError::range().with_enum(ErrorMessage::DateTimeOutOfCalendarRange)),
        }
    }
}

/// Returns `supplied` when it lies within `min..=max`, or `current`
/// constrained into that range when nothing is supplied.
fn resolve_field<T: Ord + Copy>(
    supplied: Option<T>,
    current: T,
    (min, max): (T, T),
    message: ErrorMessage,
) -> CalendarResult<T> {
    match supplied {
        Some(value) if (min..=max).contains(&value) => Ok(value),
        Some(_) => Err(CalendarError::range().with_enum(message)),
        None => Ok(current.clamp(min, max)),
    }
}

impl CalendarProvider for Calendar {
    fn time_zone(&self) -> &TimeZone {
        &self.inner.time_zone
    }

    fn date_time_at(&self, instant: &Instant) -> CalendarResult<CalendarDateTime> {
        let (iso, offset_seconds) = self.inner.time_zone.to_local_date_time(instant)?;
        let era = self.era_ordinal_for(iso.date)?;
        let info = self.era_info(era)?;
        let (period, hour) = self.inner.clock.split_hour(iso.time.hour);

        Ok(CalendarDateTime {
            fields: DateTimeFields {
                era,
                era_code: info.code,
                era_year: info.era_year_for(iso.date.year),
                month: iso.date.month,
                day: iso.date.day,
                period,
                hour,
                minute: iso.time.minute,
                second: iso.time.second,
                nanosecond: iso.time.nanosecond,
            },
            iso,
            offset_seconds,
            instant: *instant,
        })
    }

    fn with(
        &self,
        date_time: &CalendarDateTime,
        partial: PartialDateTime,
    ) -> CalendarResult<CalendarDateTime> {
        let current = date_time.fields();
        let clock = self.inner.clock;

        let era = partial.era.unwrap_or(current.era);
        let info = self.era_info(era)?;
        let era_year = resolve_field(
            partial.era_year,
            current.era_year,
            (info.first_year, info.last_year()),
            ErrorMessage::YearOutOfEraRange,
        )?;
        let month = resolve_field(
            partial.month,
            current.month,
            info.month_range(era_year),
            ErrorMessage::MonthOutOfRange,
        )?;
        let day = resolve_field(
            partial.day,
            current.day,
            info.day_range(era_year, month),
            ErrorMessage::DayOutOfRange,
        )?;
        let period = resolve_field(
            partial.period,
            current.period,
            (1, clock.periods_in_day()),
            ErrorMessage::PeriodOutOfRange,
        )?;
        let hour = resolve_field(
            partial.hour,
            current.hour,
            clock.hour_range(),
            ErrorMessage::HourOutOfRange,
        )?;
        let minute = resolve_field(
            partial.minute,
            current.minute,
            (0, 59),
            ErrorMessage::TimeOutOfRange,
        )?;
        let second = resolve_field(
            partial.second,
            current.second,
            (0, 59),
            ErrorMessage::TimeOutOfRange,
        )?;
        let nanosecond = resolve_field(
            partial.nanosecond,
            current.nanosecond,
            (0, 999_999_999),
            ErrorMessage::TimeOutOfRange,
        )?;

        let date = IsoDate::try_new(info.iso_year_for(era_year), month, day)?;
        let time = IsoTime::try_new(clock.join_hour(period, hour)?, minute, second, nanosecond)?;
        self.date_time_for(&IsoDateTime::new(date, time))
    }

    fn add_eras(
        &self,
        date_time: &CalendarDateTime,
        eras: i32,
    ) -> CalendarResult<CalendarDateTime> {
        let target = i32::from(date_time.era()) + eras;
        let era = u8::try_from(target)
            .map_err(|_| CalendarError::range().with_enum(ErrorMessage::EraOutOfRange))?;
        let info = self.era_info(era)?;
        self.date_time_for(&IsoDateTime::new(info.start, IsoTime::MIDNIGHT))
    }

    fn add_years(
        &self,
        date_time: &CalendarDateTime,
        years: i32,
    ) -> CalendarResult<CalendarDateTime> {
        let date = date_time.iso.date.add_years(years)?;
        self.date_time_for(&IsoDateTime::new(date, date_time.iso.time))
    }

    fn add_days(
        &self,
        date_time: &CalendarDateTime,
        days: i64,
    ) -> CalendarResult<CalendarDateTime> {
        let date = date_time.iso.date.add_days(days)?;
        self.date_time_for(&IsoDateTime::new(date, date_time.iso.time))
    }

    fn add_hours(
        &self,
        date_time: &CalendarDateTime,
        hours: i64,
    ) -> CalendarResult<CalendarDateTime> {
        self.date_time_at(&date_time.instant.add_hours(hours)?)
    }

    fn first_era(&self, _: &CalendarDateTime) -> CalendarResult<u8> {
        Ok(1)
    }

    fn last_era(&self, _: &CalendarDateTime) -> CalendarResult<u8> {
        Ok(self.inner.eras.len() as u8)
    }

    fn era_as_string(&self, date_time: &CalendarDateTime) -> CalendarResult<String> {
        let info = self.era_info(date_time.era())?;
        Ok(names::era_display_name(info.code.as_str(), &self.inner.locale))
    }

    fn first_year_in_this_era(&self, date_time: &CalendarDateTime) -> CalendarResult<i32> {
        Ok(self.era_info(date_time.era())?.first_year)
    }

    fn last_year_in_this_era(&self, date_time: &CalendarDateTime) -> CalendarResult<i32> {
        Ok(self.era_info(date_time.era())?.last_year())
    }

    fn first_month_in_this_year(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        Ok(self.era_info(date_time.era())?.month_range(date_time.year()).0)
    }

    fn last_month_in_this_year(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        Ok(self.era_info(date_time.era())?.month_range(date_time.year()).1)
    }

    fn first_day_in_this_month(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        let info = self.era_info(date_time.era())?;
        Ok(info.day_range(date_time.year(), date_time.month()).0)
    }

    fn last_day_in_this_month(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        let info = self.era_info(date_time.era())?;
        Ok(info.day_range(date_time.year(), date_time.month()).1)
    }

    fn first_period_in_this_day(&self, _: &CalendarDateTime) -> CalendarResult<u8> {
        Ok(1)
    }

    fn last_period_in_this_day(&self, _: &CalendarDateTime) -> CalendarResult<u8> {
        Ok(self.inner.clock.periods_in_day())
    }

    fn first_hour_in_this_period(&self, _: &CalendarDateTime) -> CalendarResult<u8> {
        Ok(self.inner.clock.first_hour())
    }

    fn last_hour_in_this_period(&self, _: &CalendarDateTime) -> CalendarResult<u8> {
        Ok(self.inner.clock.last_hour())
    }

    fn number_of_hours_in_this_period(&self, date_time: &CalendarDateTime) -> CalendarResult<i64> {
        let clock = self.inner.clock;
        let nominal_hours = 24 / i128::from(clock.periods_in_day());
        let start_hour = clock.join_hour(date_time.period(), clock.first_hour())?;

        let start_local =
            IsoDateTime::new(date_time.iso.date, IsoTime::new_unchecked(start_hour, 0, 0, 0));
        let end_local = IsoDateTime::from_local_epoch_nanoseconds(
            start_local.to_local_epoch_nanoseconds() + nominal_hours * utils::NS_PER_HOUR,
        )?;

        // Boundaries that fall in a gap resolve forward.
        let tz = &self.inner.time_zone;
        let start = tz.instant_for(&start_local, Disambiguation::Compatible)?;
        let end = tz.instant_for(&end_local, Disambiguation::Compatible)?;
        let hours = (end.epoch_nanoseconds() - start.epoch_nanoseconds()) / utils::NS_PER_HOUR;
        i64::try_from(hours).ok().calendar_unwrap()
    }
}
