//! The calendar service contract.
//!
//! The enumerators in this crate never compute calendar arithmetic
//! themselves. Every boundary, count and label is queried from a
//! `CalendarProvider`, positioned by a `CalendarDateTime` cursor.

use crate::{
    calendar::CalendarDateTime, fields::PartialDateTime, instant::Instant, tz::TimeZone,
    CalendarResult,
};

/// The query and positioning surface of a calendar service.
///
/// Cursors are immutable: every positioning operation returns a new
/// `CalendarDateTime` and leaves its argument untouched.
pub trait CalendarProvider {
    /// The time zone this calendar resolves wall-clock times in.
    fn time_zone(&self) -> &TimeZone;

    // ==== Positioning ====

    /// Returns the cursor for an exact time.
    fn date_time_at(&self, instant: &Instant) -> CalendarResult<CalendarDateTime>;

    /// Returns `date_time` with the supplied fields replaced.
    ///
    /// Supplied fields are validated against the ranges derived from the
    /// merged coarser fields and rejected when out of range. Fields that are
    /// not supplied keep their current value, constrained into the new range.
    fn with(
        &self,
        date_time: &CalendarDateTime,
        partial: PartialDateTime,
    ) -> CalendarResult<CalendarDateTime>;

    /// Returns the start of the first day of the era `eras` eras away.
    fn add_eras(&self, date_time: &CalendarDateTime, eras: i32)
        -> CalendarResult<CalendarDateTime>;

    /// Returns `date_time` moved by whole years, keeping the wall-clock time.
    fn add_years(
        &self,
        date_time: &CalendarDateTime,
        years: i32,
    ) -> CalendarResult<CalendarDateTime>;

    /// Returns `date_time` moved by whole days, keeping the wall-clock time.
    fn add_days(&self, date_time: &CalendarDateTime, days: i64)
        -> CalendarResult<CalendarDateTime>;

    /// Returns `date_time` moved by exact hours.
    fn add_hours(
        &self,
        date_time: &CalendarDateTime,
        hours: i64,
    ) -> CalendarResult<CalendarDateTime>;

    // ==== Era queries ====

    fn first_era(&self, date_time: &CalendarDateTime) -> CalendarResult<u8>;

    fn last_era(&self, date_time: &CalendarDateTime) -> CalendarResult<u8>;

    /// Returns the display name of the cursor's era.
    fn era_as_string(&self, date_time: &CalendarDateTime) -> CalendarResult<String>;

    // ==== Year queries ====

    fn first_year_in_this_era(&self, date_time: &CalendarDateTime) -> CalendarResult<i32>;

    fn last_year_in_this_era(&self, date_time: &CalendarDateTime) -> CalendarResult<i32>;

    fn number_of_years_in_this_era(&self, date_time: &CalendarDateTime) -> CalendarResult<i32> {
        Ok(self.last_year_in_this_era(date_time)? - self.first_year_in_this_era(date_time)? + 1)
    }

    // ==== Month queries ====

    fn first_month_in_this_year(&self, date_time: &CalendarDateTime) -> CalendarResult<u8>;

    fn last_month_in_this_year(&self, date_time: &CalendarDateTime) -> CalendarResult<u8>;

    fn number_of_months_in_this_year(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        Ok(self.last_month_in_this_year(date_time)? - self.first_month_in_this_year(date_time)? + 1)
    }

    // ==== Day queries ====

    fn first_day_in_this_month(&self, date_time: &CalendarDateTime) -> CalendarResult<u8>;

    fn last_day_in_this_month(&self, date_time: &CalendarDateTime) -> CalendarResult<u8>;

    fn number_of_days_in_this_month(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        Ok(self.last_day_in_this_month(date_time)? - self.first_day_in_this_month(date_time)? + 1)
    }

    // ==== Period queries ====

    fn first_period_in_this_day(&self, date_time: &CalendarDateTime) -> CalendarResult<u8>;

    fn last_period_in_this_day(&self, date_time: &CalendarDateTime) -> CalendarResult<u8>;

    fn number_of_periods_in_this_day(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        Ok(self.last_period_in_this_day(date_time)? - self.first_period_in_this_day(date_time)? + 1)
    }

    // ==== Hour queries ====

    fn first_hour_in_this_period(&self, date_time: &CalendarDateTime) -> CalendarResult<u8>;

    fn last_hour_in_this_period(&self, date_time: &CalendarDateTime) -> CalendarResult<u8>;

    /// Returns the number of elapsed hours in the cursor's period.
    ///
    /// This differs from the clock's nominal hour count on days with a time
    /// zone transition.
    fn number_of_hours_in_this_period(&self, date_time: &CalendarDateTime)
        -> CalendarResult<i64>;

    /// Returns the cursor's clock hour, zero padded to at least `digits` digits.
    fn hour_as_padded_string(
        &self,
        date_time: &CalendarDateTime,
        digits: usize,
    ) -> CalendarResult<String> {
        Ok(format!("{:0digits$}", date_time.hour()))
    }
}
