//! The era/year and transition-day enumerators.
//!
//! Both enumerators are written purely against `CalendarProvider`: every
//! boundary (first and last era, year, month, day, period and hour) is
//! queried from the service at the cursor's current position, so irregular
//! era lengths and days that are not 24 hours long need no special casing.

use crate::{
    calendar::CalendarDateTime,
    calendar_assert,
    fields::PartialDateTime,
    format::DateTimeFormatter,
    provider::CalendarProvider,
    report::{Report, Segment, YearMark},
    CalendarResult,
};

/// Enumerates every era of `calendar` and every year within each era.
///
/// For each era an `Era <name> contains <N> year(s)` line is recorded,
/// followed by one year mark per decade or millennium year and a line break.
/// `origin` is any cursor within the calendar's supported range.
pub fn enumerate_eras<P: CalendarProvider + ?Sized>(
    calendar: &P,
    origin: &CalendarDateTime,
    report: &mut Report,
) -> CalendarResult<()> {
    let first_era = calendar.first_era(origin)?;
    let mut cursor = calendar.with(origin, PartialDateTime::new().with_era(Some(first_era)))?;

    loop {
        let era = cursor.era();
        let last_era = calendar.last_era(&cursor)?;
        let name = calendar.era_as_string(&cursor)?;
        let years = calendar.number_of_years_in_this_era(&cursor)?;

        #[cfg(feature = "log")]
        log::debug!("Enumerating era {era} ({name}): {years} year(s)");
        report.push(Segment::EraSummary { name, years });

        let first_year = calendar.first_year_in_this_era(&cursor)?;
        let last_year = calendar.last_year_in_this_era(&cursor)?;
        cursor = calendar.with(
            &cursor,
            PartialDateTime::new().with_era_year(Some(first_year)),
        )?;

        loop {
            cursor = start_of_year(calendar, &cursor)?;
            let year = cursor.year();

            #[cfg(feature = "log")]
            log::trace!("Visiting year {year} of era {era} at {cursor}");
            if let Some(mark) = YearMark::for_year(year) {
                report.push(Segment::YearMark(mark));
            }

            if year == last_year {
                break;
            }
            let next = calendar.add_years(&cursor, 1)?;
            calendar_assert!(
                next.era() == era && next.year() == year + 1 && next.year() <= last_year,
                "Year {} of era {} does not follow year {year}",
                next.year(),
                next.era()
            );
            cursor = next;
        }
        report.push(Segment::LineBreak);

        if era == last_era {
            break;
        }
        let next = calendar.add_eras(&cursor, 1)?;
        calendar_assert!(
            next.era() > era && next.era() <= last_era,
            "Era {} does not follow era {era}",
            next.era()
        );
        cursor = next;
    }

    Ok(())
}

/// Moves `cursor` to the first month, first day and first hour of its year.
///
/// The month is set before the day is queried, since the valid days depend
/// on the month.
fn start_of_year<P: CalendarProvider + ?Sized>(
    calendar: &P,
    cursor: &CalendarDateTime,
) -> CalendarResult<CalendarDateTime> {
    let month = calendar.first_month_in_this_year(cursor)?;
    let cursor = calendar.with(cursor, PartialDateTime::new().with_month(Some(month)))?;

    let day = calendar.first_day_in_this_month(&cursor)?;
    let period = calendar.first_period_in_this_day(&cursor)?;
    let cursor = calendar.with(
        &cursor,
        PartialDateTime::new()
            .with_day(Some(day))
            .with_period(Some(period)),
    )?;

    let hour = calendar.first_hour_in_this_period(&cursor)?;
    calendar.with(
        &cursor,
        PartialDateTime::new()
            .with_hour(Some(hour))
            .with_zeroed_time(),
    )
}

/// Enumerates the day before, the day of and the day after `transition`.
///
/// For each day a `<long date> contains <N> hour(s)` line is recorded, where
/// N is the service's hour count for the day's first period, followed by
/// every hour label from the first hour of the day up to and including the
/// first hour of the following day.
pub fn enumerate_transition_days<P: CalendarProvider + ?Sized>(
    calendar: &P,
    transition: &CalendarDateTime,
    formatter: &DateTimeFormatter,
    report: &mut Report,
) -> CalendarResult<()> {
    let mut current = calendar.add_days(transition, -1)?;
    let end = calendar.add_days(transition, 1)?;

    while current.iso_date() <= end.iso_date() {
        let date = formatter.format(&current.instant(), calendar.time_zone())?;
        let hours = calendar.number_of_hours_in_this_period(&current)?;

        #[cfg(feature = "log")]
        log::debug!("Enumerating {date}: {hours} hour(s)");
        report.push(Segment::DaySummary {
            date: date.to_string(),
            hours,
        });

        let next_day = calendar.add_days(&current, 1)?;
        let limit = next_day.instant().add_hours(24)?;
        let first_hour = calendar.first_hour_in_this_period(&current)?;
        current = calendar.with(
            &current,
            PartialDateTime::new().with_hour(Some(first_hour)),
        )?;

        loop {
            report.push(Segment::Hour(calendar.hour_as_padded_string(&current, 2)?));
            if current.iso_date() == next_day.iso_date() && current.period() == next_day.period() {
                break;
            }
            let next = calendar.add_hours(&current, 1)?;
            calendar_assert!(
                next.instant() > current.instant() && next.instant() < limit,
                "Hour {} does not lead to the day after {}",
                next,
                current
            );
            current = next;
        }
        report.push(Segment::LineBreak);
    }

    Ok(())
}

#[cfg(test)]
mod tests;
