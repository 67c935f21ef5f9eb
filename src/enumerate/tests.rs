use core::{cell::RefCell, str::FromStr};

use icu_locale::locale;

use super::{enumerate_eras, enumerate_transition_days, start_of_year};
use crate::{
    calendar::{Calendar, CalendarDateTime},
    error::ErrorKind,
    fields::PartialDateTime,
    format::{DateTimeFormatter, DateTimeTemplate},
    instant::Instant,
    options::{CalendarOptions, CalendarSystem, ClockType},
    provider::CalendarProvider,
    report::{Report, Segment},
    tz::{tests::pacific_2012, TimeZone},
    CalendarResult,
};

/// A provider delegating to a `Calendar` while recording the visited years
/// and optionally overriding some answers.
struct Recorder {
    inner: Calendar,
    visits: RefCell<Vec<(u8, i32)>>,
    hours: Option<i64>,
    stuck_hours: bool,
}

impl Recorder {
    fn new(inner: Calendar) -> Self {
        Self {
            inner,
            visits: RefCell::default(),
            hours: None,
            stuck_hours: false,
        }
    }
}

impl CalendarProvider for Recorder {
    fn time_zone(&self) -> &TimeZone {
        self.inner.time_zone()
    }

    fn date_time_at(&self, instant: &Instant) -> CalendarResult<CalendarDateTime> {
        self.inner.date_time_at(instant)
    }

    fn with(
        &self,
        date_time: &CalendarDateTime,
        partial: PartialDateTime,
    ) -> CalendarResult<CalendarDateTime> {
        self.inner.with(date_time, partial)
    }

    fn add_eras(&self, date_time: &CalendarDateTime, eras: i32) -> CalendarResult<CalendarDateTime> {
        self.inner.add_eras(date_time, eras)
    }

    fn add_years(&self, date_time: &CalendarDateTime, years: i32) -> CalendarResult<CalendarDateTime> {
        self.inner.add_years(date_time, years)
    }

    fn add_days(&self, date_time: &CalendarDateTime, days: i64) -> CalendarResult<CalendarDateTime> {
        self.inner.add_days(date_time, days)
    }

    fn add_hours(&self, date_time: &CalendarDateTime, hours: i64) -> CalendarResult<CalendarDateTime> {
        if self.stuck_hours {
            return Ok(*date_time);
        }
        self.inner.add_hours(date_time, hours)
    }

    fn first_era(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        self.inner.first_era(date_time)
    }

    fn last_era(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        self.inner.last_era(date_time)
    }

    fn era_as_string(&self, date_time: &CalendarDateTime) -> CalendarResult<String> {
        self.inner.era_as_string(date_time)
    }

    fn first_year_in_this_era(&self, date_time: &CalendarDateTime) -> CalendarResult<i32> {
        self.inner.first_year_in_this_era(date_time)
    }

    fn last_year_in_this_era(&self, date_time: &CalendarDateTime) -> CalendarResult<i32> {
        self.inner.last_year_in_this_era(date_time)
    }

    fn first_month_in_this_year(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        self.inner.first_month_in_this_year(date_time)
    }

    fn last_month_in_this_year(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        self.inner.last_month_in_this_year(date_time)
    }

    fn first_day_in_this_month(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        self.inner.first_day_in_this_month(date_time)
    }

    fn last_day_in_this_month(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        self.inner.last_day_in_this_month(date_time)
    }

    fn first_period_in_this_day(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        self.inner.first_period_in_this_day(date_time)
    }

    fn last_period_in_this_day(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        self.inner.last_period_in_this_day(date_time)
    }

    fn first_hour_in_this_period(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        self.visits
            .borrow_mut()
            .push((date_time.era(), date_time.year()));
        self.inner.first_hour_in_this_period(date_time)
    }

    fn last_hour_in_this_period(&self, date_time: &CalendarDateTime) -> CalendarResult<u8> {
        self.inner.last_hour_in_this_period(date_time)
    }

    fn number_of_hours_in_this_period(&self, date_time: &CalendarDateTime) -> CalendarResult<i64> {
        match self.hours {
            Some(hours) => Ok(hours),
            None => self.inner.number_of_hours_in_this_period(date_time),
        }
    }
}

fn calendar(system: CalendarSystem, clock: ClockType, time_zone: TimeZone) -> Calendar {
    let options = CalendarOptions::new(system)
        .with_clock(clock)
        .with_time_zone(time_zone);
    Calendar::try_new(options).unwrap()
}

fn cursor<P: CalendarProvider + ?Sized>(calendar: &P, s: &str) -> CalendarDateTime {
    calendar
        .date_time_at(&Instant::from_str(s).unwrap())
        .unwrap()
}

fn hour_line(labels: &[u8]) -> String {
    labels.iter().map(|hour| format!("{hour:02} ")).collect()
}

#[test]
fn japanese_eras() {
    let calendar = calendar(
        CalendarSystem::Japanese,
        ClockType::TwentyFourHour,
        TimeZone::utc(),
    );
    let origin = cursor(&calendar, "2012-11-04T09:00:00Z");
    let mut report = Report::new();
    enumerate_eras(&calendar, &origin, &mut report).unwrap();

    let summaries: Vec<&Segment> = report
        .segments()
        .iter()
        .filter(|segment| matches!(segment, Segment::EraSummary { .. }))
        .collect();
    assert_eq!(summaries.len(), 5);

    let rendered = report.to_string();
    assert!(rendered.starts_with(
        "Era Meiji contains 45 year(s)\n....\n\
         Era Taisho contains 15 year(s)\n.\n\
         Era Showa contains 64 year(s)\n......\n\
         Era Heisei contains 31 year(s)\n...\n\
         Era Reiwa contains 7981 year(s)\n"
    ));
    assert!(rendered.ends_with(".\n"));

    // Reiwa 10..7980 in steps of ten, less the seven millennium years.
    assert_eq!(rendered.matches('.').count(), 4 + 1 + 6 + 3 + 791);
    assert_eq!(rendered.matches('\n').count(), 5 + 5 + 7);
}

#[test]
fn eras_and_years_strictly_increase() {
    let recorder = Recorder::new(calendar(
        CalendarSystem::Japanese,
        ClockType::TwentyFourHour,
        TimeZone::utc(),
    ));
    let origin = cursor(&recorder, "1990-01-01T00:00:00Z");
    let mut report = Report::new();
    enumerate_eras(&recorder, &origin, &mut report).unwrap();

    let visits = recorder.visits.borrow();
    let expected: Vec<(u8, i32)> = [45, 15, 64, 31, 7981]
        .iter()
        .zip(1u8..)
        .flat_map(|(&years, era)| (1..=years).map(move |year| (era, year)))
        .collect();
    assert_eq!(*visits, expected);
}

#[test]
fn single_era_calendars() {
    let calendar = calendar(
        CalendarSystem::Buddhist,
        ClockType::TwentyFourHour,
        TimeZone::utc(),
    );
    let origin = cursor(&calendar, "2000-01-01T00:00:00Z");
    let mut report = Report::new();
    enumerate_eras(&calendar, &origin, &mut report).unwrap();
    let rendered = report.to_string();
    assert!(rendered.starts_with("Era B.E. contains 9999 year(s)\n"));
    // Millennium marks for 1000 through 10000.
    assert_eq!(rendered.matches('\n').count(), 1 + 1 + 10);
}

#[test]
fn start_of_year_is_midnight_on_both_clocks() {
    for clock in [ClockType::TwentyFourHour, ClockType::TwelveHour] {
        let calendar = calendar(CalendarSystem::Japanese, clock, pacific_2012());
        let origin = cursor(&calendar, "2012-11-04T23:45:30.5Z");
        let start = start_of_year(&calendar, &origin).unwrap();

        let local = start.iso_date_time();
        assert_eq!(local.date.to_string(), "2012-01-01");
        assert_eq!(local.time.to_string(), "00:00:00");
        assert_eq!(start.period(), 1);
        assert_eq!(start.hour(), calendar.first_hour_in_this_period(&start).unwrap());
        assert_eq!((start.minute(), start.second(), start.nanosecond()), (0, 0, 0));
    }

    // The first year of an era starts on the era's first day.
    let calendar = calendar(CalendarSystem::Japanese, ClockType::TwelveHour, TimeZone::utc());
    let origin = cursor(&calendar, "1989-06-15T13:00:00Z");
    let start = start_of_year(&calendar, &origin).unwrap();
    assert_eq!(start.iso_date().to_string(), "1989-01-08");
    assert_eq!((start.period(), start.hour()), (1, 12));
}

#[test]
fn derived_cursors_leave_the_original_untouched() {
    let calendar = calendar(
        CalendarSystem::Gregorian,
        ClockType::TwentyFourHour,
        pacific_2012(),
    );
    let original = cursor(&calendar, "2012-11-04T09:00:00Z");
    let snapshot = original;

    let shifted = calendar.add_days(&original, 1).unwrap();
    let moved = calendar.add_hours(&original, 5).unwrap();
    let changed = calendar
        .with(&original, PartialDateTime::new().with_hour(Some(0)))
        .unwrap();

    assert_eq!(original, snapshot);
    assert_ne!(shifted, original);
    assert_ne!(moved, original);
    assert_ne!(changed, original);
}

fn transition_report<P: CalendarProvider + ?Sized>(calendar: &P, at: &str) -> CalendarResult<Report> {
    let transition = cursor(calendar, at);
    let formatter = DateTimeFormatter::new(DateTimeTemplate::LongDate, locale!("en-US"));
    let mut report = Report::new();
    enumerate_transition_days(calendar, &transition, &formatter, &mut report)?;
    Ok(report)
}

fn fall_back_2012_expected() -> String {
    let regular: Vec<u8> = (0..24).chain([0]).collect();
    let fall_back: Vec<u8> = [0, 1].into_iter().chain(1..24).chain([0]).collect();
    format!(
        "Saturday, November 3, 2012 contains 24 hour(s)\n{}\n\
         Sunday, November 4, 2012 contains 25 hour(s)\n{}\n\
         Monday, November 5, 2012 contains 24 hour(s)\n{}\n",
        hour_line(&regular),
        hour_line(&fall_back),
        hour_line(&regular)
    )
}

#[test]
fn fall_back_transition_days() {
    let calendar = calendar(
        CalendarSystem::Gregorian,
        ClockType::TwentyFourHour,
        pacific_2012(),
    );
    let report = transition_report(&calendar, "2012-11-04T09:00:00Z").unwrap();
    assert_eq!(report.to_string(), fall_back_2012_expected());
}

#[cfg(feature = "tzdb")]
#[test]
fn fall_back_transition_days_los_angeles() {
    let time_zone = TimeZone::try_from_identifier("America/Los_Angeles").unwrap();
    let calendar = calendar(CalendarSystem::Gregorian, ClockType::TwentyFourHour, time_zone);
    let report = transition_report(&calendar, "2012-11-04T09:00:00Z").unwrap();
    assert_eq!(report.to_string(), fall_back_2012_expected());
}

#[test]
fn spring_forward_transition_days() {
    let calendar = calendar(
        CalendarSystem::Gregorian,
        ClockType::TwentyFourHour,
        pacific_2012(),
    );
    let report = transition_report(&calendar, "2012-03-11T10:00:00Z").unwrap();
    let hours: Vec<i64> = report
        .segments()
        .iter()
        .filter_map(|segment| match segment {
            Segment::DaySummary { hours, .. } => Some(*hours),
            _ => None,
        })
        .collect();
    assert_eq!(hours, [24, 23, 24]);

    let spring_forward: Vec<u8> = [0, 1].into_iter().chain(3..24).chain([0]).collect();
    assert!(report.to_string().contains(&format!(
        "Sunday, March 11, 2012 contains 23 hour(s)\n{}\n",
        hour_line(&spring_forward)
    )));
}

#[test]
fn reported_hour_counts_are_used_verbatim() {
    let mut recorder = Recorder::new(calendar(
        CalendarSystem::Gregorian,
        ClockType::TwentyFourHour,
        pacific_2012(),
    ));
    recorder.hours = Some(23);
    let report = transition_report(&recorder, "2012-11-04T09:00:00Z").unwrap();
    let rendered = report.to_string();
    assert_eq!(rendered.matches("contains 23 hour(s)").count(), 3);
    // The hours themselves are still walked through the service.
    assert!(rendered.contains("00 01 01 02 "));
}

#[test]
fn twelve_hour_transition_days() {
    let calendar = calendar(
        CalendarSystem::Gregorian,
        ClockType::TwelveHour,
        pacific_2012(),
    );
    let report = transition_report(&calendar, "2012-11-04T09:00:00Z").unwrap();
    let first_day: Vec<u8> = [12]
        .into_iter()
        .chain(1..12)
        .chain([12])
        .chain(1..12)
        .chain([12])
        .collect();
    assert!(report.to_string().starts_with(&format!(
        "Saturday, November 3, 2012 contains 12 hour(s)\n{}\n\
         Sunday, November 4, 2012 contains 13 hour(s)\n",
        hour_line(&first_day)
    )));
}

#[test]
fn day_range_crosses_month_end() {
    let calendar = calendar(
        CalendarSystem::Gregorian,
        ClockType::TwentyFourHour,
        TimeZone::utc(),
    );
    let report = transition_report(&calendar, "2012-03-31T12:00:00Z").unwrap();
    let dates: Vec<&str> = report
        .segments()
        .iter()
        .filter_map(|segment| match segment {
            Segment::DaySummary { date, .. } => Some(date.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        dates,
        [
            "Friday, March 30, 2012",
            "Saturday, March 31, 2012",
            "Sunday, April 1, 2012"
        ]
    );
}

#[test]
fn stuck_hours_fail_instead_of_looping() {
    let mut recorder = Recorder::new(calendar(
        CalendarSystem::Gregorian,
        ClockType::TwentyFourHour,
        TimeZone::utc(),
    ));
    recorder.stuck_hours = true;
    let err = transition_report(&recorder, "2012-11-04T09:00:00Z").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Assert);
}
