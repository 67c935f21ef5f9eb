//! The sample enumeration scenario.
//!
//! A `Scenario` assembles the complete report: an introduction and the era
//! enumeration of one calendar, then an introduction and the transition-day
//! enumeration of another calendar in a named time zone.

use core::str::FromStr;
use std::sync::Arc;

use icu_locale::Locale;

use crate::{
    calendar::Calendar,
    error::{CalendarError, ErrorMessage},
    enumerate::{enumerate_eras, enumerate_transition_days},
    format::{DateTimeFormatter, DateTimeTemplate},
    instant::Instant,
    options::{CalendarOptions, CalendarSystem, ClockType},
    provider::CalendarProvider,
    report::{Report, ReportSink, Segment},
    tz::{TimeZone, TimeZoneProvider},
    utils, CalendarResult,
};

const JAPANESE_ERA_INTRO: &str = "The number of years in each era of the Japanese era calendar is not regular. \
    It is determined by the length of the given imperial era:\n";

const FALL_BACK_INTRO: &str = "The number of hours in a day is not constant. \
    The US calendar transitions from daylight saving time to standard time on 4 November 2012:\n\n";

/// 2012-11-04T09:00:00Z, when daylight saving time ends in Los Angeles.
const FALL_BACK_2012: Instant = Instant::new_unchecked(1_352_019_600 * utils::NS_PER_SECOND);

/// The configuration of one enumeration run.
///
/// The default is the Japanese era calendar followed by the end of daylight
/// saving time in Los Angeles on 4 November 2012, both in `en-US` with a
/// 24-hour clock.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub era_calendar: CalendarSystem,
    pub era_clock: ClockType,
    pub era_intro: String,
    pub locale: Locale,
    pub transition_calendar: CalendarSystem,
    pub transition_clock: ClockType,
    /// A time zone identifier or UTC offset.
    pub time_zone: String,
    /// The transition instant. It also positions the era enumeration.
    pub transition: Instant,
    pub transition_intro: String,
    pub template: DateTimeTemplate,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            era_calendar: CalendarSystem::Japanese,
            era_clock: ClockType::TwentyFourHour,
            era_intro: JAPANESE_ERA_INTRO.into(),
            locale: icu_locale::locale!("en-US"),
            transition_calendar: CalendarSystem::Gregorian,
            transition_clock: ClockType::TwentyFourHour,
            time_zone: "America/Los_Angeles".into(),
            transition: FALL_BACK_2012,
            transition_intro: FALL_BACK_INTRO.into(),
            template: DateTimeTemplate::LongDate,
        }
    }
}

impl Scenario {
    /// Sets the calendar whose eras are enumerated.
    ///
    /// Calendars other than the Japanese calendar get a generic introduction.
    #[must_use]
    pub fn with_era_calendar(mut self, system: CalendarSystem) -> Self {
        self.era_intro = match system {
            CalendarSystem::Japanese => JAPANESE_ERA_INTRO.into(),
            _ => format!("The eras of the {system} calendar and the years they contain:\n"),
        };
        self.era_calendar = system;
        self
    }

    /// Sets the time zone and transition instant of the day enumeration.
    #[must_use]
    pub fn with_transition(mut self, time_zone: &str, transition: Instant) -> Self {
        if time_zone != self.time_zone || transition != self.transition {
            self.transition_intro = format!(
                "The number of hours in a day is not constant. \
                 The days around {transition} in {time_zone}:\n\n"
            );
        }
        self.time_zone = time_zone.into();
        self.transition = transition;
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

    /// Sets the clock of both calendars.
    #[must_use]
    pub fn with_clock(mut self, clock: ClockType) -> Self {
        self.era_clock = clock;
        self.transition_clock = clock;
        self
    }

    /// Runs the scenario, resolving the time zone with `TimeZone::from_str`.
    pub fn run(&self) -> CalendarResult<Report> {
        let time_zone = TimeZone::from_str(&self.time_zone)?;
        self.run_in(time_zone)
    }

    /// Runs the scenario, resolving the time zone against `provider`.
    pub fn run_with_provider(
        &self,
        provider: Arc<dyn TimeZoneProvider + Send + Sync>,
    ) -> CalendarResult<Report> {
        let time_zone = TimeZone::try_from_identifier_with_provider(&self.time_zone, provider)?;
        self.run_in(time_zone)
    }

    /// Runs the scenario and writes the report to `sink`.
    pub fn run_to<S: ReportSink + ?Sized>(&self, sink: &mut S) -> CalendarResult<()> {
        sink.write_report(&self.run()?)
    }

    fn run_in(&self, time_zone: TimeZone) -> CalendarResult<Report> {
        let mut report = Report::new();

        let era_calendar = Calendar::try_new(
            CalendarOptions::new(self.era_calendar)
                .with_clock(self.era_clock)
                .with_locale(self.locale.clone()),
        )?;
        let origin = era_calendar.date_time_at(&self.transition)?;
        report.push(Segment::Text(self.era_intro.clone()));
        enumerate_eras(&era_calendar, &origin, &mut report)?;
        report.push(Segment::LineBreak);

        let transition_calendar = Calendar::try_new(
            CalendarOptions::new(self.transition_calendar)
                .with_clock(self.transition_clock)
                .with_locale(self.locale.clone())
                .with_time_zone(time_zone),
        )?;
        let transition = transition_calendar.date_time_at(&self.transition)?;
        let formatter = DateTimeFormatter::new(self.template, self.locale.clone());
        report.push(Segment::Text(self.transition_intro.clone()));
        enumerate_transition_days(&transition_calendar, &transition, &formatter, &mut report)?;

        Ok(report)
    }
}
