//! Writes the calendar enumeration report to stdout.
//!
//! Usage: `calendar-report [calendar] [time-zone] [instant] [locale] [clock]`
//!
//! Every argument is optional; `-` keeps the default. Set `RUST_LOG=debug` to
//! follow the enumeration.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

use std::{env, io, str::FromStr};

use calendar_enum::{CalendarSystem, ClockType, Instant, Scenario, WriteSink};
use color_eyre::{eyre::WrapErr, Result};
use log::info;

/// Program entry point.
fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let scenario = scenario_from_args(&args)?;

    info!(
        "Enumerating the {} calendar and the days around {} in {}",
        scenario.era_calendar, scenario.transition, scenario.time_zone
    );
    scenario
        .run_to(&mut WriteSink(io::stdout().lock()))
        .wrap_err("failed to produce the calendar report")
}

/// Builds the scenario from the positional arguments.
fn scenario_from_args(args: &[String]) -> Result<Scenario> {
    let arg = |idx: usize| {
        args.get(idx)
            .map(String::as_str)
            .filter(|value| *value != "-")
    };

    let mut scenario = Scenario::default();
    if let Some(calendar) = arg(0) {
        let system = CalendarSystem::from_str(calendar)
            .wrap_err_with(|| format!("invalid calendar `{calendar}`"))?;
        scenario = scenario.with_era_calendar(system);
    }

    let time_zone = arg(1).map_or_else(|| scenario.time_zone.clone(), String::from);
    let transition = match arg(2) {
        Some(instant) => Instant::from_str(instant)
            .wrap_err_with(|| format!("invalid instant `{instant}`"))?,
        None => scenario.transition,
    };
    scenario = scenario.with_transition(&time_zone, transition);

    if let Some(locale) = arg(3) {
        scenario = scenario
            .with_locale_str(locale)
            .wrap_err_with(|| format!("invalid locale `{locale}`"))?;
    }
    if let Some(clock) = arg(4) {
        let clock =
            ClockType::from_str(clock).wrap_err_with(|| format!("invalid clock `{clock}`"))?;
        scenario = scenario.with_clock(clock);
    }

    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::scenario_from_args;
    use calendar_enum::{CalendarSystem, ClockType, Scenario};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn defaults() {
        assert_eq!(scenario_from_args(&[]).unwrap(), Scenario::default());
        assert_eq!(
            scenario_from_args(&args(&["-", "-", "-"])).unwrap(),
            Scenario::default()
        );
    }

    #[test]
    fn overrides() {
        let scenario = scenario_from_args(&args(&[
            "buddhist",
            "Europe/Berlin",
            "2012-10-28T01:00:00Z",
            "en-GB",
            "12",
        ]))
        .unwrap();
        assert_eq!(scenario.era_calendar, CalendarSystem::Buddhist);
        assert_eq!(scenario.time_zone, "Europe/Berlin");
        assert_eq!(scenario.transition.to_string(), "2012-10-28T01:00:00Z");
        assert_eq!(scenario.transition_clock, ClockType::TwelveHour);
    }

    #[test]
    fn invalid_arguments() {
        assert!(scenario_from_args(&args(&["hebrew"])).is_err());
        assert!(scenario_from_args(&args(&["-", "-", "yesterday"])).is_err());
        assert!(scenario_from_args(&args(&["-", "-", "-", "!!"])).is_err());
    }
}
