//! The `calendar_enum` crate walks the structure of calendar systems and
//! time zones through an abstract calendar service.
//!
//! Two enumerations are provided:
//!
//! - [`enumerate_eras`] visits every era of a calendar system from the first
//!   to the last, and every year within each era, recording era names, year
//!   counts and decade/millennium markers.
//! - [`enumerate_transition_days`] visits the day before, the day of and the
//!   day after a daylight saving transition, recording how many hours each of
//!   those days contains and listing every hour.
//!
//! Both are written against the [`CalendarProvider`] trait. The crate ships a
//! concrete [`Calendar`] implementation backed by ICU4X era data and, with the
//! `tzdb` feature, IANA time zone data.
//!
//! ```rust
//! use calendar_enum::{
//!     Calendar, CalendarOptions, CalendarProvider, CalendarSystem, Instant, Report,
//! };
//!
//! let options = CalendarOptions::new(CalendarSystem::Japanese);
//! let calendar = Calendar::try_new(options).unwrap();
//! let now: Instant = "2012-11-04T09:00:00Z".parse().unwrap();
//! let origin = calendar.date_time_at(&now).unwrap();
//!
//! let mut report = Report::new();
//! calendar_enum::enumerate_eras(&calendar, &origin, &mut report).unwrap();
//! assert!(report.to_string().starts_with("Era Meiji contains 45 year(s)\n"));
//! ```
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::cognitive_complexity,
    clippy::missing_errors_doc,
    clippy::let_unit_value,
    clippy::option_if_let_else,

    // It may be worth to look if we can fix the issues highlighted by these lints.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
)]

pub mod calendar;
pub mod enumerate;
pub mod error;
pub mod fields;
pub mod format;
pub mod instant;
pub mod iso;
pub mod options;
pub mod provider;
pub mod report;
pub mod scenario;
pub mod tz;

#[cfg(feature = "tzdb")]
pub mod tzdb;

#[doc(hidden)]
pub(crate) mod utils;

/// Re-export of `TinyAsciiStr` from `tinystr`.
pub use tinystr::TinyAsciiStr;

#[doc(inline)]
pub use error::CalendarError;

/// The `calendar_enum` result type
pub type CalendarResult<T> = Result<T, CalendarError>;

pub use crate::{
    calendar::{Calendar, CalendarDateTime},
    enumerate::{enumerate_eras, enumerate_transition_days},
    fields::{DateTimeFields, PartialDateTime},
    format::{DateTimeFormatter, DateTimeTemplate, FormattedDateTime},
    instant::Instant,
    iso::{IsoDate, IsoDateTime, IsoTime},
    options::{CalendarOptions, CalendarSystem, ClockType, Disambiguation},
    provider::CalendarProvider,
    report::{Report, ReportSink, Segment, WriteSink, YearMark},
    scenario::Scenario,
    tz::{TimeZone, TimeZoneProvider, UtcOffset},
};

#[cfg(feature = "tzdb")]
pub use crate::tzdb::TzdbProvider;

/// A library specific trait for unwrapping assertions.
pub(crate) trait CalendarUnwrap {
    type Output;

    /// `calendar_enum` based assertion for unwrapping. This will panic in
    /// debug builds, but throws error during runtime.
    fn calendar_unwrap(self) -> CalendarResult<Self::Output>;
}

impl<T> CalendarUnwrap for Option<T> {
    type Output = T;

    #[track_caller]
    fn calendar_unwrap(self) -> CalendarResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(CalendarError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! calendar_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::CalendarError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::CalendarError::assert());
        }
    };
}
