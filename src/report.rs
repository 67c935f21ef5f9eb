//! The report produced by the enumerators, and the sinks it is written to.
//!
//! A `Report` is an append-only sequence of typed `Segment`s. It is rendered
//! once, as a whole, through `Writeable`.

use core::fmt;
use std::io;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{CalendarError, CalendarResult};

/// The marker emitted for a year within an era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearMark {
    /// A year divisible by 1000; rendered as a line break.
    Millennium,
    /// A year divisible by 10 but not by 1000; rendered as `.`.
    Decade,
}

impl YearMark {
    /// Returns the marker for `year`, if any.
    #[must_use]
    pub const fn for_year(year: i32) -> Option<Self> {
        if year % 1000 == 0 {
            Some(Self::Millennium)
        } else if year % 10 == 0 {
            Some(Self::Decade)
        } else {
            None
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Millennium => "\n",
            Self::Decade => ".",
        }
    }
}

/// One piece of a `Report`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Free text, rendered verbatim.
    Text(String),
    /// `Era <name> contains <years> year(s)`, followed by a line break.
    EraSummary { name: String, years: i32 },
    YearMark(YearMark),
    /// `<date> contains <hours> hour(s)`, followed by a line break.
    DaySummary { date: String, hours: i64 },
    /// A padded hour label, followed by a space.
    Hour(String),
    LineBreak,
}

impl Writeable for Segment {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        match self {
            Self::Text(text) => sink.write_str(text),
            Self::EraSummary { name, years } => {
                writeln!(sink, "Era {name} contains {years} year(s)")
            }
            Self::YearMark(mark) => sink.write_str(mark.as_str()),
            Self::DaySummary { date, hours } => {
                writeln!(sink, "{date} contains {hours} hour(s)")
            }
            Self::Hour(hour) => {
                sink.write_str(hour)?;
                sink.write_char(' ')
            }
            Self::LineBreak => sink.write_char('\n'),
        }
    }

    fn writeable_length_hint(&self) -> LengthHint {
        match self {
            Self::Text(text) => LengthHint::exact(text.len()),
            Self::EraSummary { name, .. } => LengthHint::at_least(name.len() + 24),
            Self::YearMark(_) | Self::LineBreak => LengthHint::exact(1),
            Self::DaySummary { date, .. } => LengthHint::at_least(date.len() + 19),
            Self::Hour(hour) => LengthHint::exact(hour.len() + 1),
        }
    }
}

impl_display_with_writeable!(Segment);

/// An append-only buffer of report segments.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    segments: Vec<Segment>,
}

impl Report {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Extend<Segment> for Report {
    fn extend<T: IntoIterator<Item = Segment>>(&mut self, iter: T) {
        self.segments.extend(iter);
    }
}

impl Writeable for Report {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        self.segments
            .iter()
            .try_for_each(|segment| segment.write_to(sink))
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.segments
            .iter()
            .map(Writeable::writeable_length_hint)
            .sum()
    }
}

impl_display_with_writeable!(Report);

// ==== Sinks ====

/// A destination for a rendered `Report`.
pub trait ReportSink {
    fn write_report(&mut self, report: &Report) -> CalendarResult<()>;
}

impl ReportSink for String {
    fn write_report(&mut self, report: &Report) -> CalendarResult<()> {
        report
            .write_to(self)
            .map_err(|_| CalendarError::general("Failed to render report."))
    }
}

/// A `ReportSink` writing the rendered report to an `io::Write`.
#[derive(Debug)]
pub struct WriteSink<W: io::Write>(pub W);

impl<W: io::Write> ReportSink for WriteSink<W> {
    fn write_report(&mut self, report: &Report) -> CalendarResult<()> {
        let rendered = report.write_to_string();
        self.0
            .write_all(rendered.as_bytes())
            .and_then(|()| self.0.flush())
            .map_err(|_| CalendarError::general("Failed to write report."))
    }
}
