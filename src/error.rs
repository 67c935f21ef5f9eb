//! This module implements `CalendarError`.

use core::fmt;
use ixdtf::ParseError;

/// `CalendarError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// RangeError
    Range,
    /// SyntaxError
    Syntax,
    /// Assert
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Range => "RangeError",
            Self::Syntax => "SyntaxError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for `calendar_enum`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarError {
    kind: ErrorKind,
    msg: ErrorMessage,
}

impl CalendarError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: ErrorMessage::None,
        }
    }

    /// Create a generic error
    #[inline]
    #[must_use]
    pub fn general(msg: &'static str) -> Self {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a range error.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create a syntax error.
    #[inline]
    #[must_use]
    pub const fn syntax() -> Self {
        Self::new(ErrorKind::Syntax)
    }

    /// Creates an assertion error
    #[inline]
    #[must_use]
    #[cfg_attr(debug_assertions, track_caller)]
    pub(crate) const fn assert() -> Self {
        #[cfg(not(debug_assertions))]
        {
            Self::new(ErrorKind::Assert)
        }
        #[cfg(debug_assertions)]
        Self {
            kind: ErrorKind::Assert,
            msg: ErrorMessage::String(core::panic::Location::caller().file()),
        }
    }

    /// Add a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message(mut self, msg: &'static str) -> Self {
        self.msg = ErrorMessage::String(msg);
        self
    }

    /// Add a message enum to the error.
    #[inline]
    #[must_use]
    pub(crate) fn with_enum(mut self, msg: ErrorMessage) -> Self {
        self.msg = msg;
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> &'static str {
        self.msg.to_string()
    }
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.to_string();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        if let ErrorMessage::Ixdtf(error) = self.msg {
            write!(f, " ({error:?})")?;
        }

        Ok(())
    }
}

impl std::error::Error for CalendarError {}

impl From<ParseError> for CalendarError {
    fn from(error: ParseError) -> Self {
        CalendarError::syntax().with_enum(ErrorMessage::Ixdtf(error))
    }
}

/// The error message
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum ErrorMessage {
    // Range
    InstantOutOfRange,
    DateOutOfRange,
    DateTimeOutOfCalendarRange,
    EraOutOfRange,
    YearOutOfEraRange,
    MonthOutOfRange,
    DayOutOfRange,
    PeriodOutOfRange,
    HourOutOfRange,
    TimeOutOfRange,
    LocalTimeRejected,

    // Identifiers
    CalendarIdentifierInvalid,
    ClockIdentifierInvalid,
    DisambiguationInvalid,
    LocaleInvalid,
    TimeZoneIdentifierInvalid,
    TemplateInvalid,

    // Parsing
    ParserNeedsDate,
    FractionalTimeMoreThanNineDigits,

    // Time zone data
    TzifIllformed,
    TzifMissingDataBlock,

    // Typed
    None,
    String(&'static str),
    Ixdtf(ParseError),
}

impl ErrorMessage {
    pub fn to_string(self) -> &'static str {
        match self {
            Self::InstantOutOfRange => "Instant is not within the supported epoch range.",
            Self::DateOutOfRange => "Date is not within ISO date limits.",
            Self::DateTimeOutOfCalendarRange => {
                "Date-time is not within the range supported by the calendar."
            }
            Self::EraOutOfRange => "Era is not part of this calendar.",
            Self::YearOutOfEraRange => "Year is not within the era.",
            Self::MonthOutOfRange => "Month is not within the year.",
            Self::DayOutOfRange => "Day is not within the month.",
            Self::PeriodOutOfRange => "Period is not within the day.",
            Self::HourOutOfRange => "Hour is not within the period.",
            Self::TimeOutOfRange => "Minute, second or nanosecond is out of range.",
            Self::LocalTimeRejected => "Local time is ambiguous or skipped in this time zone.",
            Self::CalendarIdentifierInvalid => "Unsupported calendar identifier.",
            Self::ClockIdentifierInvalid => "Unsupported clock identifier.",
            Self::DisambiguationInvalid => "Invalid disambiguation option provided.",
            Self::LocaleInvalid => "Invalid locale identifier.",
            Self::TimeZoneIdentifierInvalid => "Time zone identifier does not exist.",
            Self::TemplateInvalid => "Unsupported date-time formatter template.",
            Self::ParserNeedsDate => "Could not find a valid DateRecord node during parsing.",
            Self::FractionalTimeMoreThanNineDigits => "Fractional time exceeds nine digits.",
            Self::TzifIllformed => "Illformed TZif data.",
            Self::TzifMissingDataBlock => "Only TZif V2+ is supported.",
            Self::None => "",
            Self::String(s) => s,
            Self::Ixdtf(_) => "Invalid RFC 9557 date-time string.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CalendarError, ErrorKind, ErrorMessage};

    #[test]
    fn display_includes_kind_and_message() {
        let err = CalendarError::range().with_enum(ErrorMessage::EraOutOfRange);
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(
            err.to_string(),
            "RangeError: Era is not part of this calendar."
        );

        let err = CalendarError::syntax();
        assert_eq!(err.to_string(), "SyntaxError");
    }
}
