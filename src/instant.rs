//! An absolute point in time, independent of calendar and time zone.

use core::{fmt, str::FromStr};

use ixdtf::{
    parsers::IxdtfParser,
    records::{UtcOffsetRecord, UtcOffsetRecordOrZ},
};
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    error::{CalendarError, ErrorMessage},
    iso::{IsoDate, IsoDateTime, IsoTime},
    utils, CalendarResult,
};

/// An exact time measured in nanoseconds since the Unix epoch.
///
/// The representable range covers 0001-01-01T00:00:00Z through
/// 9999-12-31T23:59:59.999999999Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i128);

const NS_MIN_INSTANT: i128 = IsoDate::MIN.to_epoch_days() as i128 * utils::NS_PER_DAY;
const NS_MAX_INSTANT: i128 = (IsoDate::MAX.to_epoch_days() as i128 + 1) * utils::NS_PER_DAY - 1;

impl Instant {
    pub(crate) const fn new_unchecked(epoch_nanoseconds: i128) -> Self {
        Self(epoch_nanoseconds)
    }

    /// Creates a new `Instant` from epoch nanoseconds.
    pub fn try_new(epoch_nanoseconds: i128) -> CalendarResult<Self> {
        if !(NS_MIN_INSTANT..=NS_MAX_INSTANT).contains(&epoch_nanoseconds) {
            return Err(CalendarError::range().with_enum(ErrorMessage::InstantOutOfRange));
        }
        Ok(Self(epoch_nanoseconds))
    }

    /// Creates a new `Instant` from epoch seconds.
    pub fn from_epoch_seconds(epoch_seconds: i64) -> CalendarResult<Self> {
        Self::try_new(i128::from(epoch_seconds) * utils::NS_PER_SECOND)
    }

    /// Creates the `Instant` at which the UTC wall clock reads `date_time`.
    pub fn from_utc_date_time(date_time: &IsoDateTime) -> CalendarResult<Self> {
        Self::try_new(date_time.to_local_epoch_nanoseconds())
    }

    /// Returns the epoch nanoseconds of this `Instant`.
    #[inline]
    #[must_use]
    pub const fn epoch_nanoseconds(&self) -> i128 {
        self.0
    }

    /// Returns the whole epoch seconds of this `Instant`, rounded toward negative infinity.
    #[inline]
    #[must_use]
    pub const fn epoch_seconds(&self) -> i64 {
        self.0.div_euclid(utils::NS_PER_SECOND) as i64
    }

    /// Returns this `Instant` moved by a number of nanoseconds.
    pub fn add_nanoseconds(&self, nanoseconds: i128) -> CalendarResult<Self> {
        let result = self
            .0
            .checked_add(nanoseconds)
            .ok_or(CalendarError::range().with_enum(ErrorMessage::InstantOutOfRange))?;
        Self::try_new(result)
    }

    /// Returns this `Instant` moved by a number of exact hours.
    pub fn add_hours(&self, hours: i64) -> CalendarResult<Self> {
        self.add_nanoseconds(i128::from(hours) * utils::NS_PER_HOUR)
    }

    /// Returns the wall-clock time at this `Instant` for a UTC offset in seconds.
    pub fn to_local_date_time(&self, offset_seconds: i64) -> CalendarResult<IsoDateTime> {
        IsoDateTime::from_local_epoch_nanoseconds(
            self.0 + i128::from(offset_seconds) * utils::NS_PER_SECOND,
        )
    }

    /// Returns the UTC wall-clock time at this `Instant`.
    pub fn to_utc_date_time(&self) -> CalendarResult<IsoDateTime> {
        self.to_local_date_time(0)
    }
}

impl FromStr for Instant {
    type Err = CalendarError;

    /// Parses an RFC 9557 string that carries a UTC offset or `Z`, for
    /// example `2012-11-04T09:00:00Z`. Time zone and calendar annotations
    /// are accepted and ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let record = IxdtfParser::from_str(s).parse()?;

        let date = record
            .date
            .ok_or(CalendarError::syntax().with_enum(ErrorMessage::ParserNeedsDate))?;
        let date = IsoDate::try_new(date.year, date.month, date.day)?;

        let time = match record.time {
            Some(time) => {
                let nanosecond = match time.fraction {
                    Some(fraction) => fraction.to_nanoseconds().ok_or(
                        CalendarError::syntax()
                            .with_enum(ErrorMessage::FractionalTimeMoreThanNineDigits),
                    )?,
                    None => 0,
                };
                // A leap second is constrained to the last second of the minute.
                IsoTime::try_new(time.hour, time.minute, time.second.min(59), nanosecond)?
            }
            None => IsoTime::MIDNIGHT,
        };

        let offset = match record.offset {
            Some(UtcOffsetRecordOrZ::Z) => 0,
            Some(UtcOffsetRecordOrZ::Offset(offset)) => offset_record_to_nanoseconds(&offset)?,
            None => {
                return Err(CalendarError::syntax()
                    .with_message("An instant string requires a UTC offset or Z designator."))
            }
        };

        let local = IsoDateTime::new(date, time).to_local_epoch_nanoseconds();
        Self::try_new(local - offset)
    }
}

fn offset_record_to_nanoseconds(offset: &UtcOffsetRecord) -> CalendarResult<i128> {
    let fraction = match offset.fraction() {
        Some(fraction) => fraction.to_nanoseconds().ok_or(
            CalendarError::syntax().with_enum(ErrorMessage::FractionalTimeMoreThanNineDigits),
        )?,
        None => 0,
    };
    let seconds = i128::from(offset.hour()) * 3_600
        + i128::from(offset.minute()) * 60
        + i128::from(offset.second().unwrap_or(0));
    let magnitude = seconds * utils::NS_PER_SECOND + i128::from(fraction);
    Ok(magnitude * i128::from(offset.sign() as i8))
}

impl Writeable for Instant {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        let date_time = IsoDateTime::from_local_epoch_nanoseconds(self.0).map_err(|_| fmt::Error)?;
        date_time.write_to(sink)?;
        sink.write_char('Z')
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::between(20, 30)
    }
}

impl_display_with_writeable!(Instant);
