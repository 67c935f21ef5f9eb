//! This module implements `TimeZone` and the `TimeZoneProvider` trait.

use core::{fmt, iter::Peekable, str::Chars, str::FromStr};
use std::sync::Arc;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    error::{CalendarError, ErrorMessage},
    instant::Instant,
    iso::{write_padded_u8, IsoDateTime},
    options::Disambiguation,
    utils, CalendarResult,
};

#[cfg(feature = "tzdb")]
use crate::tzdb::TzdbProvider;
#[cfg(feature = "tzdb")]
use std::sync::LazyLock;

/// The shared provider used by `TimeZone::try_from_identifier`.
#[cfg(feature = "tzdb")]
pub static TZ_PROVIDER: LazyLock<Arc<TzdbProvider>> =
    LazyLock::new(|| Arc::new(TzdbProvider::default()));

/// A source of time zone rules for named time zones.
pub trait TimeZoneProvider {
    /// Returns whether `identifier` names a time zone known to this provider.
    fn check_identifier(&self, identifier: &str) -> bool;

    /// Returns the identifier under which `identifier` is stored.
    fn normalize_identifier(&self, identifier: &str) -> CalendarResult<String> {
        if !self.check_identifier(identifier) {
            return Err(CalendarError::range().with_enum(ErrorMessage::TimeZoneIdentifierInvalid));
        }
        Ok(identifier.into())
    }

    /// Returns the UTC offset in seconds in effect at `epoch_seconds`.
    fn get_named_tz_offset_seconds(&self, identifier: &str, epoch_seconds: i64)
        -> CalendarResult<i64>;

    /// Returns the epoch seconds at which the wall clock reads `local_seconds`.
    ///
    /// The result holds zero instants for a skipped wall-clock time, two for
    /// a repeated one and one otherwise, in ascending order. Transitions are
    /// assumed to be more than a day apart.
    fn get_named_tz_epoch_seconds(
        &self,
        identifier: &str,
        local_seconds: i64,
    ) -> CalendarResult<Vec<i64>> {
        let before =
            self.get_named_tz_offset_seconds(identifier, local_seconds - utils::SECONDS_PER_DAY)?;
        let after =
            self.get_named_tz_offset_seconds(identifier, local_seconds + utils::SECONDS_PER_DAY)?;

        let mut candidates = Vec::with_capacity(2);
        // The larger offset yields the earlier instant.
        for offset in [before.max(after), before.min(after)] {
            let candidate = local_seconds - offset;
            if self.get_named_tz_offset_seconds(identifier, candidate)? == offset
                && !candidates.contains(&candidate)
            {
                candidates.push(candidate);
            }
        }
        Ok(candidates)
    }
}

// ==== UtcOffset ====

/// A fixed UTC offset in seconds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset(i64);

impl UtcOffset {
    /// The zero offset.
    pub const UTC: Self = Self(0);

    /// Creates a new offset from seconds east of UTC, within +/- 24 hours.
    pub fn from_seconds(seconds: i64) -> CalendarResult<Self> {
        if seconds.abs() >= utils::SECONDS_PER_DAY {
            return Err(CalendarError::range().with_message("UTC offset must be less than a day."));
        }
        Ok(Self(seconds))
    }

    /// Returns the offset in seconds east of UTC.
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.0
    }
}

impl FromStr for UtcOffset {
    type Err = CalendarError;

    /// Parses `Z`, `±HH`, `±HHMM` or `±HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Z" {
            return Ok(Self::UTC);
        }
        let mut cursor = s.chars().peekable();
        let sign = match cursor.next() {
            Some('+') => 1,
            Some('-') => -1,
            _ => return Err(invalid_offset()),
        };
        let hours = parse_digit_pair(&mut cursor)?;
        if cursor.peek() == Some(&':') {
            let _ = cursor.next();
        }
        let minutes = match cursor.peek() {
            Some(_) => parse_digit_pair(&mut cursor)?,
            None => 0,
        };
        if cursor.next().is_some() || hours > 23 || minutes > 59 {
            return Err(invalid_offset());
        }
        Self::from_seconds(sign * (hours * utils::SECONDS_PER_HOUR + minutes * 60))
    }
}

impl Writeable for UtcOffset {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        sink.write_char(if self.0 < 0 { '-' } else { '+' })?;
        let seconds = self.0.unsigned_abs();
        write_padded_u8((seconds / 3_600) as u8, sink)?;
        sink.write_char(':')?;
        write_padded_u8((seconds / 60 % 60) as u8, sink)?;
        if seconds % 60 != 0 {
            sink.write_char(':')?;
            write_padded_u8((seconds % 60) as u8, sink)?;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::between(6, 9)
    }
}

impl_display_with_writeable!(UtcOffset);

fn parse_digit_pair(chars: &mut Peekable<Chars<'_>>) -> CalendarResult<i64> {
    let mut value = 0;
    for _ in 0..2 {
        let digit = chars
            .next()
            .and_then(|ch| ch.to_digit(10))
            .ok_or_else(invalid_offset)?;
        value = value * 10 + i64::from(digit);
    }
    Ok(value)
}

fn invalid_offset() -> CalendarError {
    CalendarError::range().with_enum(ErrorMessage::TimeZoneIdentifierInvalid)
}

// ==== TimeZone ====

#[derive(Clone)]
enum TimeZoneKind {
    Offset(UtcOffset),
    Named {
        identifier: String,
        provider: Arc<dyn TimeZoneProvider + Send + Sync>,
    },
}

/// A time zone: either a fixed UTC offset or a named zone backed by a
/// `TimeZoneProvider`.
#[derive(Clone)]
pub struct TimeZone(TimeZoneKind);

impl TimeZone {
    /// The UTC time zone.
    #[must_use]
    pub const fn utc() -> Self {
        Self(TimeZoneKind::Offset(UtcOffset::UTC))
    }

    /// A time zone with a fixed offset.
    #[must_use]
    pub const fn from_offset(offset: UtcOffset) -> Self {
        Self(TimeZoneKind::Offset(offset))
    }

    /// Resolves `identifier` against `provider`.
    ///
    /// Offset strings such as `+09:00` are accepted without consulting the
    /// provider.
    pub fn try_from_identifier_with_provider(
        identifier: &str,
        provider: Arc<dyn TimeZoneProvider + Send + Sync>,
    ) -> CalendarResult<Self> {
        if identifier.starts_with(['+', '-']) || identifier == "Z" {
            return UtcOffset::from_str(identifier).map(Self::from_offset);
        }
        let identifier = provider.normalize_identifier(identifier)?;
        Ok(Self(TimeZoneKind::Named {
            identifier,
            provider,
        }))
    }

    /// Resolves `identifier` against the bundled IANA time zone database.
    #[cfg(feature = "tzdb")]
    pub fn try_from_identifier(identifier: &str) -> CalendarResult<Self> {
        Self::try_from_identifier_with_provider(identifier, TZ_PROVIDER.clone())
    }

    /// Returns the identifier of this time zone.
    #[must_use]
    pub fn identifier(&self) -> String {
        match &self.0 {
            TimeZoneKind::Offset(offset) if *offset == UtcOffset::UTC => "UTC".into(),
            TimeZoneKind::Offset(offset) => offset.to_string(),
            TimeZoneKind::Named { identifier, .. } => identifier.clone(),
        }
    }

    /// Returns the UTC offset in seconds in effect at `instant`.
    pub fn offset_seconds_for(&self, instant: &Instant) -> CalendarResult<i64> {
        match &self.0 {
            TimeZoneKind::Offset(offset) => Ok(offset.seconds()),
            TimeZoneKind::Named {
                identifier,
                provider,
            } => provider.get_named_tz_offset_seconds(identifier, instant.epoch_seconds()),
        }
    }

    /// Returns the wall-clock time and UTC offset at `instant`.
    pub fn to_local_date_time(&self, instant: &Instant) -> CalendarResult<(IsoDateTime, i64)> {
        let offset = self.offset_seconds_for(instant)?;
        Ok((instant.to_local_date_time(offset)?, offset))
    }

    /// Returns every instant at which the wall clock reads `local`, in ascending order.
    pub fn possible_instants_for(&self, local: &IsoDateTime) -> CalendarResult<Vec<Instant>> {
        let local_ns = local.to_local_epoch_nanoseconds();
        let local_seconds = local.to_local_epoch_seconds();
        let subsecond = local_ns - i128::from(local_seconds) * utils::NS_PER_SECOND;

        let epoch_seconds = match &self.0 {
            TimeZoneKind::Offset(offset) => vec![local_seconds - offset.seconds()],
            TimeZoneKind::Named {
                identifier,
                provider,
            } => provider.get_named_tz_epoch_seconds(identifier, local_seconds)?,
        };

        epoch_seconds
            .into_iter()
            .map(|s| Instant::try_new(i128::from(s) * utils::NS_PER_SECOND + subsecond))
            .collect()
    }

    /// Resolves the wall-clock time `local` to a single instant.
    pub fn instant_for(
        &self,
        local: &IsoDateTime,
        disambiguation: Disambiguation,
    ) -> CalendarResult<Instant> {
        let candidates = self.possible_instants_for(local)?;
        match (candidates.as_slice(), disambiguation) {
            ([only], _) => Ok(*only),
            ([_, _], Disambiguation::Reject) | ([], Disambiguation::Reject) => {
                Err(CalendarError::range().with_enum(ErrorMessage::LocalTimeRejected))
            }
            ([earlier, _], Disambiguation::Compatible | Disambiguation::Earlier) => Ok(*earlier),
            ([_, later], Disambiguation::Later) => Ok(*later),
            ([], _) => self.resolve_skipped(local, disambiguation),
            _ => Err(CalendarError::assert()),
        }
    }

    /// Resolves a wall-clock time that falls in a gap by shifting it by the
    /// length of the gap.
    fn resolve_skipped(
        &self,
        local: &IsoDateTime,
        disambiguation: Disambiguation,
    ) -> CalendarResult<Instant> {
        let local_ns = local.to_local_epoch_nanoseconds();
        let day_before = Instant::try_new(local_ns - utils::NS_PER_DAY)?;
        let day_after = Instant::try_new(local_ns + utils::NS_PER_DAY)?;
        let offset_before = self.offset_seconds_for(&day_before)?;
        let offset_after = self.offset_seconds_for(&day_after)?;

        let offset = match disambiguation {
            Disambiguation::Earlier => offset_after,
            _ => offset_before,
        };
        Instant::try_new(local_ns - i128::from(offset) * utils::NS_PER_SECOND)
    }
}

impl Default for TimeZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Debug for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TimeZone").field(&self.identifier()).finish()
    }
}

impl PartialEq for TimeZone {
    fn eq(&self, other: &Self) -> bool {
        self.identifier() == other.identifier()
    }
}

impl FromStr for TimeZone {
    type Err = CalendarError;

    /// Parses an offset string, `UTC`, or (with the `tzdb` feature) an IANA identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }
        if s.starts_with(['+', '-']) || s == "Z" {
            return UtcOffset::from_str(s).map(Self::from_offset);
        }
        #[cfg(feature = "tzdb")]
        {
            Self::try_from_identifier(s)
        }
        #[cfg(not(feature = "tzdb"))]
        {
            Err(CalendarError::range().with_enum(ErrorMessage::TimeZoneIdentifierInvalid))
        }
    }
}
