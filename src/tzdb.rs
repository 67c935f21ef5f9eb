//! A `TimeZoneProvider` backed by the IANA time zone database.
//!
//! Zone data comes from the database bundled by `jiff-tzdb` and is parsed
//! with `tzif`. Parsed zones are cached per provider.
//!
//! Instants before the first explicit transition use local time type 0.
//! Instants after the last explicit transition are resolved with the POSIX
//! TZ string found in the TZif footer.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use combine::Parser;

use tzif::data::{
    posix::{PosixTzString, TransitionDate, TransitionDay},
    time::Seconds,
    tzif::{DataBlock, TzifData},
};

use crate::{
    error::{CalendarError, ErrorMessage},
    tz::TimeZoneProvider,
    utils, CalendarResult,
};

/// The parsed contents of a `TZif` file.
///
/// Only the version 2+ data block and the footer are kept; version 1 data
/// is 32-bit and superseded by the second block.
#[derive(Debug, Clone)]
pub struct Tzif {
    data_block2: Option<DataBlock>,
    footer: Option<PosixTzString>,
}

impl From<TzifData> for Tzif {
    fn from(value: TzifData) -> Self {
        let TzifData {
            data_block2,
            footer,
            ..
        } = value;
        Self {
            data_block2,
            footer,
        }
    }
}

impl Tzif {
    pub fn from_bytes(data: &[u8]) -> CalendarResult<Self> {
        let Ok((parse_result, _)) = tzif::parse::tzif::tzif().parse(data) else {
            return Err(CalendarError::general("").with_enum(ErrorMessage::TzifIllformed));
        };
        Ok(parse_result.into())
    }

    pub fn posix_tz_string(&self) -> Option<&PosixTzString> {
        self.footer.as_ref()
    }

    pub fn get_data_block2(&self) -> CalendarResult<&DataBlock> {
        self.data_block2
            .as_ref()
            .ok_or(CalendarError::general("").with_enum(ErrorMessage::TzifMissingDataBlock))
    }

    /// Returns the UTC offset in seconds in effect at `epoch_seconds`.
    pub fn offset_seconds_for(&self, epoch_seconds: i64) -> CalendarResult<i64> {
        let db = self.get_data_block2()?;

        // <https://datatracker.ietf.org/doc/html/rfc8536#section-3.2>
        // Without transitions, local time is specified by the footer if
        // present, otherwise by time type 0.
        if db.transition_times.is_empty() {
            return match self.posix_tz_string() {
                Some(posix) => Ok(resolve_posix_tz_string_for_epoch_seconds(
                    posix,
                    epoch_seconds,
                )),
                None => local_record_offset(db, None),
            };
        }

        match db.transition_times.binary_search(&Seconds(epoch_seconds)) {
            // A transition applies from its own instant onward.
            Ok(idx) => local_record_offset(db, Some(idx)),
            Err(0) => local_record_offset(db, None),
            Err(idx) if idx == db.transition_times.len() => match self.posix_tz_string() {
                Some(posix) => Ok(resolve_posix_tz_string_for_epoch_seconds(
                    posix,
                    epoch_seconds,
                )),
                None => local_record_offset(db, Some(idx - 1)),
            },
            Err(idx) => local_record_offset(db, Some(idx - 1)),
        }
    }
}

/// Returns the offset of the local time type for the transition at `idx`,
/// or of time type 0 when `idx` is `None`.
#[inline]
fn local_record_offset(db: &DataBlock, idx: Option<usize>) -> CalendarResult<i64> {
    let record_idx = match idx {
        Some(idx) => db.transition_types.get(idx).copied().unwrap_or(0),
        None => 0,
    };
    db.local_time_type_records
        .get(record_idx)
        .map(|record| record.utoff.0)
        .ok_or(CalendarError::general("").with_enum(ErrorMessage::TzifIllformed))
}

fn resolve_posix_tz_string_for_epoch_seconds(posix_tz_string: &PosixTzString, seconds: i64) -> i64 {
    // The POSIX tz string stores offsets as the seconds that must be added
    // to local time to reach UTC.
    let std_offset = -posix_tz_string.std_info.offset.0;
    let Some(dst_variant) = &posix_tz_string.dst_info else {
        // Regardless of the time, there is one variant and we can return it.
        return std_offset;
    };
    let dst_offset = -dst_variant.variant_info.offset.0;

    let (year, _, _) =
        utils::ymd_from_epoch_days(utils::epoch_seconds_to_epoch_days(seconds + std_offset));
    let dst_start = calculate_transition_seconds_for_year(year, dst_variant.start_date, std_offset);
    let dst_end = calculate_transition_seconds_for_year(year, dst_variant.end_date, dst_offset);

    // Southern hemisphere rules end daylight saving time before they start it.
    let in_dst = if dst_start <= dst_end {
        (dst_start..dst_end).contains(&seconds)
    } else {
        !(dst_end..dst_start).contains(&seconds)
    };

    if in_dst {
        dst_offset
    } else {
        std_offset
    }
}

/// Returns the epoch seconds at which a POSIX transition rule fires in `year`.
///
/// `offset` is the offset in effect before the transition, since the rule's
/// time of day is expressed in that local time.
fn calculate_transition_seconds_for_year(
    year: i32,
    transition_date: TransitionDate,
    offset: i64,
) -> i64 {
    let year_epoch_days = utils::epoch_days_from_gregorian_date(year, 1, 1);
    let is_leap = utils::is_leap(year);

    // Zero-based day of the year.
    let days = match transition_date.day {
        TransitionDay::NoLeap(day) if day > 59 => day - 1 + u16::from(is_leap),
        TransitionDay::NoLeap(day) => day - 1,
        TransitionDay::WithLeap(day) => day,
        TransitionDay::Mwd(month, week, day) => {
            let days_to_month = utils::month_to_day((month - 1) as u8, is_leap);
            let days_in_month = u16::from(utils::iso_days_in_month(year, month as u8));

            // Day of the week on which the month starts, 0 being Sunday.
            let day_offset = (u16::from(utils::epoch_days_to_day_of_week(year_epoch_days))
                + days_to_month)
                .rem_euclid(7);

            // EXAMPLE:
            //
            // 0   1   2   3   4   5   6
            // sun mon tue wed thu fri sat
            // -   -   -   0   1   2   3
            // 4   5   6   7   8   9   10
            // 11  12  13  14  15  16  17
            // 18  19  20  21  22  23  24
            // 25  26  27  28  29  30  -
            //
            // The month starts on a wednesday, so day_offset = 3. The second
            // friday is (2 - 1) * 7 + 5 - 3 = 9, and the third monday is
            // (3 - 0) * 7 + 1 - 3 = 19.
            let mut day_of_month = (week - u16::from(day_offset <= day)) * 7 + day - day_offset;

            // Week 5 means the last such weekday of the month.
            if day_of_month + 1 > days_in_month {
                day_of_month -= 7;
            }

            days_to_month + day_of_month
        }
    };

    (year_epoch_days + i64::from(days)) * utils::SECONDS_PER_DAY + transition_date.time.0 - offset
}

/// A `TimeZoneProvider` over the bundled IANA time zone database.
#[derive(Debug, Default)]
pub struct TzdbProvider {
    cache: Mutex<BTreeMap<String, Arc<Tzif>>>,
}

impl TzdbProvider {
    /// Returns the parsed zone for `identifier`, parsing and caching it on first use.
    pub fn get(&self, identifier: &str) -> CalendarResult<Arc<Tzif>> {
        let Some((canonical_name, data)) = jiff_tzdb::get(identifier) else {
            return Err(CalendarError::range().with_enum(ErrorMessage::TimeZoneIdentifierInvalid));
        };

        let mut cache = self
            .cache
            .lock()
            .map_err(|_| CalendarError::general("Time zone cache is poisoned."))?;
        if let Some(tzif) = cache.get(canonical_name) {
            return Ok(tzif.clone());
        }

        #[cfg(feature = "log")]
        log::debug!("Parsing TZif data for {canonical_name}");
        let tzif = Arc::new(Tzif::from_bytes(data)?);
        cache.insert(canonical_name.into(), tzif.clone());
        Ok(tzif)
    }
}

impl TimeZoneProvider for TzdbProvider {
    fn check_identifier(&self, identifier: &str) -> bool {
        jiff_tzdb::get(identifier).is_some()
    }

    fn normalize_identifier(&self, identifier: &str) -> CalendarResult<String> {
        jiff_tzdb::get(identifier)
            .map(|(canonical_name, _)| canonical_name.into())
            .ok_or(CalendarError::range().with_enum(ErrorMessage::TimeZoneIdentifierInvalid))
    }

    fn get_named_tz_offset_seconds(
        &self,
        identifier: &str,
        epoch_seconds: i64,
    ) -> CalendarResult<i64> {
        self.get(identifier)?.offset_seconds_for(epoch_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::TzdbProvider;
    use crate::{tz::TimeZoneProvider, utils};

    fn epoch_seconds(year: i32, month: u8, day: u8, hour: i64) -> i64 {
        utils::epoch_days_from_gregorian_date(year, month, day) * utils::SECONDS_PER_DAY
            + hour * utils::SECONDS_PER_HOUR
    }

    #[test]
    fn los_angeles_2012_transitions() {
        let provider = TzdbProvider::default();
        let id = "America/Los_Angeles";
        let fall_back = epoch_seconds(2012, 11, 4, 9);
        assert_eq!(
            provider.get_named_tz_offset_seconds(id, fall_back - 1).unwrap(),
            -7 * 3_600
        );
        assert_eq!(
            provider.get_named_tz_offset_seconds(id, fall_back).unwrap(),
            -8 * 3_600
        );

        let spring_forward = epoch_seconds(2012, 3, 11, 10);
        assert_eq!(
            provider.get_named_tz_offset_seconds(id, spring_forward - 1).unwrap(),
            -8 * 3_600
        );
        assert_eq!(
            provider.get_named_tz_offset_seconds(id, spring_forward).unwrap(),
            -7 * 3_600
        );
    }

    #[test]
    fn footer_rules_far_future() {
        let provider = TzdbProvider::default();
        let la = "America/Los_Angeles";
        assert_eq!(
            provider
                .get_named_tz_offset_seconds(la, epoch_seconds(2050, 7, 1, 0))
                .unwrap(),
            -7 * 3_600
        );
        assert_eq!(
            provider
                .get_named_tz_offset_seconds(la, epoch_seconds(2050, 12, 1, 0))
                .unwrap(),
            -8 * 3_600
        );

        // Southern hemisphere: daylight saving time spans the new year.
        let sydney = "Australia/Sydney";
        assert_eq!(
            provider
                .get_named_tz_offset_seconds(sydney, epoch_seconds(2050, 1, 15, 0))
                .unwrap(),
            11 * 3_600
        );
        assert_eq!(
            provider
                .get_named_tz_offset_seconds(sydney, epoch_seconds(2050, 7, 15, 0))
                .unwrap(),
            10 * 3_600
        );
    }

    #[test]
    fn repeated_wall_clock_hour() {
        let provider = TzdbProvider::default();
        let local = epoch_seconds(2012, 11, 4, 1) + 1_800;
        let candidates = provider
            .get_named_tz_epoch_seconds("America/Los_Angeles", local)
            .unwrap();
        assert_eq!(
            candidates,
            vec![local + 7 * 3_600, local + 8 * 3_600]
        );

        let skipped = epoch_seconds(2012, 3, 11, 2) + 1_800;
        assert!(provider
            .get_named_tz_epoch_seconds("America/Los_Angeles", skipped)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn identifiers() {
        let provider = TzdbProvider::default();
        assert!(provider.check_identifier("America/Los_Angeles"));
        assert!(!provider.check_identifier("Mars/Olympus"));
        assert_eq!(
            provider.normalize_identifier("asia/tokyo").unwrap(),
            "Asia/Tokyo"
        );
        assert_eq!(
            provider.get_named_tz_offset_seconds("UTC", 0).unwrap(),
            0
        );
        assert!(provider.get("Mars/Olympus").is_err());
    }
}
