//! Utility date and time equations for the proleptic Gregorian calendar.
//!
//! The epoch day conversions are based off Cassio Neri and Lorenz Schneider's
//! paper, [Euclidean affine functions and their application to calendar
//! algorithms][eaf-calendar-algorithms].
//!
//! Unless specified, Rata Die refers to the computational rata die as
//! referenced in the paper.
//!
//! [eaf-calendar-algorithms]: https://onlinelibrary.wiley.com/doi/full/10.1002/spe.3172

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
pub(crate) const SECONDS_PER_HOUR: i64 = 3_600;
pub(crate) const NS_PER_SECOND: i128 = 1_000_000_000;
pub(crate) const NS_PER_HOUR: i128 = 3_600 * NS_PER_SECOND;
pub(crate) const NS_PER_DAY: i128 = 86_400 * NS_PER_SECOND;

const EPOCH_COMPUTATIONAL_RATA_DIE: i64 = 719_468;
const DAYS_IN_A_400Y_CYCLE: u32 = 146_097;

const TWO_POWER_THIRTY_NINE: u64 = 549_755_813_888; // 2^39 constant
const TWO_POWER_SIXTEEN: u32 = 65_536; // 2^16 constant

// Places the Unix epoch near the center of the unsigned computational range.
const SHIFT_CONSTANT: i64 = 3670;

const RATA_DIE_SHIFT: i64 =
    EPOCH_COMPUTATIONAL_RATA_DIE + DAYS_IN_A_400Y_CYCLE as i64 * SHIFT_CONSTANT;

/// Returns the epoch days for a proleptic Gregorian date.
pub(crate) const fn epoch_days_from_gregorian_date(year: i32, month: u8, day: u8) -> i64 {
    let j = (month <= 2) as i64;
    let computational_year = year as i64 + 400 * SHIFT_CONSTANT - j;
    let computational_month = month as i64 + 12 * j;
    let computational_day = day as i64 - 1;
    let century = computational_year / 100;
    let y_star = 1461 * computational_year / 4 - century + century / 4;
    let m_star = (979 * computational_month - 2919) / 32;
    y_star + m_star + computational_day - RATA_DIE_SHIFT
}

/// Returns the proleptic Gregorian `(year, month, day)` for the provided epoch days.
///
/// The supported range is far wider than the calendars in this crate
/// need (roughly +/- 400 million days).
pub(crate) const fn ymd_from_epoch_days(epoch_days: i64) -> (i32, u8, u8) {
    let rata_die = (epoch_days + RATA_DIE_SHIFT) as u32;
    let n_one = 4 * rata_die + 3;
    let century = n_one / DAYS_IN_A_400Y_CYCLE;
    let n_two = (n_one % DAYS_IN_A_400Y_CYCLE) | 3;
    let year_of_century = (376_287_347 * n_two as u64 / TWO_POWER_THIRTY_NINE) as u32;
    let day_of_year = (n_two - 1461 * year_of_century) / 4;
    let computational_year = 100 * century + year_of_century;
    let n_three = 2141 * day_of_year + 197_913;
    let computational_month = n_three / TWO_POWER_SIXTEEN;
    let computational_day = (n_three % TWO_POWER_SIXTEEN) / 2141;
    let j = (day_of_year >= 306) as u32;

    let year = (computational_year + j) as i64 - 400 * SHIFT_CONSTANT;
    let month = computational_month - 12 * j;
    (year as i32, month as u8, computational_day as u8 + 1)
}

#[inline]
pub(crate) const fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) const fn iso_days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Returns the zero-based day of the year on which `month` starts.
pub(crate) const fn month_to_day(month: u8, is_leap: bool) -> u16 {
    let leap_day = is_leap as u16;
    match month {
        0 => 0,
        1 => 31,
        2 => 59 + leap_day,
        3 => 90 + leap_day,
        4 => 120 + leap_day,
        5 => 151 + leap_day,
        6 => 181 + leap_day,
        7 => 212 + leap_day,
        8 => 243 + leap_day,
        9 => 273 + leap_day,
        10 => 304 + leap_day,
        _ => 334 + leap_day,
    }
}

/// Returns the day of the week for epoch days, with 0 being Sunday.
///
/// 1970-01-01 was a Thursday.
#[inline]
pub(crate) const fn epoch_days_to_day_of_week(epoch_days: i64) -> u8 {
    (epoch_days + 4).rem_euclid(7) as u8
}

#[inline]
pub(crate) const fn epoch_seconds_to_epoch_days(seconds: i64) -> i64 {
    seconds.div_euclid(SECONDS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_days_round_trip_known_dates() {
        assert_eq!(epoch_days_from_gregorian_date(1970, 1, 1), 0);
        assert_eq!(ymd_from_epoch_days(0), (1970, 1, 1));
        assert_eq!(epoch_days_from_gregorian_date(2012, 11, 4), 15_648);
        assert_eq!(ymd_from_epoch_days(15_648), (2012, 11, 4));
        assert_eq!(epoch_days_from_gregorian_date(1, 1, 1), -719_162);
        assert_eq!(ymd_from_epoch_days(-719_162), (1, 1, 1));
        assert_eq!(ymd_from_epoch_days(2_932_896), (9999, 12, 31));
        assert_eq!(ymd_from_epoch_days(11_016), (2000, 2, 29));
    }

    #[test]
    fn day_of_week() {
        // Thursday
        assert_eq!(epoch_days_to_day_of_week(0), 4);
        // 2012-11-04 was a Sunday.
        assert_eq!(epoch_days_to_day_of_week(15_648), 0);
        // 1969-12-31 was a Wednesday.
        assert_eq!(epoch_days_to_day_of_week(-1), 3);
    }

    #[test]
    fn days_in_month() {
        assert_eq!(iso_days_in_month(2000, 2), 29);
        assert_eq!(iso_days_in_month(1900, 2), 28);
        assert_eq!(iso_days_in_month(2012, 11), 30);
        assert_eq!(month_to_day(10, false), 304);
        assert_eq!(month_to_day(2, true), 60);
    }
}
