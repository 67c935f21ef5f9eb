//! Era discovery.
//!
//! The eras of a calendar system are discovered once, when a `Calendar` is
//! created, by walking the supported ISO range through ICU4X and recording
//! every date at which the era code changes.

use icu_calendar::{types::EraYear, AnyCalendar, Ref};
use tinystr::TinyAsciiStr;

use crate::{
    error::{CalendarError, ErrorMessage},
    iso::IsoDate,
    options::CalendarSystem,
    CalendarResult, CalendarUnwrap,
};

/// A contiguous span of ISO dates sharing one era code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EraInfo {
    pub(crate) code: TinyAsciiStr<16>,
    /// The first ISO date of the era within the supported range.
    pub(crate) start: IsoDate,
    /// The last ISO date of the era within the supported range.
    pub(crate) end: IsoDate,
    /// The era year of `start`.
    pub(crate) first_year: i32,
}

impl EraInfo {
    pub(crate) const fn last_year(&self) -> i32 {
        self.era_year_for(self.end.year)
    }

    /// Converts an ISO year within this era to an era year.
    pub(crate) const fn era_year_for(&self, iso_year: i32) -> i32 {
        self.first_year + (iso_year - self.start.year)
    }

    /// Converts an era year of this era to an ISO year.
    pub(crate) const fn iso_year_for(&self, era_year: i32) -> i32 {
        self.start.year + (era_year - self.first_year)
    }

    /// Returns the first and last month of `era_year` that lie within this era.
    pub(crate) const fn month_range(&self, era_year: i32) -> (u8, u8) {
        let iso_year = self.iso_year_for(era_year);
        let first = if iso_year == self.start.year {
            self.start.month
        } else {
            1
        };
        let last = if iso_year == self.end.year {
            self.end.month
        } else {
            12
        };
        (first, last)
    }

    /// Returns the first and last day of `month` in `era_year` that lie within this era.
    pub(crate) const fn day_range(&self, era_year: i32, month: u8) -> (u8, u8) {
        let iso_year = self.iso_year_for(era_year);
        let first = if iso_year == self.start.year && month == self.start.month {
            self.start.day
        } else {
            1
        };
        let last = if iso_year == self.end.year && month == self.end.month {
            self.end.day
        } else {
            IsoDate::new_unchecked(iso_year, month, 1).days_in_month()
        };
        (first, last)
    }

    pub(crate) fn contains(&self, date: IsoDate) -> bool {
        (self.start..=self.end).contains(&date)
    }
}

/// Discovers every era of `system` within its supported range, in
/// chronological order.
pub(crate) fn discover_eras(system: CalendarSystem) -> CalendarResult<Vec<EraInfo>> {
    let calendar = AnyCalendar::new(system.icu_kind());
    let (range_start, range_end) = system.supported_range();

    let mut eras = Vec::new();
    push_era(&mut eras, range_start, era_at(&calendar, range_start)?, range_end)?;

    for year in range_start.year..=range_end.year {
        let year_start = IsoDate::new_unchecked(year, 1, 1).max(range_start);
        let year_end = IsoDate::new_unchecked(year, 12, 31).min(range_end);

        let current = eras.last().calendar_unwrap()?.code;
        let at_start = era_at(&calendar, year_start)?;
        let at_end = era_at(&calendar, year_end)?;
        if at_start.era == current && at_end.era == current {
            continue;
        }

        // The era changes within this year; find each change day by day.
        let mut date = year_start;
        while date <= year_end {
            let era_year = era_at(&calendar, date)?;
            if era_year.era != eras.last().calendar_unwrap()?.code {
                #[cfg(feature = "log")]
                log::trace!("Era {} starts on {date}", era_year.era);
                push_era(&mut eras, date, era_year, range_end)?;
            }
            date = date.add_days(1)?;
        }
    }

    if system == CalendarSystem::Japanese {
        fold_leading_meiji(&mut eras);
    }

    if eras.len() > usize::from(u8::MAX) {
        return Err(CalendarError::general("Calendar has too many eras."));
    }
    Ok(eras)
}

/// Folds the years before Meiji 6 into Meiji.
///
/// Recent ICU4X releases label Meiji 1 to 5 (1868 to 1872) as `ce`. Meiji
/// starts on 1868-10-23 here, so a leading `ce` span becomes its head.
fn fold_leading_meiji(eras: &mut Vec<EraInfo>) {
    let [first, second, ..] = eras.as_slice() else {
        return;
    };
    if first.code.as_str() != "ce" || second.code.as_str() != "meiji" {
        return;
    }
    let start = first.start;
    let first_year = second.first_year - (second.start.year - start.year);

    #[cfg(feature = "log")]
    log::debug!("Folding {start} into Meiji {first_year}");
    eras.remove(0);
    if let Some(meiji) = eras.first_mut() {
        meiji.start = start;
        meiji.first_year = first_year;
    }
}

/// Closes the last era on the day before `start` and opens a new one.
fn push_era(
    eras: &mut Vec<EraInfo>,
    start: IsoDate,
    era_year: EraYear,
    range_end: IsoDate,
) -> CalendarResult<()> {
    if let Some(previous) = eras.last_mut() {
        previous.end = start.add_days(-1)?;
    }
    eras.push(EraInfo {
        code: era_year.era,
        start,
        end: range_end,
        first_year: era_year.year,
    });
    Ok(())
}

fn era_at(calendar: &AnyCalendar, date: IsoDate) -> CalendarResult<EraYear> {
    date.to_icu4x()?
        .to_calendar(Ref(calendar))
        .year()
        .era()
        .ok_or(CalendarError::range().with_enum(ErrorMessage::EraOutOfRange))
}

#[cfg(test)]
mod tests {
    use tinystr::TinyAsciiStr;

    use super::{discover_eras, fold_leading_meiji, EraInfo};
    use crate::{iso::IsoDate, options::CalendarSystem};

    fn era(code: &str, start: IsoDate, end: IsoDate, first_year: i32) -> EraInfo {
        EraInfo {
            code: TinyAsciiStr::try_from_str(code).unwrap(),
            start,
            end,
            first_year,
        }
    }

    #[test]
    fn japanese_eras() {
        let eras = discover_eras(CalendarSystem::Japanese).unwrap();
        let codes: Vec<&str> = eras.iter().map(|era| era.code.as_str()).collect();
        assert_eq!(codes, ["meiji", "taisho", "showa", "heisei", "reiwa"]);

        let taisho = eras[1];
        assert_eq!(taisho.start, IsoDate::try_new(1912, 7, 30).unwrap());
        assert_eq!(taisho.end, IsoDate::try_new(1926, 12, 24).unwrap());
        assert_eq!(taisho.first_year, 1);
        assert_eq!(taisho.last_year(), 15);
        assert_eq!(taisho.month_range(1), (7, 12));
        assert_eq!(taisho.month_range(15), (1, 12));
        assert_eq!(taisho.day_range(1, 7), (30, 31));
        assert_eq!(taisho.day_range(15, 12), (1, 24));

        let counts: Vec<i32> = eras
            .iter()
            .map(|era| era.last_year() - era.first_year + 1)
            .collect();
        assert_eq!(counts, [45, 15, 64, 31, 7981]);

        let meiji = eras[0];
        assert_eq!(meiji.code.as_str(), "meiji");
        assert_eq!(meiji.start, IsoDate::try_new(1868, 10, 23).unwrap());
        assert_eq!(meiji.first_year, 1);
        assert_eq!(meiji.era_year_for(1873), 6);
        assert_eq!(meiji.month_range(1), (10, 12));
        assert_eq!(meiji.day_range(1, 10), (23, 31));
    }

    #[test]
    fn leading_ce_years_become_meiji() {
        let range_start = IsoDate::try_new(1868, 10, 23).unwrap();
        let meiji_six = IsoDate::try_new(1873, 1, 1).unwrap();
        let taisho = IsoDate::try_new(1912, 7, 30).unwrap();
        let mut eras = vec![
            era("ce", range_start, IsoDate::try_new(1872, 12, 31).unwrap(), 1868),
            era("meiji", meiji_six, IsoDate::try_new(1912, 7, 29).unwrap(), 6),
            era("taisho", taisho, IsoDate::MAX, 1),
        ];
        fold_leading_meiji(&mut eras);

        assert_eq!(eras.len(), 2);
        assert_eq!(eras[0].code.as_str(), "meiji");
        assert_eq!(eras[0].start, range_start);
        assert_eq!(eras[0].first_year, 1);
        assert_eq!(eras[0].last_year(), 45);
        assert_eq!(eras[1].start, taisho);

        // Already starting with Meiji: nothing to fold.
        let unchanged = eras.clone();
        fold_leading_meiji(&mut eras);
        assert_eq!(eras, unchanged);
    }

    #[test]
    fn single_era_systems() {
        let gregorian = discover_eras(CalendarSystem::Gregorian).unwrap();
        assert_eq!(gregorian.len(), 1);
        assert_eq!(gregorian[0].code.as_str(), "ce");
        assert_eq!(gregorian[0].first_year, 1);
        assert_eq!(gregorian[0].last_year(), 9999);

        let buddhist = discover_eras(CalendarSystem::Buddhist).unwrap();
        assert_eq!(buddhist.len(), 1);
        assert_eq!(buddhist[0].first_year, 544);
        assert_eq!(buddhist[0].last_year(), 10542);

        let roc = discover_eras(CalendarSystem::Roc).unwrap();
        assert_eq!(roc.len(), 1);
        assert_eq!(roc[0].code.as_str(), "roc");
        assert_eq!(roc[0].first_year, 1);
        assert!(roc[0].contains(IsoDate::try_new(2024, 2, 29).unwrap()));
    }
}
