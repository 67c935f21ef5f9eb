//! Locale-aware date formatting.
//!
//! `DateTimeFormatter` renders the local date of an `Instant` in a time zone
//! as a long (`Sunday, November 4, 2012`) or short (`11/4/2012`) date. The
//! supported locale styles are US English, other English regions and
//! Japanese; every other locale falls back to ISO 8601.

use core::{fmt, str::FromStr};

use icu_locale::Locale;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    error::{CalendarError, ErrorMessage},
    instant::Instant,
    iso::{write_padded_u8, IsoDate},
    tz::TimeZone,
    CalendarResult,
};

const EN_WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const JA_WEEKDAYS: [&str; 7] = [
    "日曜日",
    "月曜日",
    "火曜日",
    "水曜日",
    "木曜日",
    "金曜日",
    "土曜日",
];

/// The pattern a `DateTimeFormatter` renders.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeTemplate {
    /// Weekday, day, month name and year.
    #[default]
    LongDate,
    /// Numeric day, month and year.
    ShortDate,
}

impl fmt::Display for DateTimeTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LongDate => "longdate",
            Self::ShortDate => "shortdate",
        }
        .fmt(f)
    }
}

impl FromStr for DateTimeTemplate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "longdate" => Ok(Self::LongDate),
            "shortdate" => Ok(Self::ShortDate),
            _ => Err(CalendarError::range().with_enum(ErrorMessage::TemplateInvalid)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocaleStyle {
    EnglishUs,
    English,
    Japanese,
    Iso,
}

impl LocaleStyle {
    fn for_locale(locale: &Locale) -> Self {
        let region = locale.id.region.as_ref().map(|region| region.as_str());
        match (locale.id.language.as_str(), region) {
            ("en", None | Some("US")) => Self::EnglishUs,
            ("en", _) => Self::English,
            ("ja", _) => Self::Japanese,
            _ => Self::Iso,
        }
    }
}

/// Formats dates for one template and locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormatter {
    template: DateTimeTemplate,
    locale: Locale,
}

impl DateTimeFormatter {
    #[must_use]
    pub const fn new(template: DateTimeTemplate, locale: Locale) -> Self {
        Self { template, locale }
    }

    /// Creates a formatter from a template name and a BCP-47 locale tag.
    pub fn try_new(template: &str, locale: &str) -> CalendarResult<Self> {
        let locale = Locale::from_str(locale)
            .map_err(|_| CalendarError::range().with_enum(ErrorMessage::LocaleInvalid))?;
        Ok(Self::new(DateTimeTemplate::from_str(template)?, locale))
    }

    #[inline]
    #[must_use]
    pub const fn template(&self) -> DateTimeTemplate {
        self.template
    }

    #[inline]
    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Formats the local date of `instant` in `time_zone`.
    pub fn format(
        &self,
        instant: &Instant,
        time_zone: &TimeZone,
    ) -> CalendarResult<FormattedDateTime> {
        let (local, _) = time_zone.to_local_date_time(instant)?;
        Ok(self.format_date(local.date))
    }

    #[must_use]
    pub fn format_date(&self, date: IsoDate) -> FormattedDateTime {
        FormattedDateTime {
            template: self.template,
            style: LocaleStyle::for_locale(&self.locale),
            date,
        }
    }
}

/// A date ready to be written by a `DateTimeFormatter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattedDateTime {
    template: DateTimeTemplate,
    style: LocaleStyle,
    date: IsoDate,
}

impl Writeable for FormattedDateTime {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        let IsoDate { year, month, day } = self.date;
        let weekday = usize::from(self.date.day_of_week());
        let month_name = || {
            usize::from(month)
                .checked_sub(1)
                .and_then(|idx| EN_MONTHS.get(idx))
                .ok_or(fmt::Error)
        };
        match (self.template, self.style) {
            (_, LocaleStyle::Iso) => self.date.write_to(sink),
            (DateTimeTemplate::LongDate, LocaleStyle::EnglishUs) => write!(
                sink,
                "{}, {} {day}, {year}",
                EN_WEEKDAYS[weekday],
                month_name()?
            ),
            (DateTimeTemplate::LongDate, LocaleStyle::English) => write!(
                sink,
                "{}, {day} {} {year}",
                EN_WEEKDAYS[weekday],
                month_name()?
            ),
            (DateTimeTemplate::LongDate, LocaleStyle::Japanese) => {
                write!(sink, "{year}年{month}月{day}日{}", JA_WEEKDAYS[weekday])
            }
            (DateTimeTemplate::ShortDate, LocaleStyle::EnglishUs) => {
                write!(sink, "{month}/{day}/{year}")
            }
            (DateTimeTemplate::ShortDate, LocaleStyle::English) => {
                write_padded_u8(day, sink)?;
                sink.write_char('/')?;
                write_padded_u8(month, sink)?;
                write!(sink, "/{year}")
            }
            (DateTimeTemplate::ShortDate, LocaleStyle::Japanese) => {
                write!(sink, "{year}/")?;
                write_padded_u8(month, sink)?;
                sink.write_char('/')?;
                write_padded_u8(day, sink)
            }
        }
    }

    fn writeable_length_hint(&self) -> LengthHint {
        match (self.template, self.style) {
            (DateTimeTemplate::ShortDate, _) | (_, LocaleStyle::Iso) => LengthHint::between(8, 10),
            _ => LengthHint::between(12, 32),
        }
    }
}

impl_display_with_writeable!(FormattedDateTime);

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use icu_locale::locale;

    use super::{DateTimeFormatter, DateTimeTemplate};
    use crate::{instant::Instant, iso::IsoDate, tz::tests::pacific_2012};

    fn fall_back_day() -> IsoDate {
        IsoDate::try_new(2012, 11, 4).unwrap()
    }

    #[test]
    fn long_dates() {
        let date = fall_back_day();
        let long = |locale| DateTimeFormatter::new(DateTimeTemplate::LongDate, locale);
        assert_eq!(
            long(locale!("en-US")).format_date(date).to_string(),
            "Sunday, November 4, 2012"
        );
        assert_eq!(
            long(locale!("en")).format_date(date).to_string(),
            "Sunday, November 4, 2012"
        );
        assert_eq!(
            long(locale!("en-GB")).format_date(date).to_string(),
            "Sunday, 4 November 2012"
        );
        assert_eq!(
            long(locale!("ja-JP")).format_date(date).to_string(),
            "2012年11月4日日曜日"
        );
        assert_eq!(
            long(locale!("de-DE")).format_date(date).to_string(),
            "2012-11-04"
        );
    }

    #[test]
    fn short_dates() {
        let date = IsoDate::try_new(2012, 3, 9).unwrap();
        let short = |locale| DateTimeFormatter::new(DateTimeTemplate::ShortDate, locale);
        assert_eq!(short(locale!("en-US")).format_date(date).to_string(), "3/9/2012");
        assert_eq!(short(locale!("en-AU")).format_date(date).to_string(), "09/03/2012");
        assert_eq!(short(locale!("ja")).format_date(date).to_string(), "2012/03/09");
        assert_eq!(short(locale!("fr")).format_date(date).to_string(), "2012-03-09");
    }

    #[test]
    fn invalid_month_is_a_write_error() {
        use writeable::Writeable;

        let date = IsoDate {
            year: 2012,
            month: 0,
            day: 4,
        };
        let formatter = DateTimeFormatter::new(DateTimeTemplate::LongDate, locale!("en-US"));
        let mut sink = String::new();
        assert!(formatter.format_date(date).write_to(&mut sink).is_err());
    }

    #[test]
    fn formats_in_time_zone() {
        let formatter = DateTimeFormatter::try_new("longdate", "en-US").unwrap();
        // 02:00 UTC is still the previous evening in Los Angeles.
        let instant = Instant::from_str("2012-11-05T02:00:00Z").unwrap();
        assert_eq!(
            formatter
                .format(&instant, &pacific_2012())
                .unwrap()
                .to_string(),
            "Sunday, November 4, 2012"
        );
        assert!(DateTimeFormatter::try_new("month", "en-US").is_err());
    }
}
