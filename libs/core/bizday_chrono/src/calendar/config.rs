use std::{collections::BTreeSet, ops::RangeInclusive, sync::Arc};

use anyhow::Context;
use chrono::Datelike;
use derivative::Derivative;

use crate::timepoint::Date;

use super::{
    error::CalendarError,
    named::HolidayCalendar,
    source::{HolidaySrc, LocalHolidaySrc},
    weekend::WeekendSet,
};

// -----------------------------------------------------------------------------
// CalendarConfig
// -----------------------------------------------------------------------------
/// The business-day policy: weekend weekdays, holiday dates and an optional
/// holiday source.
///
/// # Overview
/// One configuration describes which calendar dates count as business days,
/// and every business-day operation takes it by reference. The usual pattern
/// is "configure once, query many": build a configuration, load holidays
/// into it, then evaluate ranges against it.
///
/// ```
/// use bizday_chrono::calendar::CalendarConfig;
/// use chrono::NaiveDate;
///
/// let ymd = |y: i32, m: u32, d: u32| NaiveDate::from_ymd_opt(y, m, d).unwrap();
///
/// let mut cal = CalendarConfig::new();
/// cal.add_holiday("2024-01-02").unwrap();
///
/// assert!(cal.is_business_day(ymd(2024, 1, 1))); // Monday
/// assert!(!cal.is_business_day(ymd(2024, 1, 2))); // holiday
/// assert!(!cal.is_business_day(ymd(2024, 1, 6))); // Saturday
/// assert_eq!(cal.next_business_day(ymd(2024, 1, 5)), ymd(2024, 1, 8));
/// assert_eq!(cal.count_business_days(ymd(2024, 1, 1), ymd(2024, 1, 7)), 4);
/// ```
///
/// # Holiday sources
/// A configuration built with [`CalendarConfig::with_source`] can pull the
/// holidays of a country and year from an external provider through
/// [`CalendarConfig::load_holidays_from_source`]. A source failure never
/// surfaces: it is logged and the built-in local table is substituted.
/// Without a source, source loading is a no-op and the configuration behaves
/// as a plain offline calendar.
///
/// # Sharing
/// The configuration is plain mutable data without internal synchronization.
/// Callers mutating one instance from several threads must serialize access
/// themselves.
#[derive(Derivative, Clone)]
#[derivative(Debug, PartialEq)]
pub struct CalendarConfig {
    weekend: WeekendSet,
    holidays: BTreeSet<Date>,
    default_country: String,
    #[derivative(Debug = "ignore", PartialEq = "ignore")]
    source: Option<Arc<dyn HolidaySrc + Send + Sync>>,
}

//
// ser/de
//
impl serde::Serialize for CalendarConfig {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct _Data<'a> {
            weekend_days: WeekendSet,
            holidays: &'a BTreeSet<Date>,
            default_country: &'a str,
        }

        _Data {
            weekend_days: self.weekend,
            holidays: &self.holidays,
            default_country: &self.default_country,
        }
        .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for CalendarConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct _Data {
            weekend_days: WeekendSet,
            holidays: BTreeSet<Date>,
            default_country: Option<String>,
        }

        let data = _Data::deserialize(deserializer)?;
        Ok(Self {
            weekend: data.weekend_days,
            holidays: data.holidays,
            default_country: data
                .default_country
                .unwrap_or_else(|| Self::DEFAULT_COUNTRY.to_owned()),
            source: None,
        })
    }
}

//
// ctors
//
impl Default for CalendarConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarConfig {
    /// Environment variable with the default country code.
    pub const ENV_COUNTRY: &'static str = "BIZDAY_COUNTRY";
    /// Environment variable with comma-separated weekend day numbers.
    pub const ENV_WEEKEND_DAYS: &'static str = "BIZDAY_WEEKEND_DAYS";
    /// Environment variable with comma-separated `%Y-%m-%d` holiday dates.
    pub const ENV_HOLIDAYS: &'static str = "BIZDAY_HOLIDAYS";

    /// Default country used by source loading when no country is given.
    pub const DEFAULT_COUNTRY: &'static str = "US";

    const DATE_FORMAT: &'static str = "%Y-%m-%d";

    /// A configuration with the default weekend (Saturday and Sunday), no
    /// holidays, default country `US` and no holiday source.
    pub fn new() -> Self {
        Self {
            weekend: WeekendSet::default(),
            holidays: BTreeSet::new(),
            default_country: Self::DEFAULT_COUNTRY.to_owned(),
            source: None,
        }
    }

    /// A configuration seeded from the process environment.
    ///
    /// Reads [`Self::ENV_COUNTRY`], [`Self::ENV_WEEKEND_DAYS`] and
    /// [`Self::ENV_HOLIDAYS`]. An invalid value is reported with a warning
    /// and the default is kept, so this constructor never fails.
    pub fn from_env() -> Self {
        let mut cfg = Self::new();
        cfg.apply_env(
            std::env::var(Self::ENV_COUNTRY).ok().as_deref(),
            std::env::var(Self::ENV_WEEKEND_DAYS).ok().as_deref(),
            std::env::var(Self::ENV_HOLIDAYS).ok().as_deref(),
        );
        cfg
    }

    fn apply_env(
        &mut self,
        country: Option<&str>,
        weekend_days: Option<&str>,
        holidays: Option<&str>,
    ) {
        if let Some(country) = country {
            self.default_country = country.trim().to_ascii_uppercase();
        }
        if let Some(raw) = weekend_days {
            match parse_weekend_days(raw) {
                Ok(weekend) => self.weekend = weekend,
                Err(err) => log::warn!(
                    "invalid value '{raw}' in {}: {err:#}. Keeping the default weekend",
                    Self::ENV_WEEKEND_DAYS
                ),
            }
        }
        if let Some(raw) = holidays {
            match parse_holiday_list(raw) {
                Ok(dates) => self.holidays.extend(dates),
                Err(err) => log::warn!(
                    "invalid value '{raw}' in {}: {err:#}. No holidays loaded",
                    Self::ENV_HOLIDAYS
                ),
            }
        }
    }

    /// Attach the holiday source consulted by
    /// [`CalendarConfig::load_holidays_from_source`].
    pub fn with_source(mut self, source: impl HolidaySrc + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }
}

fn parse_weekend_days(raw: &str) -> anyhow::Result<WeekendSet> {
    let days = raw
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<u32>()
                .with_context(|| format!("'{part}' is not a weekday number"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    WeekendSet::new(days).map_err(Into::into)
}

fn parse_holiday_list(raw: &str) -> anyhow::Result<Vec<Date>> {
    raw.split(',')
        .map(|part| {
            let part = part.trim();
            Date::parse_from_str(part, CalendarConfig::DATE_FORMAT)
                .with_context(|| format!("'{part}' is not a %Y-%m-%d date"))
        })
        .collect()
}

//
// weekend & holiday store
//
impl CalendarConfig {
    /// Replace the weekend set with the given weekday numbers.
    ///
    /// # Errors
    /// - [`CalendarError::InvalidWeekendDay`]: when any number is outside
    ///   `1..=7`. The configuration is left untouched in that case.
    pub fn set_weekend_days(
        &mut self,
        days: impl IntoIterator<Item = u32>,
    ) -> Result<(), CalendarError> {
        self.weekend = WeekendSet::new(days)?;
        Ok(())
    }

    #[inline]
    pub fn set_weekend(&mut self, weekend: WeekendSet) {
        self.weekend = weekend;
    }

    #[inline]
    pub fn weekend(&self) -> WeekendSet {
        self.weekend
    }

    /// Add one holiday from a `%Y-%m-%d` string. Adding a date twice is a
    /// no-op.
    ///
    /// # Errors
    /// - [`CalendarError::InvalidDate`]: when the string does not parse.
    pub fn add_holiday(&mut self, date: &str) -> Result<(), CalendarError> {
        let parsed = Self::parse_date(date)?;
        self.holidays.insert(parsed);
        Ok(())
    }

    /// Add one holiday as an already-parsed date.
    #[inline]
    pub fn insert_holiday(&mut self, date: Date) {
        self.holidays.insert(date);
    }

    /// Add several holidays from `%Y-%m-%d` strings.
    ///
    /// Entries are applied eagerly: when a later entry fails to parse, the
    /// earlier ones stay committed. Callers needing all-or-nothing behavior
    /// should validate the whole batch first.
    ///
    /// # Errors
    /// - [`CalendarError::InvalidDate`]: on the first entry that does not
    ///   parse.
    pub fn add_holidays<I, S>(&mut self, dates: I) -> Result<(), CalendarError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for date in dates {
            self.add_holiday(date.as_ref())?;
        }
        Ok(())
    }

    /// Remove a holiday. Absent or unparseable dates are ignored.
    pub fn remove_holiday(&mut self, date: &str) {
        if let Ok(parsed) = Self::parse_date(date) {
            self.holidays.remove(&parsed);
        }
    }

    /// The holiday dates, ascending.
    pub fn holidays(&self) -> impl Iterator<Item = Date> + '_ {
        self.holidays.iter().copied()
    }

    #[inline]
    pub fn clear_holidays(&mut self) {
        self.holidays.clear();
    }

    /// Merge the dates of a built-in named calendar ([`HolidayCalendar`]).
    /// An unknown name is a no-op, not an error.
    pub fn load_holiday_calendar(&mut self, name: &str) {
        match name.parse::<HolidayCalendar>() {
            Ok(calendar) => self.load_calendar(calendar),
            Err(_) => log::debug!("unknown holiday calendar '{name}', nothing loaded"),
        }
    }

    /// Merge the dates of a built-in named calendar.
    pub fn load_calendar(&mut self, calendar: HolidayCalendar) {
        self.holidays.extend(calendar.holidays());
    }

    /// Merge the holidays of a country and year from the attached source.
    ///
    /// `country` falls back to the configured default country. Without an
    /// attached source this is a no-op. A source failure is reported with a
    /// warning and the built-in local table is substituted, so this method
    /// never fails.
    pub fn load_holidays_from_source(&mut self, country: Option<&str>, year: i32) {
        let Some(source) = self.source.clone() else {
            return;
        };
        let country = country.unwrap_or(&self.default_country).to_owned();
        let dates = match source.fetch(&country, year) {
            Ok(dates) => dates,
            Err(err) => {
                log::warn!(
                    "holiday source failed for {country}/{year}: {err:#}. Falling back to the local table"
                );
                LocalHolidaySrc.fetch(&country, year).unwrap_or_default()
            }
        };
        self.holidays.extend(dates);
    }

    /// [`CalendarConfig::load_holidays_from_source`] for every year of the
    /// given span.
    pub fn load_holidays_for_years(&mut self, country: Option<&str>, years: RangeInclusive<i32>) {
        for year in years {
            self.load_holidays_from_source(country, year);
        }
    }

    #[inline]
    pub fn set_default_country(&mut self, country: impl Into<String>) {
        self.default_country = country.into();
    }

    #[inline]
    pub fn default_country(&self) -> &str {
        &self.default_country
    }

    /// Restore the default weekend and clear the holidays. The default
    /// country and the attached source are construction-time wiring and
    /// survive.
    pub fn reset(&mut self) {
        self.weekend = WeekendSet::default();
        self.holidays.clear();
    }

    fn parse_date(input: &str) -> Result<Date, CalendarError> {
        Date::parse_from_str(input, Self::DATE_FORMAT).map_err(|_| CalendarError::InvalidDate {
            input: input.to_owned(),
        })
    }
}

//
// predicate & walker
//
impl CalendarConfig {
    /// Check that the date is neither a weekend weekday nor a holiday.
    #[inline]
    pub fn is_business_day(&self, date: Date) -> bool {
        !self.weekend.contains(date.weekday()) && !self.holidays.contains(&date)
    }

    /// The first business day strictly after `date`.
    ///
    /// The walk advances one calendar day at a time and never returns `date`
    /// itself, even when it already is a business day.
    ///
    /// # Panics
    /// Panics when the walk exhausts the representable dates, which is only
    /// reachable when every weekday is configured as weekend.
    pub fn next_business_day(&self, date: Date) -> Date {
        let mut current = date;
        loop {
            current = current
                .succ_opt()
                .expect("no business day between the date and the end of the supported range");
            if self.is_business_day(current) {
                return current;
            }
        }
    }

    /// The first business day strictly before `date`.
    ///
    /// The walk retreats one calendar day at a time and never returns `date`
    /// itself, even when it already is a business day.
    ///
    /// # Panics
    /// Panics when the walk exhausts the representable dates, which is only
    /// reachable when every weekday is configured as weekend.
    pub fn previous_business_day(&self, date: Date) -> Date {
        let mut current = date;
        loop {
            current = current
                .pred_opt()
                .expect("no business day between the date and the start of the supported range");
            if self.is_business_day(current) {
                return current;
            }
        }
    }

    /// Count the business days in the closed interval `[start, end]`.
    ///
    /// The scan is day-by-day, O(days in range). `start > end` yields 0.
    pub fn count_business_days(&self, start: Date, end: Date) -> usize {
        start
            .iter_days()
            .take_while(|day| *day <= end)
            .filter(|day| self.is_business_day(*day))
            .count()
    }
}
