use bizday_chrono::calendar::CalendarConfig;
use bizday_chrono::timepoint::{Date, DateTime};
use chrono::{Datelike, LocalResult, TimeZone};

use crate::DateRange;

//
// business-day operations
//
// Every operation first loads the holidays of each calendar year spanned by
// the range from the configuration's source (for the given country, or the
// configured default country when none is given), then works on dates. A
// configuration without a source loads nothing and acts as a plain offline
// calendar.
impl DateRange {
    /// Count the business days in `[start, end]`.
    ///
    /// # Example
    /// ```
    /// use bizday_chrono::calendar::CalendarConfig;
    /// use bizday_ranges::DateRange;
    ///
    /// let mut cal = CalendarConfig::new();
    /// let range = DateRange::from("2024-01-01").unwrap().to("2024-01-07").unwrap();
    ///
    /// assert_eq!(range.business_days_in_range(&mut cal, None), 5);
    /// assert_eq!(range.non_business_days_in_range(&mut cal, None), 2);
    /// ```
    pub fn business_days_in_range(
        &self,
        cal: &mut CalendarConfig,
        country: Option<&str>,
    ) -> usize {
        self.load_span(cal, country);
        cal.count_business_days(self.start_date(), self.end_date())
    }

    /// Count the non-business days in `[start, end]`.
    pub fn non_business_days_in_range(
        &self,
        cal: &mut CalendarConfig,
        country: Option<&str>,
    ) -> usize {
        let business = self.business_days_in_range(cal, country);
        (self.duration_in_days() as usize).saturating_sub(business)
    }

    /// Move both endpoints by `n` business days, negative for backward.
    ///
    /// The endpoints are walked independently, one business day at a time,
    /// `|n|` times each. The business-day distance between the endpoints is
    /// preserved; the calendar-day duration may change when the endpoints
    /// cross different holiday patterns. `n = 0` returns the range unchanged.
    pub fn shift_business_days(
        &self,
        n: i32,
        cal: &mut CalendarConfig,
        country: Option<&str>,
    ) -> Self {
        if n == 0 {
            return *self;
        }
        self.load_span(cal, country);
        let mut start = self.start_date();
        let mut end = self.end_date();
        for _ in 0..n.unsigned_abs() {
            if n > 0 {
                start = cal.next_business_day(start);
                end = cal.next_business_day(end);
            } else {
                start = cal.previous_business_day(start);
                end = cal.previous_business_day(end);
            }
        }
        Self::new(
            rebind_date(self.start(), start),
            rebind_date(self.end(), end),
        )
    }

    /// Advance the start forward and retreat the end backward until both are
    /// business days. Endpoints that already are business days stay put.
    ///
    /// When the range holds no business day at all (a weekend, say), the
    /// start moves past the end and the result is an empty range.
    pub fn expand_to_business_days(&self, cal: &mut CalendarConfig, country: Option<&str>) -> Self {
        self.load_span(cal, country);
        let start = if cal.is_business_day(self.start_date()) {
            self.start_date()
        } else {
            cal.next_business_day(self.start_date())
        };
        let end = if cal.is_business_day(self.end_date()) {
            self.end_date()
        } else {
            cal.previous_business_day(self.end_date())
        };
        Self::new(
            rebind_date(self.start(), start),
            rebind_date(self.end(), end),
        )
    }

    /// Split `[start, end]` into the maximal runs of consecutive business
    /// days, in chronological order.
    ///
    /// The sub-ranges carry the time-of-day and timezone of the range start.
    /// A range without business days yields no sub-ranges.
    pub fn business_day_ranges(
        &self,
        cal: &mut CalendarConfig,
        country: Option<&str>,
    ) -> Vec<Self> {
        self.load_span(cal, country);
        let mut ranges = Vec::new();
        let mut run: Option<(Date, Date)> = None;
        for day in self.days() {
            if cal.is_business_day(day) {
                run = match run {
                    None => Some((day, day)),
                    Some((first, _)) => Some((first, day)),
                };
            } else if let Some((first, last)) = run.take() {
                ranges.push(self.subrange(first, last));
            }
        }
        if let Some((first, last)) = run {
            ranges.push(self.subrange(first, last));
        }
        ranges
    }

    /// Check that every day in `[start, end]` is a business day.
    ///
    /// Stops at the first non-business day. An empty range is vacuously
    /// all-business.
    pub fn is_business_days_only(&self, cal: &mut CalendarConfig, country: Option<&str>) -> bool {
        self.load_span(cal, country);
        self.days().all(|day| cal.is_business_day(day))
    }

    fn days(&self) -> impl Iterator<Item = Date> {
        let end = self.end_date();
        self.start_date().iter_days().take_while(move |day| *day <= end)
    }

    fn subrange(&self, first: Date, last: Date) -> Self {
        Self::new(
            rebind_date(self.start(), first),
            rebind_date(self.start(), last),
        )
    }

    fn load_span(&self, cal: &mut CalendarConfig, country: Option<&str>) {
        let from = self.start_date().year();
        let to = self.end_date().year();
        if from > to {
            return;
        }
        cal.load_holidays_for_years(country, from..=to);
    }
}

// Reattach a walked date to the time-of-day and timezone of the instant. An
// ambiguous local time resolves to the earliest reading, a nonexistent one
// (DST gap) to the UTC reading.
fn rebind_date(instant: DateTime, date: Date) -> DateTime {
    let tz = instant.timezone();
    let naive = date.and_time(instant.time());
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => tz.from_utc_datetime(&naive),
    }
}
