use bizday_chrono::timepoint::{Clock, ClockError, Date, DateTime, Tz};
use chrono::Days;

// -----------------------------------------------------------------------------
// DateRange
// -----------------------------------------------------------------------------
/// Closed interval `[start, end]` of timezone-aware instants.
///
/// # Overview
/// The range is an immutable value: every operation that looks mutating
/// ([`DateRange::shift`], [`DateRange::to_timezone`] and the business-day
/// operations) returns a new range and leaves the original untouched.
///
/// Construction does not force `start <= end`. A range whose start is after
/// its end is *empty*: it contains no instant, its duration is 0 and every
/// day-level query over it yields nothing. Such ranges fall out of
/// business-day expansion over a weekend, see
/// [`DateRange::expand_to_business_days`](DateRange::expand_to_business_days).
///
/// # Example
/// ```
/// use bizday_ranges::DateRange;
///
/// let range = DateRange::from("2024-01-01").unwrap().to("2024-01-07").unwrap();
///
/// assert_eq!(range.duration_in_days(), 7);
/// assert!(range.contains(&range.start()));
///
/// let next_week = range.shift(7);
/// assert_eq!(next_week.duration_in_days(), 7);
/// assert!(!next_week.overlaps(&range));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime,
    end: DateTime,
}

//
// ctors
//
impl DateRange {
    /// A range between two already-built instants. The ordering of the
    /// endpoints is not checked; `start > end` builds an empty range.
    #[inline]
    pub fn new(start: DateTime, end: DateTime) -> Self {
        Self { start, end }
    }

    /// A single-day range at `start`, parsed with the environment clock
    /// ([`Clock::from_env`]).
    ///
    /// # Errors
    /// - [`ClockError::InvalidDate`]: when the string does not parse.
    #[allow(clippy::should_implement_trait)]
    pub fn from(start: &str) -> Result<Self, ClockError> {
        Self::from_in(&Clock::from_env(), start)
    }

    /// A single-day range at `start`, parsed with the given clock.
    ///
    /// # Errors
    /// - [`ClockError::InvalidDate`]: when the string does not parse.
    pub fn from_in(clock: &Clock, start: &str) -> Result<Self, ClockError> {
        let start = clock.parse(start)?;
        Ok(Self { start, end: start })
    }

    /// Replace the end of the range. The string is parsed in the timezone of
    /// the start.
    ///
    /// # Errors
    /// - [`ClockError::InvalidDate`]: when the string does not parse.
    pub fn to(self, end: &str) -> Result<Self, ClockError> {
        let end = Clock::new(self.start.timezone()).parse(end)?;
        Ok(Self {
            start: self.start,
            end,
        })
    }
}

//
// methods
//
impl DateRange {
    #[inline]
    pub fn start(&self) -> DateTime {
        self.start
    }

    #[inline]
    pub fn end(&self) -> DateTime {
        self.end
    }

    #[inline]
    pub fn start_date(&self) -> Date {
        self.start.date_naive()
    }

    #[inline]
    pub fn end_date(&self) -> Date {
        self.end.date_naive()
    }

    /// Check that the start instant is after the end instant.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Check that `start <= instant <= end`.
    #[inline]
    pub fn contains(&self, instant: &DateTime) -> bool {
        self.start <= *instant && *instant <= self.end
    }

    /// Check that the two ranges share at least one instant. Touching
    /// endpoints count as overlap.
    #[inline]
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Move both endpoints by whole calendar days, negative for backward.
    /// Local time-of-day and duration are preserved.
    ///
    /// # Panics
    /// Panics when a shifted endpoint is not representable (out of chrono's
    /// date range, or a local time skipped by a DST transition).
    pub fn shift(&self, days: i64) -> Self {
        Self {
            start: shift_days(self.start, days),
            end: shift_days(self.end, days),
        }
    }

    /// The inclusive day count `(end date - start date) + 1`.
    ///
    /// A single-day range has duration 1; an empty range has duration 0.
    pub fn duration_in_days(&self) -> i64 {
        let days = self
            .end_date()
            .signed_duration_since(self.start_date())
            .num_days()
            + 1;
        days.max(0)
    }

    /// The timezone of the range, taken from its start.
    #[inline]
    pub fn timezone(&self) -> Tz {
        self.start.timezone()
    }

    /// Convert both endpoints into another timezone. The instants are
    /// preserved.
    ///
    /// # Errors
    /// - [`ClockError::InvalidTimezone`]: when the identifier is not a known
    ///   IANA name.
    pub fn to_timezone(&self, id: &str) -> Result<Self, ClockError> {
        Ok(Self {
            start: Clock::convert(&self.start, id)?,
            end: Clock::convert(&self.end, id)?,
        })
    }
}

fn shift_days(instant: DateTime, days: i64) -> DateTime {
    let shifted = if days >= 0 {
        instant.checked_add_days(Days::new(days as u64))
    } else {
        instant.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.expect("shifted endpoint is not representable")
}
