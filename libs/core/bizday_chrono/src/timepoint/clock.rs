use std::str::FromStr;

use chrono::LocalResult;

use super::{Date, DateTime, Tz};

// -----------------------------------------------------------------------------
// ClockError
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq, Hash)]
pub enum ClockError {
    #[error("invalid timezone '{input}'. Only IANA identifiers such as 'Europe/Istanbul' are supported")]
    InvalidTimezone { input: String },
    #[error("invalid date '{input}'. Only '%Y-%m-%d', '%Y-%m-%dT%H:%M:%S' or RFC3339 strings are supported")]
    InvalidDate { input: String },
}

// -----------------------------------------------------------------------------
// Clock
// -----------------------------------------------------------------------------
/// Object interpreting date strings in a fixed default timezone.
///
/// # Overview
/// The clock holds the timezone used to read date strings which carry no
/// offset of their own. Three input shapes are accepted by [`Clock::parse`]:
/// RFC3339 (the embedded offset wins, the result is converted into the
/// clock's zone), a naive datetime (`%Y-%m-%dT%H:%M:%S`) and a plain date
/// (`%Y-%m-%d`, read as midnight). Naive inputs are localized in the clock's
/// zone; an ambiguous local time resolves to the earliest reading and a
/// nonexistent one (DST gap) fails with [`ClockError::InvalidDate`].
///
/// ```
/// use bizday_chrono::timepoint::Clock;
///
/// let clock = Clock::try_new("Europe/Istanbul").unwrap();
///
/// let dt = clock.parse("2024-01-01").unwrap();
/// assert_eq!(dt.to_rfc3339(), "2024-01-01T00:00:00+03:00");
///
/// let dt = clock.parse("2024-01-01T12:34:56Z").unwrap();
/// assert_eq!(dt.to_rfc3339(), "2024-01-01T15:34:56+03:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    tz: Tz,
}

impl Default for Clock {
    #[inline]
    fn default() -> Self {
        Self { tz: Tz::UTC }
    }
}

//
// ctors
//
impl Clock {
    /// Environment variable read by [`Clock::from_env`].
    pub const ENV_TIMEZONE: &'static str = "BIZDAY_TIMEZONE";

    #[inline]
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Create a clock from a timezone identifier.
    ///
    /// # Errors
    /// - [`ClockError::InvalidTimezone`]: when the identifier is not a known
    ///   IANA name.
    pub fn try_new(id: &str) -> Result<Self, ClockError> {
        Tz::from_str(id)
            .map(Self::new)
            .map_err(|_| ClockError::InvalidTimezone {
                input: id.to_owned(),
            })
    }

    /// Create a clock from the `BIZDAY_TIMEZONE` environment variable.
    ///
    /// An unset variable yields UTC. An invalid identifier is reported with
    /// a warning and also yields UTC, so this constructor never fails.
    pub fn from_env() -> Self {
        let raw = std::env::var(Self::ENV_TIMEZONE).ok();
        Self::new(resolve_env_tz(raw.as_deref()))
    }
}

fn resolve_env_tz(raw: Option<&str>) -> Tz {
    let Some(raw) = raw else {
        return Tz::UTC;
    };
    match Tz::from_str(raw.trim()) {
        Ok(tz) => tz,
        Err(_) => {
            log::warn!(
                "invalid timezone '{raw}' in {}. Using UTC",
                Clock::ENV_TIMEZONE
            );
            Tz::UTC
        }
    }
}

//
// methods
//
impl Clock {
    #[inline]
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Check that the identifier names a known timezone.
    #[inline]
    pub fn is_valid_timezone(id: &str) -> bool {
        Tz::from_str(id).is_ok()
    }

    /// Parse a date string into an instant in the clock's timezone.
    ///
    /// # Errors
    /// - [`ClockError::InvalidDate`]: when the string matches none of the
    ///   supported shapes, or names a nonexistent local time.
    pub fn parse(&self, s: &str) -> Result<DateTime, ClockError> {
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&self.tz));
        }
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return self.localize(naive, s);
        }
        if let Ok(date) = Date::parse_from_str(s, "%Y-%m-%d") {
            return self.localize(date.and_time(chrono::NaiveTime::MIN), s);
        }
        Err(ClockError::InvalidDate {
            input: s.to_owned(),
        })
    }

    /// Convert an instant into another timezone. The instant is preserved.
    ///
    /// # Errors
    /// - [`ClockError::InvalidTimezone`]: when the identifier is not a known
    ///   IANA name.
    pub fn convert(instant: &DateTime, id: &str) -> Result<DateTime, ClockError> {
        let tz = Tz::from_str(id).map_err(|_| ClockError::InvalidTimezone {
            input: id.to_owned(),
        })?;
        Ok(instant.with_timezone(&tz))
    }

    fn localize(&self, naive: chrono::NaiveDateTime, input: &str) -> Result<DateTime, ClockError> {
        match naive.and_local_timezone(self.tz) {
            LocalResult::Single(dt) => Ok(dt),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest),
            LocalResult::None => Err(ClockError::InvalidDate {
                input: input.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("UTC", true)]
    #[case("Europe/Istanbul", true)]
    #[case("America/New_York", true)]
    #[case("Mars/Olympus", false)]
    #[case("europe/istanbul", false)]
    #[case("", false)]
    fn test_try_new(#[case] id: &str, #[case] ok: bool) {
        let clock = Clock::try_new(id);

        if ok {
            assert_eq!(clock.unwrap().timezone(), id.parse::<Tz>().unwrap());
        } else {
            assert_eq!(
                clock,
                Err(ClockError::InvalidTimezone {
                    input: id.to_owned()
                })
            );
        }
        assert_eq!(Clock::is_valid_timezone(id), ok);
    }

    #[rstest]
    #[case(None, Tz::UTC)]
    #[case(Some("Asia/Tokyo"), Tz::Asia__Tokyo)]
    #[case(Some(" Asia/Tokyo "), Tz::Asia__Tokyo)]
    #[case(Some("NOT_A_ZONE"), Tz::UTC)]
    #[case(Some(""), Tz::UTC)]
    fn test_resolve_env_tz(#[case] raw: Option<&str>, #[case] expected: Tz) {
        let tz = resolve_env_tz(raw);

        assert_eq!(tz, expected);
    }

    #[rstest]
    #[case("2024-01-01", "2024-01-01T00:00:00+00:00")]
    #[case("2024-06-01T12:34:56", "2024-06-01T12:34:56+00:00")]
    #[case("2024-06-01T12:34:56Z", "2024-06-01T12:34:56+00:00")]
    #[case("2024-06-01T12:34:56+09:00", "2024-06-01T03:34:56+00:00")]
    fn test_parse_utc(#[case] s: &str, #[case] expected: &str) {
        let clock = Clock::default();

        let dt = clock.parse(s).unwrap();

        assert_eq!(dt.to_rfc3339(), expected);
    }

    #[rstest]
    #[case("2024-01-01", "2024-01-01T00:00:00+03:00")]
    #[case("2024-06-01T12:34:56", "2024-06-01T12:34:56+03:00")]
    #[case("2024-06-01T12:34:56Z", "2024-06-01T15:34:56+03:00")]
    fn test_parse_zoned(#[case] s: &str, #[case] expected: &str) {
        let clock = Clock::try_new("Europe/Istanbul").unwrap();

        let dt = clock.parse(s).unwrap();

        assert_eq!(dt.to_rfc3339(), expected);
    }

    #[test]
    fn test_parse_ambiguous_takes_earliest() {
        // DST ends in New York on 2023-11-05, 01:30 occurs twice
        let clock = Clock::try_new("America/New_York").unwrap();

        let dt = clock.parse("2023-11-05T01:30:00").unwrap();

        assert_eq!(dt.to_rfc3339(), "2023-11-05T01:30:00-04:00");
    }

    #[test]
    fn test_parse_nonexistent_local_time() {
        // DST starts in New York on 2024-03-10, 02:30 is skipped
        let clock = Clock::try_new("America/New_York").unwrap();

        let dt = clock.parse("2024-03-10T02:30:00");

        assert!(matches!(dt, Err(ClockError::InvalidDate { .. })));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-date")]
    #[case("2024/01/01")]
    #[case("2024-13-01")]
    #[case("2024-01-32")]
    #[case("01-01-2024")]
    #[case("2024-01-01 12:00:00")]
    fn test_parse_err(#[case] s: &str) {
        let clock = Clock::default();

        let dt = clock.parse(s);

        assert_eq!(
            dt,
            Err(ClockError::InvalidDate {
                input: s.to_owned()
            })
        );
    }

    #[test]
    fn test_convert_preserves_instant() {
        let clock = Clock::default();
        let dt = clock.parse("2024-06-01T12:34:56Z").unwrap();

        let converted = Clock::convert(&dt, "Asia/Tokyo").unwrap();

        assert_eq!(converted, dt);
        assert_eq!(converted.to_rfc3339(), "2024-06-01T21:34:56+09:00");
    }

    #[test]
    fn test_convert_invalid_timezone() {
        let clock = Clock::default();
        let dt = clock.parse("2024-06-01T12:34:56Z").unwrap();

        let converted = Clock::convert(&dt, "Not/AZone");

        assert_eq!(
            converted,
            Err(ClockError::InvalidTimezone {
                input: "Not/AZone".to_owned()
            })
        );
    }
}
