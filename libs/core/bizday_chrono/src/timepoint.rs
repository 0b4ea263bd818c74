mod clock;

pub use clock::{Clock, ClockError};

/// A calendar date without time-of-day or timezone.
pub type Date = chrono::NaiveDate;

/// A timezone-aware point in time.
pub type DateTime = chrono::DateTime<Tz>;

pub use chrono_tz::Tz;
