mod config;
mod error;
mod named;
mod source;
mod weekend;

pub use config::CalendarConfig;
pub use error::CalendarError;
pub use named::HolidayCalendar;
pub use source::{HolidaySrc, LocalHolidaySrc, WithLocalFallback};
pub use weekend::WeekendSet;
