// -----------------------------------------------------------------------------
// CalendarError
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq, Hash)]
pub enum CalendarError {
    #[error("invalid weekend day {day}. Weekday numbers must be within 1..=7 (1=Monday, 7=Sunday)")]
    InvalidWeekendDay { day: u32 },
    #[error("invalid holiday date '{input}'. Only '%Y-%m-%d' strings are supported")]
    InvalidDate { input: String },
}
