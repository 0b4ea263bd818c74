use crate::timepoint::Date;

// -----------------------------------------------------------------------------
// HolidayCalendar
// -----------------------------------------------------------------------------
/// A built-in named holiday calendar for the 2024 reference year.
///
/// The names parse through [`FromStr`](std::str::FromStr), so callers holding
/// a plain string can go through
/// [`CalendarConfig::load_holiday_calendar`](super::CalendarConfig::load_holiday_calendar),
/// which treats an unknown name as a no-op.
///
/// # Example
/// ```
/// use bizday_chrono::calendar::HolidayCalendar;
///
/// let cal: HolidayCalendar = "US".parse().unwrap();
/// assert_eq!(cal.holidays().count(), 10);
/// assert!("XX".parse::<HolidayCalendar>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
pub enum HolidayCalendar {
    US,
    EU,
    TR,
}

const US: &[(i32, u32, u32)] = &[
    (2024, 1, 1),   // New Year's Day
    (2024, 1, 15),  // Martin Luther King Jr. Day
    (2024, 2, 19),  // Presidents' Day
    (2024, 5, 27),  // Memorial Day
    (2024, 7, 4),   // Independence Day
    (2024, 9, 2),   // Labor Day
    (2024, 10, 14), // Columbus Day
    (2024, 11, 11), // Veterans Day
    (2024, 11, 28), // Thanksgiving Day
    (2024, 12, 25), // Christmas Day
];

const EU: &[(i32, u32, u32)] = &[
    (2024, 1, 1),   // New Year's Day
    (2024, 5, 1),   // Labor Day
    (2024, 5, 8),   // Victory in Europe Day
    (2024, 12, 25), // Christmas Day
    (2024, 12, 26), // Boxing Day
];

const TR: &[(i32, u32, u32)] = &[
    (2024, 1, 1), // New Year's Day
    (2024, 4, 10), // Ramadan Feast
    (2024, 4, 11),
    (2024, 4, 12),
    (2024, 4, 23), // National Sovereignty and Children's Day
    (2024, 5, 1),  // Labor Day
    (2024, 5, 19), // Commemoration of Ataturk, Youth and Sports Day
    (2024, 6, 16), // Sacrifice Feast
    (2024, 6, 17),
    (2024, 6, 18),
    (2024, 6, 19),
    (2024, 7, 15),  // Democracy and National Unity Day
    (2024, 8, 30),  // Victory Day
    (2024, 10, 29), // Republic Day
];

impl HolidayCalendar {
    /// The dates of the calendar, ascending.
    pub fn holidays(&self) -> impl Iterator<Item = Date> {
        let table = match self {
            Self::US => US,
            Self::EU => EU,
            Self::TR => TR,
        };
        table
            .iter()
            .filter_map(|&(y, m, d)| Date::from_ymd_opt(y, m, d))
    }
}
