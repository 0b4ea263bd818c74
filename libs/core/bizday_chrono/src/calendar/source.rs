use crate::timepoint::Date;

// -----------------------------------------------------------------------------
// HolidaySrc
// -----------------------------------------------------------------------------
/// Provider of the holiday dates of a country for one calendar year.
///
/// Implementations may sit on a network API, a database or a plain table;
/// the engine only sees `fetch`. A failing source should be wrapped in
/// [`WithLocalFallback`] so the failure never reaches business-day
/// arithmetic.
pub trait HolidaySrc {
    /// Fetch the holidays of an ISO 3166-1 alpha-2 country for a year.
    fn fetch(&self, country: &str, year: i32) -> anyhow::Result<Vec<Date>>;
}

// -----------------------------------------------------------------------------
// LocalHolidaySrc
// -----------------------------------------------------------------------------
// month-day patterns, instantiated for the requested year
const US: &[(u32, u32)] = &[
    (1, 1),   // New Year's Day
    (1, 15),  // Martin Luther King Jr. Day
    (2, 19),  // Presidents' Day
    (5, 27),  // Memorial Day
    (7, 4),   // Independence Day
    (9, 2),   // Labor Day
    (10, 14), // Columbus Day
    (11, 11), // Veterans Day
    (11, 28), // Thanksgiving Day
    (12, 25), // Christmas Day
];

const FR: &[(u32, u32)] = &[
    (1, 1),   // New Year's Day
    (5, 1),   // Labor Day
    (5, 8),   // Victory in Europe Day
    (7, 14),  // Bastille Day
    (8, 15),  // Assumption Day
    (11, 1),  // All Saints' Day
    (11, 11), // Armistice Day
    (12, 25), // Christmas Day
];

const DE: &[(u32, u32)] = &[
    (1, 1),   // New Year's Day
    (5, 1),   // Labor Day
    (10, 3),  // German Unity Day
    (12, 25), // Christmas Day
    (12, 26), // Boxing Day
];

const GB: &[(u32, u32)] = &[
    (1, 1),   // New Year's Day
    (12, 25), // Christmas Day
    (12, 26), // Boxing Day
];

const TR: &[(u32, u32)] = &[
    (1, 1),   // New Year's Day
    (4, 23),  // National Sovereignty and Children's Day
    (5, 1),   // Labor Day
    (5, 19),  // Commemoration of Ataturk, Youth and Sports Day
    (7, 15),  // Democracy and National Unity Day
    (8, 30),  // Victory Day
    (10, 29), // Republic Day
];

/// The built-in offline holiday table.
///
/// Holds fixed month-day patterns for a handful of countries and stamps them
/// with the requested year. An unsupported country yields an empty list, not
/// an error, and `fetch` never fails.
///
/// # Example
/// ```
/// use bizday_chrono::calendar::{HolidaySrc, LocalHolidaySrc};
///
/// let holidays = LocalHolidaySrc.fetch("GB", 2025).unwrap();
/// assert_eq!(holidays.len(), 3);
///
/// let holidays = LocalHolidaySrc.fetch("ZW", 2025).unwrap();
/// assert!(holidays.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalHolidaySrc;

impl LocalHolidaySrc {
    /// Countries with a built-in table.
    pub const SUPPORTED: &'static [&'static str] = &["US", "FR", "DE", "GB", "TR"];

    /// Check whether a country has a built-in table. Case-insensitive.
    pub fn supports(country: &str) -> bool {
        Self::SUPPORTED.contains(&country.to_ascii_uppercase().as_str())
    }

    fn table(country: &str) -> &'static [(u32, u32)] {
        match country.to_ascii_uppercase().as_str() {
            "US" => US,
            "FR" => FR,
            "DE" => DE,
            "GB" => GB,
            "TR" => TR,
            _ => &[],
        }
    }
}

impl HolidaySrc for LocalHolidaySrc {
    fn fetch(&self, country: &str, year: i32) -> anyhow::Result<Vec<Date>> {
        let dates = Self::table(country)
            .iter()
            .filter_map(|&(month, day)| Date::from_ymd_opt(year, month, day))
            .collect();
        Ok(dates)
    }
}

// -----------------------------------------------------------------------------
// WithLocalFallback
// -----------------------------------------------------------------------------
/// Recovery combinator around a fallible holiday source.
///
/// Queries the wrapped source first; when it fails, the failure is reported
/// with a warning and the result of [`LocalHolidaySrc`] is substituted, so
/// `fetch` always succeeds with some (possibly empty) set of dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithLocalFallback<S> {
    inner: S,
}

impl<S> WithLocalFallback<S> {
    #[inline]
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: HolidaySrc> HolidaySrc for WithLocalFallback<S> {
    fn fetch(&self, country: &str, year: i32) -> anyhow::Result<Vec<Date>> {
        self.inner.fetch(country, year).or_else(|err| {
            log::warn!(
                "holiday source failed for {country}/{year}: {err:#}. Falling back to the local table"
            );
            LocalHolidaySrc.fetch(country, year)
        })
    }
}
