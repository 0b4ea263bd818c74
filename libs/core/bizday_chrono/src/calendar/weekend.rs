use chrono::Weekday;

use super::error::CalendarError;

// -----------------------------------------------------------------------------
// WeekendSet
// -----------------------------------------------------------------------------
/// The weekdays treated as non-working days.
///
/// Days are identified by ISO weekday numbers (1=Monday .. 7=Sunday).
/// Duplicates collapse and every number must be within `1..=7`.
/// The default set is Saturday and Sunday.
///
/// # Example
/// ```
/// use bizday_chrono::calendar::WeekendSet;
/// use chrono::Weekday;
///
/// let weekend = WeekendSet::default();
/// assert!(weekend.contains(Weekday::Sat));
/// assert!(!weekend.contains(Weekday::Fri));
///
/// // Friday and Saturday, duplicates collapsed
/// let weekend = WeekendSet::new([5, 6, 6]).unwrap();
/// assert_eq!(weekend.days().collect::<Vec<_>>(), vec![5, 6]);
///
/// assert!(WeekendSet::new([0]).is_err());
/// assert!(WeekendSet::new([8]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekendSet(u8); // bit n-1 is set when weekday n is a weekend

impl Default for WeekendSet {
    #[inline]
    fn default() -> Self {
        // Saturday and Sunday
        Self(1 << 5 | 1 << 6)
    }
}

//
// ser/de
//
impl serde::Serialize for WeekendSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.days())
    }
}

impl<'de> serde::Deserialize<'de> for WeekendSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let days = Vec::<u32>::deserialize(deserializer)?;
        Self::new(days).map_err(serde::de::Error::custom)
    }
}

//
// ctors
//
impl WeekendSet {
    /// Build a weekend set from weekday numbers.
    ///
    /// # Errors
    /// - [`CalendarError::InvalidWeekendDay`]: when any number is outside `1..=7`.
    pub fn new(days: impl IntoIterator<Item = u32>) -> Result<Self, CalendarError> {
        let mut bits = 0u8;
        for day in days {
            if !(1..=7).contains(&day) {
                return Err(CalendarError::InvalidWeekendDay { day });
            }
            bits |= 1 << (day - 1);
        }
        Ok(Self(bits))
    }

    /// A set with no weekend days at all. Every weekday counts as working.
    #[inline]
    pub fn empty() -> Self {
        Self(0)
    }
}

//
// methods
//
impl WeekendSet {
    #[inline]
    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 >> (weekday.number_from_monday() - 1) & 1 == 1
    }

    /// The weekday numbers of the set, ascending.
    pub fn days(&self) -> impl Iterator<Item = u32> {
        let bits = self.0;
        (1..=7u32).filter(move |day| bits >> (day - 1) & 1 == 1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::default_weekend(vec![6, 7], vec![6, 7])]
    #[case::friday_saturday(vec![5, 6], vec![5, 6])]
    #[case::unsorted(vec![7, 1], vec![1, 7])]
    #[case::duplicates(vec![6, 6, 7, 7], vec![6, 7])]
    #[case::all(vec![1, 2, 3, 4, 5, 6, 7], vec![1, 2, 3, 4, 5, 6, 7])]
    #[case::none(vec![], vec![])]
    fn test_new_ok(#[case] days: Vec<u32>, #[case] expected: Vec<u32>) {
        let weekend = WeekendSet::new(days).unwrap();

        assert_eq!(weekend.days().collect::<Vec<_>>(), expected);
        assert_eq!(weekend.len(), expected.len());
    }

    #[rstest]
    #[case(vec![0], 0)]
    #[case(vec![8], 8)]
    #[case(vec![6, 7, 100], 100)]
    fn test_new_ng(#[case] days: Vec<u32>, #[case] bad: u32) {
        let weekend = WeekendSet::new(days);

        assert_eq!(weekend, Err(CalendarError::InvalidWeekendDay { day: bad }));
    }

    #[test]
    fn test_default() {
        let weekend = WeekendSet::default();

        assert_eq!(weekend, WeekendSet::new([6, 7]).unwrap());
    }

    #[rstest]
    #[case(Weekday::Mon, false)]
    #[case(Weekday::Fri, false)]
    #[case(Weekday::Sat, true)]
    #[case(Weekday::Sun, true)]
    fn test_contains_default(#[case] weekday: Weekday, #[case] expected: bool) {
        let weekend = WeekendSet::default();

        assert_eq!(weekend.contains(weekday), expected);
    }

    #[test]
    fn test_empty() {
        let weekend = WeekendSet::empty();

        assert!(weekend.is_empty());
        assert_eq!(weekend.days().count(), 0);
        assert!(!weekend.contains(Weekday::Sat));
    }

    #[test]
    fn test_serialize() {
        let weekend = WeekendSet::new([7, 6]).unwrap();

        let json = serde_json::to_value(weekend).unwrap();

        assert_eq!(json, serde_json::json!([6, 7]));
    }

    #[test]
    fn test_deserialize() {
        let weekend: WeekendSet = serde_json::from_value(serde_json::json!([5, 6])).unwrap();

        assert_eq!(weekend, WeekendSet::new([5, 6]).unwrap());
    }

    #[test]
    fn test_deserialize_ng() {
        let weekend = serde_json::from_value::<WeekendSet>(serde_json::json!([5, 9]));

        assert!(weekend.is_err());
    }
}
