use chrono::Days;

use crate::DateRange;

/// Sort ranges by their start instant, ascending. The sort is stable, so
/// ranges with equal starts keep their input order.
pub fn sort_ranges_by_start(mut ranges: Vec<DateRange>) -> Vec<DateRange> {
    ranges.sort_by(|a, b| a.start().cmp(&b.start()));
    ranges
}

/// Merge overlapping or day-adjacent ranges.
///
/// The ranges are sorted by start, then swept left to right: the running
/// range absorbs the next one when the two overlap or when the next starts
/// exactly one calendar day after the running end. The result is ascending,
/// non-overlapping and non-adjacent, which also makes the operation
/// idempotent. Inputs of length 0 or 1 are returned unchanged.
///
/// # Example
/// ```
/// use bizday_ranges::{merge_ranges, DateRange};
///
/// let range = |s, e| DateRange::from(s).unwrap().to(e).unwrap();
///
/// let merged = merge_ranges(vec![
///     range("2024-01-01", "2024-01-10"),
///     range("2024-01-08", "2024-01-15"),
///     range("2024-01-20", "2024-01-25"),
/// ]);
///
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0], range("2024-01-01", "2024-01-15"));
/// assert_eq!(merged[1], range("2024-01-20", "2024-01-25"));
/// ```
pub fn merge_ranges(ranges: Vec<DateRange>) -> Vec<DateRange> {
    if ranges.len() <= 1 {
        return ranges;
    }

    let sorted = sort_ranges_by_start(ranges);
    let mut merged = Vec::with_capacity(sorted.len());
    let mut iter = sorted.into_iter();
    let mut current = iter.next().expect("length checked above");

    for next in iter {
        if current.overlaps(&next) || adjacent(&current, &next) {
            current = DateRange::new(
                current.start().min(next.start()),
                current.end().max(next.end()),
            );
        } else {
            merged.push(current);
            current = next;
        }
    }

    merged.push(current);
    merged
}

fn adjacent(current: &DateRange, next: &DateRange) -> bool {
    current.end().checked_add_days(Days::new(1)) == Some(next.start())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::from(start).unwrap().to(end).unwrap()
    }

    #[test]
    fn test_sort_by_start() {
        let ranges = vec![
            range("2024-03-01", "2024-03-05"),
            range("2024-01-01", "2024-01-05"),
            range("2024-02-01", "2024-02-05"),
        ];

        let sorted = sort_ranges_by_start(ranges);

        assert_eq!(
            sorted,
            vec![
                range("2024-01-01", "2024-01-05"),
                range("2024-02-01", "2024-02-05"),
                range("2024-03-01", "2024-03-05"),
            ]
        );
    }

    #[test]
    fn test_sort_is_stable() {
        let ranges = vec![
            range("2024-01-01", "2024-01-10"),
            range("2024-01-01", "2024-01-05"),
        ];

        let sorted = sort_ranges_by_start(ranges.clone());

        assert_eq!(sorted, ranges);
    }

    #[test]
    fn test_merge_overlapping() {
        let merged = merge_ranges(vec![
            range("2024-01-01", "2024-01-10"),
            range("2024-01-08", "2024-01-15"),
            range("2024-01-20", "2024-01-25"),
        ]);

        assert_eq!(
            merged,
            vec![
                range("2024-01-01", "2024-01-15"),
                range("2024-01-20", "2024-01-25"),
            ]
        );
    }

    #[test]
    fn test_merge_adjacent() {
        let merged = merge_ranges(vec![
            range("2024-01-01", "2024-01-05"),
            range("2024-01-06", "2024-01-10"),
        ]);

        assert_eq!(merged, vec![range("2024-01-01", "2024-01-10")]);
    }

    #[test]
    fn test_merge_keeps_gap() {
        let ranges = vec![
            range("2024-01-01", "2024-01-05"),
            range("2024-01-07", "2024-01-10"),
        ];

        let merged = merge_ranges(ranges.clone());

        assert_eq!(merged, ranges);
    }

    #[test]
    fn test_merge_contained_range() {
        let merged = merge_ranges(vec![
            range("2024-01-01", "2024-01-31"),
            range("2024-01-10", "2024-01-15"),
        ]);

        assert_eq!(merged, vec![range("2024-01-01", "2024-01-31")]);
    }

    #[test]
    fn test_merge_unsorted_input() {
        let merged = merge_ranges(vec![
            range("2024-01-20", "2024-01-25"),
            range("2024-01-08", "2024-01-15"),
            range("2024-01-01", "2024-01-10"),
        ]);

        assert_eq!(
            merged,
            vec![
                range("2024-01-01", "2024-01-15"),
                range("2024-01-20", "2024-01-25"),
            ]
        );
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::single(vec![range("2024-01-01", "2024-01-05")])]
    fn test_merge_short_input_unchanged(#[case] ranges: Vec<DateRange>) {
        let merged = merge_ranges(ranges.clone());

        assert_eq!(merged, ranges);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let once = merge_ranges(vec![
            range("2024-01-01", "2024-01-10"),
            range("2024-01-08", "2024-01-15"),
            range("2024-01-16", "2024-01-18"),
            range("2024-02-01", "2024-02-05"),
        ]);

        let twice = merge_ranges(once.clone());

        assert_eq!(twice, once);
    }
}
