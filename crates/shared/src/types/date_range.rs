//! Inclusive calendar date range.
//!
//! Every report in the dashboard is filtered by a pair of calendar days.
//! Both ends are inclusive: a range from 2024-01-01 to 2024-01-03 covers
//! three whole days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Inclusive range of calendar days `[start, end]`.
///
/// `start <= end` is expected but not enforced by [`DateRange::new`];
/// callers that accept user input should go through [`DateRange::validated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range without checking the bounds.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Creates a range covering a single day.
    #[must_use]
    pub const fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Creates a range, rejecting `start > end`.
    pub fn validated(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::Validation(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Returns true if `start <= end`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Returns true if `day` falls inside the range.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of calendar days covered, zero for an inverted range.
    #[must_use]
    pub fn day_count(&self) -> usize {
        if !self.is_valid() {
            return 0;
        }
        usize::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }

    /// Iterates every day of the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Day after `end`, used as the exclusive upper bound for timestamp
    /// comparisons. `None` only at the end of chrono's calendar.
    #[must_use]
    pub fn end_exclusive(&self) -> Option<NaiveDate> {
        self.end.succ_opt()
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2024, 1, 1), date(2024, 1, 1), 1)]
    #[case(date(2024, 1, 1), date(2024, 1, 3), 3)]
    #[case(date(2024, 2, 28), date(2024, 3, 1), 3)]
    #[case(date(2023, 12, 31), date(2024, 1, 1), 2)]
    #[case(date(2024, 1, 3), date(2024, 1, 1), 0)]
    fn test_day_count(#[case] start: NaiveDate, #[case] end: NaiveDate, #[case] expected: usize) {
        let range = DateRange::new(start, end);
        assert_eq!(range.day_count(), expected);
        assert_eq!(range.days().count(), expected);
    }

    #[test]
    fn test_days_ascending_and_inclusive() {
        let range = DateRange::new(date(2024, 1, 30), date(2024, 2, 2));
        let days: Vec<_> = range.days().collect();
        assert_eq!(
            days,
            vec![
                date(2024, 1, 30),
                date(2024, 1, 31),
                date(2024, 2, 1),
                date(2024, 2, 2)
            ]
        );
    }

    #[test]
    fn test_validated_rejects_inverted_range() {
        let result = DateRange::validated(date(2024, 1, 2), date(2024, 1, 1));
        assert!(matches!(result, Err(AppError::Validation(_))));

        let ok = DateRange::validated(date(2024, 1, 1), date(2024, 1, 1));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 3));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 3)));
        assert!(!range.contains(date(2023, 12, 31)));
        assert!(!range.contains(date(2024, 1, 4)));
    }

    #[test]
    fn test_end_exclusive_is_next_day() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(range.end_exclusive(), Some(date(2025, 1, 1)));
    }

    #[test]
    fn test_display() {
        let range = DateRange::single_day(date(2024, 5, 6));
        assert_eq!(range.to_string(), "2024-05-06..=2024-05-06");
    }

    #[test]
    fn test_serializes_as_iso_dates() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 3));
        let json = serde_json::to_value(range).unwrap();
        assert_eq!(json["start"], "2024-01-01");
        assert_eq!(json["end"], "2024-01-03");
    }
}
