use chrono::NaiveDate;

use crate::domain::models::schedule_exception::{ExceptionKind, ScheduleException};

/// One exception interval in effect on a concrete date, in minutes since
/// midnight. Interpretation of the kind belongs to the slot generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionInterval {
    pub start_min: i32,
    pub end_min: i32,
    pub kind: ExceptionKind,
}

/// Filters the full exception set down to the intervals effective on
/// `date`: one-off matches, range matches and recurring weekday matches.
/// Intervals are returned independently (no merging); overlapping block
/// intervals simply compose additively downstream.
pub fn effective_exceptions(
    date: NaiveDate,
    exceptions: &[ScheduleException],
) -> Vec<ExceptionInterval> {
    let mut intervals: Vec<ExceptionInterval> = exceptions
        .iter()
        .filter(|e| e.scope.applies_on(date))
        .map(|e| ExceptionInterval {
            start_min: e.start_min,
            end_min: e.end_min,
            kind: e.kind,
        })
        .collect();

    intervals.sort_by_key(|i| (i.start_min, i.end_min));
    intervals
}
