//! Derived activity statistics over the build log.
//!
//! A pure function of the log sequence and "today": no cached state, no IO.
//! Callers recompute once at startup from the loaded log and again on every
//! change-bus payload.

use chrono::{Duration, NaiveDate};

use crate::model::LogEntry;

/// Width of the rolling activity window, in calendar days.
pub const WINDOW_DAYS: i64 = 7;

/// One calendar day's aggregated log count within the trailing window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyBucket {
    /// Short weekday name ("Mon", "Tue", ...).
    pub day_label: String,
    pub date: NaiveDate,
    pub count: u32,
}

/// Fully derived statistics. An empty log yields the distinguishable
/// "no data" state: all-zero counts with an empty `weekly` vector, as
/// opposed to seven zero-count buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityStats {
    pub total_logs: usize,
    pub logs_this_week: u32,
    pub current_streak: usize,
    pub weekly: Vec<WeeklyBucket>,
}

/// Derive statistics from the raw log.
///
/// Buckets cover `[today - 6, today]` inclusive, oldest first. Entries
/// outside the window (older, or clock-skewed past today) and entries whose
/// stored timestamp fails to parse are silently skipped; `total_logs` still
/// counts them. The streak counts consecutive active days ending today and
/// stops at the first inactive day.
#[must_use]
pub fn recompute(logs: &[LogEntry], today: NaiveDate) -> ActivityStats {
    if logs.is_empty() {
        return ActivityStats::default();
    }

    let mut weekly: Vec<WeeklyBucket> = (0..WINDOW_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            WeeklyBucket {
                day_label: date.format("%a").to_string(),
                date,
                count: 0,
            }
        })
        .collect();

    for entry in logs {
        let Some(day) = entry.calendar_day() else {
            continue;
        };
        if let Some(bucket) = weekly.iter_mut().find(|bucket| bucket.date == day) {
            bucket.count += 1;
        }
    }

    let logs_this_week = weekly.iter().map(|bucket| bucket.count).sum();
    let current_streak = weekly
        .iter()
        .rev()
        .take_while(|bucket| bucket.count > 0)
        .count();

    ActivityStats {
        total_logs: logs.len(),
        logs_this_week,
        current_streak,
        weekly,
    }
}
