//! Persisted record types for the build log and the plan list.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Display format for entry timestamps. Entries store the formatted string
/// (not a structured time), and the statistics engine parses exactly this
/// format back when bucketing by calendar day.
pub const ENTRY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One free-text progress note. Immutable once created; the log grows by
/// appending and shrinks only via full clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub text: String,
    pub date: String,
}

impl LogEntry {
    /// Create an entry stamped with the given local time. The text is kept
    /// exactly as submitted; validation (blank rejection) happens in the
    /// log book, not here.
    #[must_use]
    pub fn new(text: &str, now: DateTime<Local>) -> Self {
        Self {
            text: text.to_owned(),
            date: now.format(ENTRY_TIME_FORMAT).to_string(),
        }
    }

    /// Calendar day this entry was recorded on, if its timestamp parses.
    #[must_use]
    pub fn calendar_day(&self) -> Option<NaiveDate> {
        NaiveDateTime::parse_from_str(&self.date, ENTRY_TIME_FORMAT)
            .ok()
            .map(|stamp| stamp.date())
    }
}

/// One upcoming task with a 1-based positional rank. The stored `priority`
/// is renumbered on every mutation so it always equals the displayed rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub id: i64,
    pub text: String,
    pub priority: usize,
}

/// Issues creation-time-unique plan ids derived from the millisecond clock,
/// bumping past the last issued value when two plans land in the same
/// millisecond or the clock steps backwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanIdSource {
    last_issued: i64,
}

impl PlanIdSource {
    /// Seed from already-persisted plans so reloaded boards never reuse an id.
    #[must_use]
    pub fn seeded_from(plans: &[PlanEntry]) -> Self {
        Self {
            last_issued: plans.iter().map(|plan| plan.id).max().unwrap_or(0),
        }
    }

    pub fn next(&mut self, now: DateTime<Local>) -> i64 {
        self.last_issued = now.timestamp_millis().max(self.last_issued + 1);
        self.last_issued
    }
}
