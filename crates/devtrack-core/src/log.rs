//! The build log: an append-only sequence of timestamped progress notes.
//!
//! Every mutation persists the full sequence under [`LOG_KEY`] and then
//! publishes the updated sequence on the change bus, so subscribers always
//! observe fully-persisted state.

use chrono::{DateTime, Local};

use crate::bus::ChangeBus;
use crate::confirm::{resolve_consent, ClearOutcome, ConfirmPrompt};
use crate::model::LogEntry;
use crate::store::{read_sequence, write_sequence, SnapshotStore, StoreError, LOG_KEY};

/// Rows shown in the collapsed (non-expanded) view.
pub const PREVIEW_LEN: usize = 4;

const CLEAR_LOGS_QUESTION: &str = "Are you sure you want to delete all logs?";

/// One row of the reverse-chronological display listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Countdown ordinal: the most recent entry carries the total count,
    /// the oldest carries 1.
    pub ordinal: usize,
    pub text: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogBook {
    entries: Vec<LogEntry>,
}

impl LogBook {
    /// Load from the store. Absent or unparsable snapshots become an empty
    /// book; storage trouble is never surfaced here.
    #[must_use]
    pub fn load(store: &dyn SnapshotStore) -> Self {
        Self {
            entries: read_sequence(store, LOG_KEY),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a note stamped with `now`. Blank text is a complete no-op:
    /// no entry, no write, no notification. Returns whether an entry was
    /// added.
    pub fn append(
        &mut self,
        raw: &str,
        now: DateTime<Local>,
        store: &mut dyn SnapshotStore,
        bus: &mut ChangeBus,
    ) -> Result<bool, StoreError> {
        if raw.trim().is_empty() {
            return Ok(false);
        }
        self.entries.push(LogEntry::new(raw, now));
        self.persist(store)?;
        bus.publish(&self.entries);
        Ok(true)
    }

    /// Confirmation-gated full clear. Declining leaves memory, storage, and
    /// subscribers untouched; a failing prompt mechanism proceeds as if
    /// confirmed (fail-open).
    pub fn clear_all(
        &mut self,
        prompt: &mut dyn ConfirmPrompt,
        store: &mut dyn SnapshotStore,
        bus: &mut ChangeBus,
    ) -> Result<ClearOutcome, StoreError> {
        if !resolve_consent(prompt.confirm(CLEAR_LOGS_QUESTION)) {
            return Ok(ClearOutcome::Declined);
        }
        self.entries.clear();
        self.persist(store)?;
        bus.publish(&self.entries);
        Ok(ClearOutcome::Cleared)
    }

    /// Most recent first. The collapsed view keeps only the latest
    /// [`PREVIEW_LEN`] rows.
    #[must_use]
    pub fn list_for_display(&self, expanded: bool) -> Vec<DisplayRow> {
        let total = self.entries.len();
        let rows = self
            .entries
            .iter()
            .rev()
            .enumerate()
            .map(|(position, entry)| DisplayRow {
                ordinal: total - position,
                text: entry.text.clone(),
                date: entry.date.clone(),
            });
        if expanded {
            rows.collect()
        } else {
            rows.take(PREVIEW_LEN).collect()
        }
    }

    /// Entries hidden by the collapsed view.
    #[must_use]
    pub fn collapsed_overflow(&self) -> usize {
        self.entries.len().saturating_sub(PREVIEW_LEN)
    }

    fn persist(&self, store: &mut dyn SnapshotStore) -> Result<(), StoreError> {
        write_sequence(store, LOG_KEY, &self.entries)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::{LogBook, PREVIEW_LEN};
    use crate::bus::ChangeBus;
    use crate::model::LogEntry;
    use crate::store::{MemoryStore, SnapshotStore};
    use chrono::{DateTime, Local, TimeZone};

    fn noon() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 2, 9, 12, 0, 0)
            .single()
            .expect("valid local time")
    }

    fn book_with(texts: &[&str]) -> LogBook {
        let mut book = LogBook::default();
        let mut store = MemoryStore::new();
        let mut bus = ChangeBus::new();
        for text in texts {
            book.append(text, noon(), &mut store, &mut bus)
                .expect("append");
        }
        book
    }

    #[test]
    fn display_listing_is_reverse_chronological_with_countdown_ordinals() {
        let book = book_with(&["one", "two", "three", "four", "five"]);

        let expanded = book.list_for_display(true);
        assert_eq!(expanded.len(), 5);
        assert_eq!(expanded[0].text, "five");
        assert_eq!(expanded[0].ordinal, 5);
        assert_eq!(expanded[4].text, "one");
        assert_eq!(expanded[4].ordinal, 1);

        let collapsed = book.list_for_display(false);
        assert_eq!(collapsed.len(), PREVIEW_LEN);
        assert_eq!(collapsed[0].text, "five");
        assert_eq!(collapsed[3].text, "two");
        assert_eq!(book.collapsed_overflow(), 1);
    }

    #[test]
    fn short_books_are_unaffected_by_collapsing() {
        let book = book_with(&["one", "two"]);
        assert_eq!(book.list_for_display(false).len(), 2);
        assert_eq!(book.collapsed_overflow(), 0);
    }

    #[test]
    fn submitted_text_is_preserved_verbatim() {
        let book = book_with(&["  keep my spacing  "]);
        assert_eq!(book.entries()[0].text, "  keep my spacing  ");
    }

    #[test]
    fn load_defaults_to_empty_on_malformed_snapshot() {
        let mut store = MemoryStore::new();
        store.write("buildLogs", "not an array").expect("write");
        let book = LogBook::load(&store);
        assert!(book.is_empty());
    }

    #[test]
    fn load_tolerates_old_entries_in_order() {
        let mut store = MemoryStore::new();
        store
            .write(
                "buildLogs",
                r#"[{"text":"first","date":"2026-02-08 09:00:00"},{"text":"second","date":"2026-02-09 09:00:00"}]"#,
            )
            .expect("write");
        let book = LogBook::load(&store);
        assert_eq!(
            book.entries(),
            &[
                LogEntry {
                    text: "first".to_owned(),
                    date: "2026-02-08 09:00:00".to_owned()
                },
                LogEntry {
                    text: "second".to_owned(),
                    date: "2026-02-09 09:00:00".to_owned()
                },
            ]
        );
    }
}
