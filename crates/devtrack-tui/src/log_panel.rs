//! Build log panel: submit notes, expand/collapse the history, bulk clear.

use chrono::{DateTime, Local};
use devtrack_core::bus::ChangeBus;
use devtrack_core::confirm::{ClearOutcome, ConfirmPrompt};
use devtrack_core::log::LogBook;
use devtrack_core::store::{SnapshotStore, StoreError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogPanel {
    book: LogBook,
    expanded: bool,
}

impl LogPanel {
    #[must_use]
    pub fn new(book: LogBook) -> Self {
        Self {
            book,
            expanded: false,
        }
    }

    #[must_use]
    pub fn book(&self) -> &LogBook {
        &self.book
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Returns the new expanded state.
    pub fn toggle_expanded(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    /// Submit a new note; blank input is silently dropped.
    pub fn submit(
        &mut self,
        text: &str,
        now: DateTime<Local>,
        store: &mut dyn SnapshotStore,
        bus: &mut ChangeBus,
    ) -> Result<bool, StoreError> {
        self.book.append(text, now, store, bus)
    }

    /// Confirmation-gated clear; an actual clear also collapses the view.
    pub fn clear(
        &mut self,
        prompt: &mut dyn ConfirmPrompt,
        store: &mut dyn SnapshotStore,
        bus: &mut ChangeBus,
    ) -> Result<ClearOutcome, StoreError> {
        let outcome = self.book.clear_all(prompt, store, bus)?;
        if outcome == ClearOutcome::Cleared {
            self.expanded = false;
        }
        Ok(outcome)
    }

    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec!["Build Log - track your daily progress".to_owned()];

        if self.book.is_empty() {
            lines.push("  no build logs yet; add your first entry with `log <text>`".to_owned());
            return lines;
        }

        let total = self.book.len();
        let noun = if total == 1 { "entry" } else { "entries" };
        lines.push(format!("  {total} {noun}"));

        for row in self.book.list_for_display(self.expanded) {
            lines.push(format!("  #{:<3} {}  {}", row.ordinal, row.date, row.text));
        }

        if !self.expanded && self.book.collapsed_overflow() > 0 {
            lines.push(format!(
                "  ({} older hidden; `expand` to show)",
                self.book.collapsed_overflow()
            ));
        }
        lines
    }
}
