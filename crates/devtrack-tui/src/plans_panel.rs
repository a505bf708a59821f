//! Next plans panel: submit, reorder, and delete ranked plans.
//!
//! Commands address plans by their displayed 1-based rank, which is always
//! position + 1; the panel converts to sequence indexes for the board.

use chrono::{DateTime, Local};
use devtrack_core::confirm::{ClearOutcome, ConfirmPrompt};
use devtrack_core::plans::PlanBoard;
use devtrack_core::store::{SnapshotStore, StoreError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlansPanel {
    board: PlanBoard,
}

impl PlansPanel {
    #[must_use]
    pub fn new(board: PlanBoard) -> Self {
        Self { board }
    }

    #[must_use]
    pub fn board(&self) -> &PlanBoard {
        &self.board
    }

    /// Submit a new plan; blank input is silently dropped.
    pub fn submit(
        &mut self,
        text: &str,
        now: DateTime<Local>,
        store: &mut dyn SnapshotStore,
    ) -> Result<bool, StoreError> {
        self.board.append(text, now, store)
    }

    pub fn clear(
        &mut self,
        prompt: &mut dyn ConfirmPrompt,
        store: &mut dyn SnapshotStore,
    ) -> Result<ClearOutcome, StoreError> {
        self.board.clear_all(prompt, store)
    }

    /// Raise the plan shown at `rank` by one position.
    pub fn move_up(
        &mut self,
        rank: usize,
        store: &mut dyn SnapshotStore,
    ) -> Result<bool, StoreError> {
        let Some(index) = rank.checked_sub(1) else {
            return Ok(false);
        };
        self.board.move_up(index, store)
    }

    /// Lower the plan shown at `rank` by one position.
    pub fn move_down(
        &mut self,
        rank: usize,
        store: &mut dyn SnapshotStore,
    ) -> Result<bool, StoreError> {
        let Some(index) = rank.checked_sub(1) else {
            return Ok(false);
        };
        self.board.move_down(index, store)
    }

    /// Delete the plan shown at `rank`.
    pub fn remove(
        &mut self,
        rank: usize,
        store: &mut dyn SnapshotStore,
    ) -> Result<bool, StoreError> {
        let Some(index) = rank.checked_sub(1) else {
            return Ok(false);
        };
        self.board.remove_at(index, store)
    }

    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec!["Next Plans - plan out next steps by priority".to_owned()];

        if self.board.is_empty() {
            lines.push("  no plans yet; add your first one with `plan <text>`".to_owned());
            return lines;
        }

        let total = self.board.len();
        let noun = if total == 1 { "plan" } else { "plans" };
        lines.push(format!("  {total} {noun}"));

        for (position, plan) in self.board.plans().iter().enumerate() {
            lines.push(format!(
                "  #{:<3} {}",
                self.board.rank_of(position),
                plan.text
            ));
        }
        lines
    }
}
