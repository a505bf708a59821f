//! The plan board: a ranked sequence of upcoming tasks.
//!
//! Priority is positional (index 0 = rank 1). Every mutation renumbers the
//! stored `priority` fields to match and persists the full sequence under
//! [`PLANS_KEY`]. Nothing else consumes plan data, so the board publishes no
//! change notifications.

use chrono::{DateTime, Local};

use crate::confirm::{resolve_consent, ClearOutcome, ConfirmPrompt};
use crate::model::{PlanEntry, PlanIdSource};
use crate::store::{read_sequence, write_sequence, SnapshotStore, StoreError, PLANS_KEY};

const CLEAR_PLANS_QUESTION: &str = "Are you sure you want to delete all plans?";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanBoard {
    plans: Vec<PlanEntry>,
    ids: PlanIdSource,
}

impl PlanBoard {
    /// Load from the store, falling back to an empty board, and seed the id
    /// source past every persisted id.
    #[must_use]
    pub fn load(store: &dyn SnapshotStore) -> Self {
        let plans: Vec<PlanEntry> = read_sequence(store, PLANS_KEY);
        let ids = PlanIdSource::seeded_from(&plans);
        Self { plans, ids }
    }

    #[must_use]
    pub fn plans(&self) -> &[PlanEntry] {
        &self.plans
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Display rank for the plan at `index`: always position + 1.
    #[must_use]
    pub fn rank_of(&self, index: usize) -> usize {
        index + 1
    }

    /// Append a plan at the lowest rank. Blank text is a complete no-op.
    /// Returns whether a plan was added.
    pub fn append(
        &mut self,
        raw: &str,
        now: DateTime<Local>,
        store: &mut dyn SnapshotStore,
    ) -> Result<bool, StoreError> {
        if raw.trim().is_empty() {
            return Ok(false);
        }
        let id = self.ids.next(now);
        self.plans.push(PlanEntry {
            id,
            text: raw.to_owned(),
            priority: self.plans.len() + 1,
        });
        self.persist(store)?;
        Ok(true)
    }

    /// Confirmation-gated full clear; same decline and fail-open rules as
    /// the log book.
    pub fn clear_all(
        &mut self,
        prompt: &mut dyn ConfirmPrompt,
        store: &mut dyn SnapshotStore,
    ) -> Result<ClearOutcome, StoreError> {
        if !resolve_consent(prompt.confirm(CLEAR_PLANS_QUESTION)) {
            return Ok(ClearOutcome::Declined);
        }
        self.plans.clear();
        self.persist(store)?;
        Ok(ClearOutcome::Cleared)
    }

    /// Swap the plan at `index` with its predecessor. No-op at the top or
    /// out of range. Returns whether the order changed.
    pub fn move_up(
        &mut self,
        index: usize,
        store: &mut dyn SnapshotStore,
    ) -> Result<bool, StoreError> {
        if index == 0 || index >= self.plans.len() {
            return Ok(false);
        }
        self.plans.swap(index, index - 1);
        self.renumber();
        self.persist(store)?;
        Ok(true)
    }

    /// Swap the plan at `index` with its successor. No-op at the bottom or
    /// out of range. Returns whether the order changed.
    pub fn move_down(
        &mut self,
        index: usize,
        store: &mut dyn SnapshotStore,
    ) -> Result<bool, StoreError> {
        if index + 1 >= self.plans.len() {
            return Ok(false);
        }
        self.plans.swap(index, index + 1);
        self.renumber();
        self.persist(store)?;
        Ok(true)
    }

    /// Remove exactly the plan at `index`, shifting later plans up one rank.
    /// Out-of-range indexes are a no-op. Returns whether a plan was removed.
    pub fn remove_at(
        &mut self,
        index: usize,
        store: &mut dyn SnapshotStore,
    ) -> Result<bool, StoreError> {
        if index >= self.plans.len() {
            return Ok(false);
        }
        self.plans.remove(index);
        self.renumber();
        self.persist(store)?;
        Ok(true)
    }

    fn renumber(&mut self) {
        for (position, plan) in self.plans.iter_mut().enumerate() {
            plan.priority = position + 1;
        }
    }

    fn persist(&self, store: &mut dyn SnapshotStore) -> Result<(), StoreError> {
        write_sequence(store, PLANS_KEY, &self.plans)
    }
}
