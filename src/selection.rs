//! Multi-select over the current (filtered) candidate list.
//!
//! The tri-state [`SelectionState`] is always derived from the selected ids and
//! the candidate count, never stored, so the "select all" checkbox cannot drift
//! out of sync with the rows.
//!
//! When the candidate list changes identity (filters or query changed), the
//! selection is discarded: ids picked against one result set are never carried
//! over to another.

use crate::error::{Result, SiftError};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    None,
    Partial,
    All,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    candidates: Vec<String>,
    selected: HashSet<String>,
}

impl SelectionSet {
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates: dedup(candidates),
            selected: HashSet::new(),
        }
    }

    /// Replaces the candidate list. Returns `true` (and clears the selection)
    /// if the list actually changed.
    pub fn set_candidates(&mut self, ids: Vec<String>) -> bool {
        let ids = dedup(ids);
        if ids == self.candidates {
            return false;
        }
        self.candidates = ids;
        if !self.selected.is_empty() {
            debug!(dropped = self.selected.len(), "result set changed, clearing selection");
        }
        self.selected.clear();
        true
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn total_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids in candidate order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.candidates
            .iter()
            .filter(|id| self.selected.contains(*id))
            .cloned()
            .collect()
    }

    pub fn toggle_all(&mut self, select: bool) {
        if select {
            self.selected = self.candidates.iter().cloned().collect();
        } else {
            self.selected.clear();
        }
    }

    /// Adds or removes one id; a no-op if it is already in that state.
    /// Selecting an id outside the candidate list is an error.
    pub fn toggle_one(&mut self, id: &str, select: bool) -> Result<()> {
        if select {
            if !self.candidates.iter().any(|c| c == id) {
                return Err(SiftError::UnknownRecord(id.to_string()));
            }
            self.selected.insert(id.to_string());
        } else {
            self.selected.remove(id);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn state(&self) -> SelectionState {
        let total = self.candidates.len();
        match self.selected.len() {
            0 => SelectionState::None,
            n if n == total && total > 0 => SelectionState::All,
            _ => SelectionState::Partial,
        }
    }

    /// Whether a tri-state checkbox should render as indeterminate.
    pub fn is_indeterminate(&self) -> bool {
        self.state() == SelectionState::Partial
    }

    pub fn summary(&self) -> String {
        match self.selected.len() {
            0 => "No items selected".to_string(),
            1 => "1 item selected".to_string(),
            n => format!("{} items selected", n),
        }
    }
}

fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
