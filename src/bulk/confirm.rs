//! Confirmation gate in front of bulk execution.
//!
//! ```text
//!            trigger (no confirmation)
//!   Idle ─────────────────────────────────────► Executing ──finish──► Idle
//!     │                                            ▲
//!     │ trigger (requires confirmation)            │ confirm
//!     ▼                                            │
//!   AwaitingConfirmation ──────────────────────────┘
//!     │ cancel / selection emptied
//!     ▼
//!   Idle
//! ```
//!
//! Destructive actions additionally require the typed text to equal
//! [`CONFIRMATION_TOKEN`] exactly (case-sensitive, no trimming).

use super::catalog::{BulkAction, BulkActionCatalog};
use crate::error::{Result, SiftError};
use tracing::debug;

pub const CONFIRMATION_TOKEN: &str = "CONFIRM";

/// An action waiting for the user's go-ahead.
#[derive(Debug, Clone)]
pub struct PendingAction {
    pub action: BulkAction,
    pub selected_count: usize,
    typed: String,
}

impl PendingAction {
    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn needs_token(&self) -> bool {
        self.action.is_destructive
    }

    pub fn can_confirm(&self) -> bool {
        !self.action.is_destructive || self.typed == CONFIRMATION_TOKEN
    }

    pub fn prompt(&self) -> String {
        self.action.confirmation_prompt(self.selected_count)
    }
}

#[derive(Debug, Clone, Default)]
pub enum FlowState {
    #[default]
    Idle,
    AwaitingConfirmation(PendingAction),
    Executing(BulkAction),
}

/// What the caller should do after triggering an action.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// Run it now.
    Execute(BulkAction),
    /// Show the confirmation dialog.
    AwaitConfirmation,
}

#[derive(Debug, Clone, Default)]
pub struct ConfirmationFlow {
    state: FlowState,
}

impl ConfirmationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, FlowState::Idle)
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        match &self.state {
            FlowState::AwaitingConfirmation(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn trigger(
        &mut self,
        catalog: &BulkActionCatalog,
        action_id: &str,
        selected: &[String],
    ) -> Result<Trigger> {
        if !self.is_idle() {
            return Err(SiftError::InvalidState(
                "another bulk action is already pending".to_string(),
            ));
        }
        if selected.is_empty() {
            return Err(SiftError::EmptySelection);
        }
        let action = catalog
            .get(action_id)
            .ok_or_else(|| SiftError::UnknownAction(action_id.to_string()))?;
        if !action.is_eligible(selected) {
            return Err(SiftError::ActionNotEligible(action_id.to_string()));
        }

        if action.requires_confirmation || action.is_destructive {
            debug!(action = %action.id, selected = selected.len(), "awaiting confirmation");
            self.state = FlowState::AwaitingConfirmation(PendingAction {
                action: action.clone(),
                selected_count: selected.len(),
                typed: String::new(),
            });
            Ok(Trigger::AwaitConfirmation)
        } else {
            debug!(action = %action.id, "executing without confirmation");
            self.state = FlowState::Executing(action.clone());
            Ok(Trigger::Execute(action.clone()))
        }
    }

    /// Replaces the confirmation text buffer.
    pub fn set_confirmation_text(&mut self, text: impl Into<String>) -> Result<()> {
        match &mut self.state {
            FlowState::AwaitingConfirmation(pending) => {
                pending.typed = text.into();
                Ok(())
            }
            _ => Err(SiftError::InvalidState(
                "no action is awaiting confirmation".to_string(),
            )),
        }
    }

    /// Whether the confirm control is enabled.
    pub fn can_confirm(&self) -> bool {
        self.pending().is_some_and(PendingAction::can_confirm)
    }

    pub fn confirm(&mut self) -> Result<BulkAction> {
        let pending = self.pending().ok_or_else(|| {
            SiftError::InvalidState("no action is awaiting confirmation".to_string())
        })?;
        if !pending.can_confirm() {
            return Err(SiftError::ConfirmationIncomplete);
        }

        let action = pending.action.clone();
        debug!(action = %action.id, "confirmed");
        self.state = FlowState::Executing(action.clone());
        Ok(action)
    }

    /// Backs out of a pending confirmation. Returns `false` if nothing was pending.
    pub fn cancel(&mut self) -> bool {
        if self.pending().is_none() {
            return false;
        }
        debug!("confirmation cancelled");
        self.state = FlowState::Idle;
        true
    }

    /// Keeps a pending confirmation in step with the selection size; an empty
    /// selection drops it.
    pub fn selection_changed(&mut self, selected_count: usize) {
        if let FlowState::AwaitingConfirmation(pending) = &mut self.state {
            if selected_count == 0 {
                debug!(action = %pending.action.id, "selection emptied, dropping confirmation");
                self.state = FlowState::Idle;
            } else {
                pending.selected_count = selected_count;
            }
        }
    }

    /// Returns to `Idle` once a run has reached a terminal state.
    pub fn finish(&mut self) {
        if matches!(self.state, FlowState::Executing(_)) {
            self.state = FlowState::Idle;
        }
    }
}
