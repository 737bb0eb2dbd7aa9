//! Sequential bulk execution.
//!
//! [`BulkExecutor::run`] returns a [`BulkRun`], an iterator that processes one
//! selected id per `next()` and yields a [`Progress`] snapshot after each one.
//! Items run strictly in selection order, one at a time.
//!
//! ## Failure and cancellation
//!
//! - `EffectError::Item`: the item counts as failed, the error is recorded and
//!   the run moves on to the next id.
//! - `EffectError::Abort`: the whole run stops with status `Failed`.
//! - Cancellation is checked before every item (and again after the optional
//!   inter-item yield). An item already in flight always finishes.
//! - A cancel that arrives while the last item is in flight is too late: every
//!   item has been attempted, so the run still ends `Completed`.
//!
//! The run owns its snapshot of ids; later selection changes do not reach it.

use super::catalog::BulkAction;
use super::progress::Progress;
use crate::config::SiftConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Outcome of a failed per-item effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    /// This item failed; keep going with the rest.
    #[error("{0}")]
    Item(String),
    /// Something broke beyond this item; stop the run.
    #[error("{0}")]
    Abort(String),
}

impl EffectError {
    pub fn item(reason: impl Into<String>) -> Self {
        EffectError::Item(reason.into())
    }

    pub fn abort(reason: impl Into<String>) -> Self {
        EffectError::Abort(reason.into())
    }
}

/// Shared cancellation flag. Clones observe the same flag, so a handle can be
/// moved to another thread or into a UI callback.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Default)]
pub struct BulkExecutor {
    cancel: CancelHandle,
    item_yield: Duration,
}

impl BulkExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SiftConfig) -> Self {
        Self::new().with_item_yield(config.item_yield())
    }

    /// Pause between items, giving a UI thread room to redraw.
    pub fn with_item_yield(mut self, item_yield: Duration) -> Self {
        self.item_yield = item_yield;
        self
    }

    /// Handle to the flag checked by every run of this executor.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn request_cancel(&self) {
        self.cancel.request_cancel();
    }

    /// Starts a run of `action` over `selected_ids`.
    ///
    /// The cancellation flag is reset here: a cancel requested while no run
    /// was active does not carry over.
    pub fn run<F>(&self, action: &BulkAction, selected_ids: Vec<String>, effect: F) -> BulkRun<F>
    where
        F: FnMut(&str) -> Result<(), EffectError>,
    {
        self.cancel.reset();

        let mut progress = Progress::new(action.id.clone(), selected_ids.len());
        progress.start(&action.label);
        info!(action = %action.id, total = selected_ids.len(), "bulk run started");

        BulkRun {
            progress,
            label: action.label.clone(),
            ids: selected_ids,
            cursor: 0,
            effect,
            cancel: self.cancel.clone(),
            item_yield: self.item_yield,
            finished: false,
        }
    }
}

/// An in-progress bulk run. Each `next()` is one unit of work.
pub struct BulkRun<F> {
    progress: Progress,
    label: String,
    ids: Vec<String>,
    cursor: usize,
    effect: F,
    cancel: CancelHandle,
    item_yield: Duration,
    finished: bool,
}

impl<F> BulkRun<F>
where
    F: FnMut(&str) -> Result<(), EffectError>,
{
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Runs to a terminal state, reporting every snapshot, and returns the
    /// final one.
    pub fn drive(mut self, mut on_progress: impl FnMut(&Progress)) -> Progress {
        for snapshot in self.by_ref() {
            on_progress(&snapshot);
        }
        self.progress
    }

    fn stop(&mut self) -> Option<Progress> {
        self.finished = true;
        info!(
            action = %self.progress.action_id,
            status = ?self.progress.status,
            completed = self.progress.completed,
            failed = self.progress.failed,
            total = self.progress.total,
            "bulk run finished"
        );
        Some(self.progress.clone())
    }

    fn cancel_if_requested(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            self.progress.cancel();
            return true;
        }
        false
    }
}

impl<F> Iterator for BulkRun<F>
where
    F: FnMut(&str) -> Result<(), EffectError>,
{
    type Item = Progress;

    fn next(&mut self) -> Option<Progress> {
        if self.finished {
            return None;
        }
        if self.cancel_if_requested() {
            return self.stop();
        }
        if self.cursor >= self.ids.len() {
            self.progress.complete(&self.label);
            return self.stop();
        }

        if self.cursor > 0 && !self.item_yield.is_zero() {
            thread::sleep(self.item_yield);
            if self.cancel_if_requested() {
                return self.stop();
            }
        }

        let id = self.ids[self.cursor].clone();
        self.cursor += 1;

        match (self.effect)(&id) {
            Ok(()) => self.progress.record_success(&self.label),
            Err(EffectError::Item(reason)) => {
                warn!(action = %self.progress.action_id, item = %id, "bulk item failed: {reason}");
                let error = format!("Failed to process item {}: {}", id, reason);
                self.progress.record_failure(&self.label, error);
            }
            Err(EffectError::Abort(reason)) => {
                warn!(action = %self.progress.action_id, item = %id, "bulk run aborted: {reason}");
                self.progress.abort(&self.label, reason);
                return self.stop();
            }
        }

        if self.cursor >= self.ids.len() {
            self.progress.complete(&self.label);
            return self.stop();
        }
        Some(self.progress.clone())
    }
}
