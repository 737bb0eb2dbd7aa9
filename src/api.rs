//! # API Facade
//!
//! [`SiftApi`] is the single entry point a screen talks to. It owns one
//! instance of every engine and keeps them consistent with each other:
//!
//! ```text
//! records ──► FilterEngine ──► visible ids ──► SelectionSet
//!                                                  │
//!            BulkActionCatalog ◄── eligible ───────┤
//!                    │                             │
//!            ConfirmationFlow ──► BulkExecutor ◄───┘ (snapshot of ids)
//!                                       │
//!                               RetainedProgress ──► clear selection + refresh
//! ```
//!
//! ## What the API adds on top of the engines
//!
//! - **Candidate sync**: every query, filter, preset or record change
//!   recomputes the visible ids. If they differ, the selection is cleared and
//!   a pending confirmation whose selection emptied is dropped.
//! - **Preset persistence**: with a [`PresetStore`] attached, saving or
//!   deleting a preset writes the whole list for this screen.
//! - **Post-run cleanup**: once a finished run's grace period has passed (or
//!   it is dismissed), the selection is cleared and the refresh callback runs
//!   exactly once. Until then no new action can be triggered.
//!
//! ## Driving a run
//!
//! [`SiftApi::execute`] runs to completion on the calling thread. Hosts that
//! want to interleave rendering use [`SiftApi::start_run`], step the returned
//! [`BulkRun`] themselves, then hand the final snapshot to
//! [`SiftApi::finish_run`].
//!
//! ## What the API Does NOT Do
//!
//! - **Rendering**: it returns data, never markup or strings for layout.
//! - **Timers**: the host calls [`SiftApi::tick`]; the API never sleeps
//!   outside the optional inter-item yield.

use crate::bulk::{
    BulkAction, BulkActionCatalog, BulkExecutor, BulkRun, CancelHandle, ConfirmationFlow,
    EffectError, FlowState, Progress, RetainedProgress, Trigger,
};
use crate::config::SiftConfig;
use crate::error::{Result, SiftError};
use crate::filter::FilterEngine;
use crate::model::{FilterField, FilterPreset, FilterValue, Record};
use crate::selection::SelectionSet;
use crate::store::PresetStore;
use crate::suggest::suggest;
use std::time::Instant;
use tracing::debug;

type Refresh = Box<dyn FnMut()>;

struct AttachedStore {
    store: Box<dyn PresetStore>,
    screen: String,
}

pub struct SiftApi<R: Record> {
    records: Vec<R>,
    engine: FilterEngine,
    selection: SelectionSet,
    catalog: BulkActionCatalog,
    flow: ConfirmationFlow,
    executor: BulkExecutor,
    retained: RetainedProgress,
    corpus: Vec<String>,
    config: SiftConfig,
    refresh: Option<Refresh>,
    presets: Option<AttachedStore>,
    run_active: bool,
}

impl<R: Record> SiftApi<R> {
    pub fn new(
        fields: Vec<FilterField>,
        catalog: BulkActionCatalog,
        config: SiftConfig,
    ) -> Result<Self> {
        Ok(Self {
            records: Vec::new(),
            engine: FilterEngine::new(fields)?,
            selection: SelectionSet::default(),
            catalog,
            flow: ConfirmationFlow::new(),
            executor: BulkExecutor::from_config(&config),
            retained: RetainedProgress::new(),
            corpus: Vec::new(),
            config,
            refresh: None,
            presets: None,
            run_active: false,
        })
    }

    /// Callback invoked once after every finished run is cleared.
    pub fn with_refresh(mut self, refresh: impl FnMut() + 'static) -> Self {
        self.refresh = Some(Box::new(refresh));
        self
    }

    /// Attaches a preset store and loads the presets saved for `screen`.
    pub fn with_preset_store(
        mut self,
        store: impl PresetStore + 'static,
        screen: impl Into<String>,
    ) -> Result<Self> {
        let screen = screen.into();
        let presets = store.load_presets(&screen)?;
        debug!(screen = %screen, count = presets.len(), "loaded presets");
        self.engine.set_presets(presets);
        self.presets = Some(AttachedStore {
            store: Box::new(store),
            screen,
        });
        Ok(self)
    }

    pub fn config(&self) -> &SiftConfig {
        &self.config
    }

    // --- Records ---

    /// Replaces the full record set, e.g. after a refresh.
    pub fn load_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.sync_candidates();
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Records passing the current query and filters, in load order.
    pub fn visible(&self) -> Vec<&R> {
        self.engine.filter(&self.records)
    }

    // --- Filtering ---

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.engine.set_query(text);
        self.sync_candidates();
    }

    pub fn set_field_value(&mut self, id: &str, value: impl Into<FilterValue>) -> Result<()> {
        self.engine.set_field_value(id, value)?;
        self.sync_candidates();
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.engine.clear_all();
        self.sync_candidates();
    }

    /// Phrases offered while typing a search.
    pub fn set_suggestion_corpus(&mut self, corpus: Vec<String>) {
        self.corpus = corpus;
    }

    pub fn suggestions(&self) -> Vec<String> {
        suggest(self.engine.query(), &self.corpus, self.config.suggestion_limit)
    }

    // --- Presets ---

    pub fn presets(&self) -> &[FilterPreset] {
        self.engine.presets()
    }

    pub fn save_preset(&mut self, name: &str, description: &str) -> Result<FilterPreset> {
        let preset = self.engine.save_preset(name, description)?;
        self.persist_presets()?;
        Ok(preset)
    }

    pub fn apply_preset(&mut self, id: &str) -> Result<()> {
        let preset = self
            .engine
            .find_preset(id)
            .cloned()
            .ok_or_else(|| SiftError::Validation(format!("Preset not found: {}", id)))?;
        self.engine.apply_preset(&preset)?;
        self.sync_candidates();
        Ok(())
    }

    /// Applies the preset flagged as default, if there is one.
    pub fn apply_default_preset(&mut self) -> Result<bool> {
        let Some(preset) = self.engine.default_preset().cloned() else {
            return Ok(false);
        };
        self.engine.apply_preset(&preset)?;
        self.sync_candidates();
        Ok(true)
    }

    pub fn delete_preset(&mut self, id: &str) -> Result<Option<FilterPreset>> {
        let removed = self.engine.delete_preset(id);
        if removed.is_some() {
            self.persist_presets()?;
        }
        Ok(removed)
    }

    fn persist_presets(&self) -> Result<()> {
        if let Some(attached) = &self.presets {
            attached
                .store
                .save_presets(&attached.screen, self.engine.presets())?;
        }
        Ok(())
    }

    // --- Selection ---

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn toggle_all(&mut self, select: bool) {
        self.selection.toggle_all(select);
        self.flow.selection_changed(self.selection.len());
    }

    pub fn toggle_one(&mut self, id: &str, select: bool) -> Result<()> {
        self.selection.toggle_one(id, select)?;
        self.flow.selection_changed(self.selection.len());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.flow.selection_changed(0);
    }

    fn sync_candidates(&mut self) {
        let ids: Vec<String> = self
            .engine
            .filter(&self.records)
            .iter()
            .map(|r| r.record_id())
            .collect();
        if self.selection.set_candidates(ids) {
            self.flow.selection_changed(self.selection.len());
        }
    }

    // --- Bulk actions ---

    pub fn eligible_actions(&self) -> Vec<&BulkAction> {
        self.catalog.eligible_actions(&self.selection.selected_ids())
    }

    pub fn confirmation(&self) -> &ConfirmationFlow {
        &self.flow
    }

    /// Fails while a run is active or a finished run is still on screen.
    pub fn trigger(&mut self, action_id: &str) -> Result<Trigger> {
        self.ensure_idle()?;
        let selected = self.selection.selected_ids();
        self.flow.trigger(&self.catalog, action_id, &selected)
    }

    pub fn set_confirmation_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.flow.set_confirmation_text(text)
    }

    pub fn can_confirm(&self) -> bool {
        self.flow.can_confirm()
    }

    pub fn confirm(&mut self) -> Result<BulkAction> {
        self.flow.confirm()
    }

    pub fn cancel_confirmation(&mut self) -> bool {
        self.flow.cancel()
    }

    /// Starts the action the confirmation flow released, over a snapshot of
    /// the current selection.
    pub fn start_run<F>(&mut self, effect: F) -> Result<BulkRun<F>>
    where
        F: FnMut(&str) -> std::result::Result<(), EffectError>,
    {
        self.ensure_idle()?;
        let action = match self.flow.state() {
            FlowState::Executing(action) => action.clone(),
            _ => {
                return Err(SiftError::InvalidState(
                    "no confirmed bulk action is ready to run".to_string(),
                ))
            }
        };

        let run = self
            .executor
            .run(&action, self.selection.selected_ids(), effect);
        self.retained.show(run.progress().clone());
        self.run_active = true;
        Ok(run)
    }

    /// Publishes a live snapshot from a run driven by the host.
    pub fn observe(&mut self, progress: &Progress) {
        if self.run_active && !progress.is_terminal() {
            self.retained.show(progress.clone());
        }
    }

    /// Records a run's final snapshot and starts its grace period.
    pub fn finish_run(&mut self, progress: Progress, now: Instant) -> Result<()> {
        if !self.run_active {
            return Err(SiftError::InvalidState("no bulk run is active".to_string()));
        }
        if !progress.is_terminal() {
            return Err(SiftError::InvalidState(
                "bulk run has not reached a terminal state".to_string(),
            ));
        }
        let grace = self.config.grace_for(progress.status);
        self.retained.hold(progress, now, grace);
        self.flow.finish();
        self.run_active = false;
        Ok(())
    }

    /// Runs the released action to completion, reporting every snapshot.
    pub fn execute<F>(
        &mut self,
        effect: F,
        mut on_progress: impl FnMut(&Progress),
    ) -> Result<Progress>
    where
        F: FnMut(&str) -> std::result::Result<(), EffectError>,
    {
        let run = self.start_run(effect)?;
        let last = run.drive(|snapshot| {
            self.observe(snapshot);
            on_progress(snapshot);
        });
        self.finish_run(last.clone(), Instant::now())?;
        Ok(last)
    }

    pub fn progress(&self) -> Option<&Progress> {
        self.retained.current()
    }

    pub fn is_running(&self) -> bool {
        self.run_active
    }

    pub fn request_cancel(&self) {
        self.executor.request_cancel();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.executor.cancel_handle()
    }

    /// Advances retention. Returns `true` if a finished run was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.retained.expire(now) {
            Some(progress) => {
                self.after_run(&progress);
                true
            }
            None => false,
        }
    }

    /// Clears a finished run without waiting for its grace period.
    pub fn dismiss_progress(&mut self) -> bool {
        if self.run_active {
            return false;
        }
        match self.retained.dismiss() {
            Some(progress) => {
                self.after_run(&progress);
                true
            }
            None => false,
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.run_active {
            return Err(SiftError::InvalidState(
                "a bulk run is still in progress".to_string(),
            ));
        }
        if self.retained.current().is_some_and(Progress::is_terminal) {
            return Err(SiftError::InvalidState(
                "the previous bulk run has not been cleared yet".to_string(),
            ));
        }
        Ok(())
    }

    fn after_run(&mut self, progress: &Progress) {
        debug!(action = %progress.action_id, status = ?progress.status, "clearing finished run");
        self.clear_selection();
        if let Some(refresh) = self.refresh.as_mut() {
            refresh();
        }
    }
}
