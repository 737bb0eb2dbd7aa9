use super::progress::Progress;
use std::time::{Duration, Instant};

/// Keeps a finished run's progress on screen for a grace period.
///
/// Time is passed in by the caller rather than read from a clock, so the
/// host decides when to tick and tests stay deterministic.
#[derive(Debug, Clone, Default)]
pub struct RetainedProgress {
    held: Option<Held>,
}

#[derive(Debug, Clone)]
struct Held {
    progress: Progress,
    until: Option<Instant>,
}

impl RetainedProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(&mut self, progress: Progress, now: Instant, grace: Duration) {
        self.held = Some(Held {
            progress,
            until: Some(now + grace),
        });
    }

    /// Replaces the shown snapshot while a run is still going. Live snapshots
    /// never expire.
    pub fn show(&mut self, progress: Progress) {
        self.held = Some(Held {
            progress,
            until: None,
        });
    }

    pub fn current(&self) -> Option<&Progress> {
        self.held.as_ref().map(|h| &h.progress)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }

    /// Drops the snapshot once its grace period has elapsed. Returns the
    /// dropped progress so the caller can run its cleanup exactly once.
    pub fn expire(&mut self, now: Instant) -> Option<Progress> {
        let due = matches!(
            &self.held,
            Some(Held { progress, until: Some(until) }) if progress.is_terminal() && now >= *until
        );
        if due {
            self.held.take().map(|h| h.progress)
        } else {
            None
        }
    }

    pub fn dismiss(&mut self) -> Option<Progress> {
        self.held.take().map(|h| h.progress)
    }
}
