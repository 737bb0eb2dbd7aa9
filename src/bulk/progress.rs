//! Live accounting of one bulk run.
//!
//! ```text
//! Pending ──► Running ──► Completed   (all items attempted; failed may be > 0)
//!                    ├──► Failed      (the run itself aborted)
//!                    └──► Cancelled   (stopped between items on request)
//! ```
//!
//! Status only ever moves forward along these edges, and
//! `completed + failed <= total` holds after every update.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl ProgressStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ProgressStatus::Completed | ProgressStatus::Failed | ProgressStatus::Cancelled
        )
    }

    pub fn can_advance_to(self, next: ProgressStatus) -> bool {
        use ProgressStatus::*;
        matches!(
            (self, next),
            (Pending, Running)
                | (Pending, Failed)
                | (Pending, Cancelled)
                | (Running, Completed)
                | (Running, Failed)
                | (Running, Cancelled)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub action_id: String,
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub status: ProgressStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl Progress {
    pub fn new(action_id: impl Into<String>, total: usize) -> Self {
        Self {
            action_id: action_id.into(),
            total,
            completed: 0,
            failed: 0,
            status: ProgressStatus::Pending,
            message: None,
            errors: Vec::new(),
        }
    }

    pub fn processed(&self) -> usize {
        self.completed + self.failed
    }

    pub fn remaining(&self) -> usize {
        self.total - self.processed()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Share of items attempted, rounded to a whole percent.
    pub fn percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.processed() as f64 / self.total as f64) * 100.0).round() as u8
    }

    /// The explicit message, or "Processing N of M items".
    pub fn display_message(&self) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => format!(
                "Processing {} of {} items",
                self.processed(),
                self.total
            ),
        }
    }

    fn advance(&mut self, next: ProgressStatus) -> bool {
        if !self.status.can_advance_to(next) {
            debug!(from = ?self.status, to = ?next, "ignoring backwards progress transition");
            return false;
        }
        self.status = next;
        true
    }

    pub(crate) fn start(&mut self, label: &str) {
        if self.advance(ProgressStatus::Running) {
            self.message = Some(format!("Processing {}...", label));
        }
    }

    pub(crate) fn record_success(&mut self, label: &str) {
        if self.status == ProgressStatus::Running && self.remaining() > 0 {
            self.completed += 1;
            self.message = Some(self.step_message(label));
        }
    }

    pub(crate) fn record_failure(&mut self, label: &str, error: String) {
        if self.status == ProgressStatus::Running && self.remaining() > 0 {
            self.failed += 1;
            self.errors.push(error);
            self.message = Some(self.step_message(label));
        }
    }

    pub(crate) fn complete(&mut self, label: &str) {
        if self.advance(ProgressStatus::Completed) {
            self.message = Some(match self.failed {
                0 => format!("{} completed", label),
                1 => format!("{} completed with 1 failure", label),
                n => format!("{} completed with {} failures", label, n),
            });
        }
    }

    pub(crate) fn cancel(&mut self) {
        if self.advance(ProgressStatus::Cancelled) {
            self.message = Some("Operation cancelled".to_string());
        }
    }

    pub(crate) fn abort(&mut self, label: &str, reason: String) {
        if self.advance(ProgressStatus::Failed) {
            self.message = Some(format!("{} failed: {}", label, reason));
            self.errors.push(reason);
        }
    }

    fn step_message(&self, label: &str) -> String {
        format!("Processing {}: {}/{}", label, self.processed(), self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_moves_forward() {
        use ProgressStatus::*;
        assert!(Pending.can_advance_to(Running));
        assert!(Running.can_advance_to(Cancelled));
        assert!(!Completed.can_advance_to(Running));
        assert!(!Cancelled.can_advance_to(Completed));
        assert!(!Running.can_advance_to(Pending));
        assert!(!Failed.can_advance_to(Failed));
    }

    #[test]
    fn counts_never_exceed_total() {
        let mut p = Progress::new("approve", 1);
        p.start("Approve");
        p.record_success("Approve");
        p.record_failure("Approve", "late".into());
        assert_eq!(p.processed(), 1);
        assert!(p.errors.is_empty());
    }

    #[test]
    fn counting_requires_running() {
        let mut p = Progress::new("approve", 2);
        p.record_success("Approve");
        assert_eq!(p.completed, 0);
    }

    #[test]
    fn terminal_status_is_sticky() {
        let mut p = Progress::new("delete", 2);
        p.start("Delete");
        p.cancel();
        p.complete("Delete");
        assert_eq!(p.status, ProgressStatus::Cancelled);
        assert_eq!(p.message.as_deref(), Some("Operation cancelled"));
    }

    #[test]
    fn percentage_rounds_processed_share() {
        let mut p = Progress::new("export", 3);
        assert_eq!(p.percentage(), 0);
        p.start("Export");
        p.record_success("Export");
        assert_eq!(p.percentage(), 33);
        p.record_failure("Export", "boom".into());
        assert_eq!(p.percentage(), 67);
        assert_eq!(Progress::new("x", 0).percentage(), 0);
    }

    #[test]
    fn completion_message_mentions_failures() {
        let mut p = Progress::new("delete", 2);
        p.start("Delete Users");
        p.record_success("Delete Users");
        p.record_failure("Delete Users", "nope".into());
        p.complete("Delete Users");
        assert_eq!(
            p.message.as_deref(),
            Some("Delete Users completed with 1 failure")
        );
    }

    #[test]
    fn default_display_message() {
        let p = Progress::new("export", 4);
        assert_eq!(p.display_message(), "Processing 0 of 4 items");
    }

    #[test]
    fn serializes_lowercase_status() {
        let p = Progress::new("export", 1);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["action_id"], "export");
    }
}
