//! # Bulk Operations
//!
//! Applying one action to every selected record, with a confirmation gate in
//! front and live progress behind.
//!
//! - [`catalog`]: the actions a screen offers and their eligibility rules
//! - [`confirm`]: the `Idle -> AwaitingConfirmation -> Executing` state machine
//! - [`executor`]: the sequential, cancellable run
//! - [`progress`]: counts, status and messages of one run
//! - [`retention`]: how long a finished run stays visible
//!
//! None of these touch the selection directly. The caller (usually
//! [`crate::api::SiftApi`]) snapshots selected ids, hands them to the
//! executor, and clears the selection once the finished progress expires.

pub mod catalog;
pub mod confirm;
pub mod executor;
pub mod progress;
pub mod retention;

pub use catalog::{BulkAction, BulkActionCatalog, Eligibility};
pub use confirm::{ConfirmationFlow, FlowState, PendingAction, Trigger, CONFIRMATION_TOKEN};
pub use executor::{BulkExecutor, BulkRun, CancelHandle, EffectError};
pub use progress::{Progress, ProgressStatus};
pub use retention::RetainedProgress;
