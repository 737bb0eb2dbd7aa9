//! # Configuration
//!
//! Tunables are declared with [`confique`], which layers environment
//! variables over an optional TOML file over compiled defaults.
//!
//! ## Resolution order
//!
//! 1. **Environment variables**: `SIFT_SUGGESTION_LIMIT`, `SIFT_COMPLETED_GRACE_MS`, ...
//! 2. **TOML file**: whatever path the host passes to [`SiftConfig::load`].
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `suggestion_limit` | `8` | Maximum number of search suggestions |
//! | `completed_grace_ms` | `3000` | How long a completed or failed run stays visible |
//! | `cancelled_grace_ms` | `2000` | How long a cancelled run stays visible |
//! | `item_yield_ms` | `0` | Pause between bulk items |

use crate::bulk::ProgressStatus;
use crate::error::{Result, SiftError};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SiftConfig {
    /// Maximum number of search suggestions shown.
    #[config(default = 8, env = "SIFT_SUGGESTION_LIMIT")]
    pub suggestion_limit: usize,

    /// Milliseconds a completed or failed run's progress stays visible.
    #[config(default = 3000, env = "SIFT_COMPLETED_GRACE_MS")]
    pub completed_grace_ms: u64,

    /// Milliseconds a cancelled run's progress stays visible.
    #[config(default = 2000, env = "SIFT_CANCELLED_GRACE_MS")]
    pub cancelled_grace_ms: u64,

    /// Milliseconds to pause between bulk items. Zero disables the pause.
    #[config(default = 0, env = "SIFT_ITEM_YIELD_MS")]
    pub item_yield_ms: u64,
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: crate::suggest::DEFAULT_SUGGESTION_LIMIT,
            completed_grace_ms: 3000,
            cancelled_grace_ms: 2000,
            item_yield_ms: 0,
        }
    }
}

impl SiftConfig {
    /// Loads from the environment and, if given, a TOML file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        builder.load().map_err(|e| SiftError::Config(e.to_string()))
    }

    pub fn completed_grace(&self) -> Duration {
        Duration::from_millis(self.completed_grace_ms)
    }

    pub fn cancelled_grace(&self) -> Duration {
        Duration::from_millis(self.cancelled_grace_ms)
    }

    pub fn item_yield(&self) -> Duration {
        Duration::from_millis(self.item_yield_ms)
    }

    /// Grace period for a run that ended in `status`.
    pub fn grace_for(&self, status: ProgressStatus) -> Duration {
        match status {
            ProgressStatus::Cancelled => self.cancelled_grace(),
            _ => self.completed_grace(),
        }
    }
}
