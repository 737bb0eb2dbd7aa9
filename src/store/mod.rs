//! # Preset Storage
//!
//! Saved filter presets outlive the session through a [`PresetStore`]. Presets
//! are grouped per screen (a "users" list and a "bookings" list keep separate
//! presets), and each save replaces the whole list for that screen.
//!
//! ## Implementations
//!
//! - [`fs::FilePresetStore`]: one `presets.json` in a directory chosen by the host.
//! - [`memory::InMemoryPresetStore`]: for tests and hosts that persist elsewhere.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! └── presets.json    # { "<screen>": [FilterPreset, ...], ... }
//! ```

use crate::error::Result;
use crate::model::FilterPreset;

pub mod fs;
pub mod memory;

pub use fs::FilePresetStore;
pub use memory::InMemoryPresetStore;

pub trait PresetStore {
    /// Presets saved for `screen`, in saved order. Unknown screens yield an
    /// empty list.
    fn load_presets(&self, screen: &str) -> Result<Vec<FilterPreset>>;

    /// Replaces every preset saved for `screen`.
    ///
    /// MUST be atomic: a failed save leaves the previous list intact.
    fn save_presets(&self, screen: &str, presets: &[FilterPreset]) -> Result<()>;
}
