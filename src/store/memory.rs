use super::PresetStore;
use crate::error::{Result, SiftError};
use crate::model::FilterPreset;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

/// Preset store that lives as long as the process.
///
/// Uses `RefCell` so the trait can take `&self` like the file store does.
#[derive(Debug, Default)]
pub struct InMemoryPresetStore {
    screens: RefCell<HashMap<String, Vec<FilterPreset>>>,
    simulate_write_error: RefCell<bool>,
}

impl InMemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl PresetStore for InMemoryPresetStore {
    fn load_presets(&self, screen: &str) -> Result<Vec<FilterPreset>> {
        Ok(self
            .screens
            .borrow()
            .get(screen)
            .cloned()
            .unwrap_or_default())
    }

    fn save_presets(&self, screen: &str, presets: &[FilterPreset]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(SiftError::Io(io::Error::other("simulated write error")));
        }
        self.screens
            .borrow_mut()
            .insert(screen.to_string(), presets.to_vec());
        Ok(())
    }
}
