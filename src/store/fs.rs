use super::PresetStore;
use crate::error::{Result, SiftError};
use crate::model::FilterPreset;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const PRESETS_FILE: &str = "presets.json";

type PresetFile = BTreeMap<String, Vec<FilterPreset>>;

/// Presets for every screen, kept in `<root>/presets.json`.
#[derive(Debug, Clone)]
pub struct FilePresetStore {
    root: PathBuf,
}

impl FilePresetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn presets_file(&self) -> PathBuf {
        self.root.join(PRESETS_FILE)
    }

    fn read_all(&self) -> Result<PresetFile> {
        let path = self.presets_file();
        if !path.exists() {
            return Ok(PresetFile::new());
        }
        let content = fs::read_to_string(path).map_err(SiftError::Io)?;
        let all: PresetFile = serde_json::from_str(&content).map_err(SiftError::Serialization)?;
        Ok(all)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SiftError::Io)?;
        }
        Ok(())
    }
}

impl PresetStore for FilePresetStore {
    fn load_presets(&self, screen: &str) -> Result<Vec<FilterPreset>> {
        let mut all = self.read_all()?;
        Ok(all.remove(screen).unwrap_or_default())
    }

    fn save_presets(&self, screen: &str, presets: &[FilterPreset]) -> Result<()> {
        self.ensure_dir()?;

        let mut all = self.read_all()?;
        if presets.is_empty() {
            all.remove(screen);
        } else {
            all.insert(screen.to_string(), presets.to_vec());
        }
        let content = serde_json::to_string_pretty(&all).map_err(SiftError::Serialization)?;

        let tmp_file = self.root.join(format!(".presets-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(SiftError::Io)?;
        fs::rename(&tmp_file, self.presets_file()).map_err(SiftError::Io)?;

        debug!(screen, count = presets.len(), "saved presets");
        Ok(())
    }
}
