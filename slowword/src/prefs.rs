//! Remembered toolbar state.

use crate::document::{FontName, FontSize};
use serde::{Deserialize, Serialize};
use slowcore::storage::{self, config_dir};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordPrefs {
    pub font: FontName,
    pub size: FontSize,
    /// Directory the image picker opens in
    pub image_dir: Option<PathBuf>,
}

impl WordPrefs {
    pub fn default_path() -> PathBuf {
        config_dir("slowword").join("prefs.json")
    }

    pub fn load(path: &Path) -> Self {
        storage::load_or_default(path)
    }

    pub fn save(&self, path: &Path) {
        if let Err(e) = storage::save_json(path, self) {
            log::warn!("failed to save preferences to {}: {}", path.display(), e);
        }
    }
}
