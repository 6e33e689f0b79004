//! Persisted display preferences

use std::{
    fs,
    path::{Path, PathBuf},
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

fn default_show_status_bar() -> bool {
    true
}

/// The only persisted setting: whether the status bar entry is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_show_status_bar")]
    pub show_status_bar: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            show_status_bar: default_show_status_bar(),
        }
    }
}

/// Default location of the preferences file
pub fn default_preferences_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("zeno").join("preferences.json"),
        None => PathBuf::from("zeno-preferences.json"),
    }
}

/// Reads and writes preferences as pretty JSON
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences, using defaults when the file is missing or unreadable
    pub fn load(&self) -> Preferences {
        if !self.path.exists() {
            debug!("No preferences at {}, using defaults", self.path.display());
            return Preferences::default();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read preferences {}: {}, using defaults", self.path.display(), e);
                return Preferences::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("Invalid preferences format in {}: {}, using defaults", self.path.display(), e);
            Preferences::default()
        })
    }

    pub fn save(&self, preferences: &Preferences) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string_pretty(preferences)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences to {}", self.path.display()))?;
        debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}
