use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use fastbrot_render::EngineConfig;

// ---------------------------------------------------------------------------
// Host preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostPreferences {
    #[serde(default = "default_grid_width")]
    pub grid_width: u32,
    #[serde(default = "default_grid_height")]
    pub grid_height: u32,
    /// Print a character preview of every presented frame.
    #[serde(default = "default_true")]
    pub show_preview: bool,
    /// Width of the character preview, in cells.
    #[serde(default = "default_preview_columns")]
    pub preview_columns: u32,
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_grid_width() -> u32 {
    800
}

fn default_grid_height() -> u32 {
    600
}

fn default_true() -> bool {
    true
}

fn default_preview_columns() -> u32 {
    72
}

impl Default for HostPreferences {
    fn default() -> Self {
        Self {
            grid_width: default_grid_width(),
            grid_height: default_grid_height(),
            show_preview: true,
            preview_columns: default_preview_columns(),
            engine: EngineConfig::default(),
        }
    }
}

impl HostPreferences {
    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<HostPreferences>(&json) {
                    Ok(prefs) => {
                        info!("Loaded preferences from {}", path.display());
                        return prefs;
                    }
                    Err(e) => {
                        error!("Failed to parse preferences: {e}");
                    }
                },
                Err(e) => {
                    error!("Failed to read preferences file: {e}");
                }
            }
        } else {
            debug!("No preferences file at {}", path.display());
        }
        Self::default()
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}
