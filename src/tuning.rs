//! Data-driven game balance
//!
//! The whole feel of the game - variants, spawn flow, scoring, kill zone -
//! lives in one serializable struct. Missing or corrupt tuning files fall
//! back to defaults with a warning rather than failing the run.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::sim::{ScoreMode, SpawnerConfig, VariantCatalog};

/// Complete tuning for one game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTuning {
    pub spawner: SpawnerConfig,
    pub catalog: VariantCatalog,
    /// Pieces falling below this line end the run
    pub kill_zone_y: f32,
    #[serde(default)]
    pub score_mode: ScoreMode,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            spawner: SpawnerConfig::default(),
            catalog: VariantCatalog::standard(),
            kill_zone_y: consts::KILL_ZONE_Y,
            score_mode: ScoreMode::default(),
        }
    }
}

impl GameTuning {
    /// Load tuning from a JSON file, falling back to defaults on any error.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!(
                        "Corrupt tuning file {}: {err}; using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("No tuning file at {}: {err}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write tuning as pretty-printed JSON.
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
