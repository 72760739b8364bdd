//! User settings loaded from ~/.flappy-dart/settings.json.

use super::config::{ConfigError, Difficulty, GameConfig};
use crate::scores::RemoteSettings;
use crate::utils::persistence::read_if_exists;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Full tuning override; replaces the difficulty preset when present.
    pub tuning: Option<GameConfig>,
    /// Hosted score table. Scores stay on this machine when absent.
    pub remote: Option<RemoteSettings>,
    /// Account id used when reporting scores. A guest id is generated if unset.
    pub user_id: Option<String>,
}

impl Settings {
    /// Read settings from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match read_if_exists(path)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Self::default()),
        }
    }

    /// Like [`Settings::load`], but logs and falls back to defaults on error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("using default settings: {}", e);
            Self::default()
        })
    }

    /// The validated tuning for a run.
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        let config = self
            .tuning
            .clone()
            .unwrap_or_else(|| self.difficulty.config());
        config.validate()?;
        Ok(config)
    }
}
