/// Persisted player preferences: fall speed, difficulty and mute.
///
/// The record is small JSON. Reading never fails from the caller's point of
/// view: anything missing or malformed yields the defaults. Writes go to a
/// sibling temp file first and are renamed over the target.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{MAX_SPEED, MIN_SPEED, SPEED_STEP};
use crate::entities::Difficulty;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings i/o on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings file {} is not valid: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub speed: f32,
    pub difficulty: Difficulty,
    pub mute: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            speed: 3.0,
            difficulty: Difficulty::Medium,
            mute: false,
        }
    }
}

impl Settings {
    /// Load from `path`, falling back to defaults on any failure.
    pub fn load(path: &Path) -> Settings {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                log::info!("no settings at {}, using defaults", path.display());
                Settings::default()
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Settings::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Settings, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: Settings = serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(raw.sanitized())
    }

    /// Write to `<path>.tmp` and rename it over `path`, so a crash mid-write
    /// leaves the previous file untouched.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source: io::Error| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        let data = serde_json::to_vec_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let tmp = temp_path(path);
        fs::write(&tmp, data).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        log::debug!("saved settings to {}", path.display());
        Ok(())
    }

    /// Clamp a record read from disk back into the valid speed range.
    pub fn sanitized(self) -> Settings {
        let speed = if self.speed.is_finite() {
            self.speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            self.difficulty.base_speed()
        };
        Settings { speed, ..self }
    }

    pub fn speed_up(&self) -> Settings {
        Settings {
            speed: (self.speed + SPEED_STEP).min(MAX_SPEED),
            ..*self
        }
    }

    pub fn speed_down(&self) -> Settings {
        Settings {
            speed: (self.speed - SPEED_STEP).max(MIN_SPEED),
            ..*self
        }
    }

    /// Selecting a difficulty snaps the speed to that preset.
    pub fn with_difficulty(&self, difficulty: Difficulty) -> Settings {
        Settings {
            speed: difficulty.base_speed(),
            difficulty,
            ..*self
        }
    }

    pub fn toggled_mute(&self) -> Settings {
        Settings {
            mute: !self.mute,
            ..*self
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
