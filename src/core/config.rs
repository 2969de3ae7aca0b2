use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::Tolerance;

/// Configuration values the monitor must never run with. Checked once,
/// up front, via [`Settings::validate`]; the tick loop itself never sees
/// an invalid tolerance or a missing waveform.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tolerance padding must be non-negative, got ({pad_x}, {pad_y})")]
    NegativeTolerance { pad_x: i32, pad_y: i32 },
    #[error("alarm waveform not found: {0}")]
    MissingWaveform(PathBuf),
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
}

/// Application settings, persisted in settings.json.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub pad_x: i32,
    pub pad_y: i32,
    pub alarm_file: PathBuf,
    pub camera_id: u32,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_tick_interval_ms() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pad_x: 30,
            pad_y: 30,
            alarm_file: PathBuf::from("./data/audio/alarm_tone.wav"),
            camera_id: 0,
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Settings {
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.pad_x, self.pad_y)
    }

    /// Reject semantically invalid values before the loop starts. Values
    /// are never coerced into range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pad_x < 0 || self.pad_y < 0 {
            return Err(ConfigError::NegativeTolerance {
                pad_x: self.pad_x,
                pad_y: self.pad_y,
            });
        }
        if !self.alarm_file.exists() {
            return Err(ConfigError::MissingWaveform(self.alarm_file.clone()));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(app_config_dir: PathBuf) -> Self {
        Self {
            config_path: app_config_dir.join("settings.json"),
        }
    }

    pub fn load(&self) -> Settings {
        if self.config_path.exists() {
            if let Ok(content) = fs::read_to_string(&self.config_path) {
                if let Ok(settings) = serde_json::from_str(&content) {
                    return settings;
                }
            }
        }
        Settings::default()
    }

    pub fn save(&self, settings: &Settings) -> io::Result<()> {
        // Ensure directory exists
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.config_path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().to_path_buf());

        let default = manager.load();
        assert_eq!(default.pad_x, 30);
        assert_eq!(default.pad_y, 30);

        let new_settings = Settings {
            pad_x: 40,
            pad_y: 15,
            alarm_file: PathBuf::from("/tmp/tone.wav"),
            camera_id: 1,
            tick_interval_ms: 50,
        };

        manager.save(&new_settings).unwrap();
        let loaded = manager.load();

        assert_eq!(loaded.pad_x, 40);
        assert_eq!(loaded.pad_y, 15);
        assert_eq!(loaded.alarm_file, PathBuf::from("/tmp/tone.wav"));
        assert_eq!(loaded.camera_id, 1);
        assert_eq!(loaded.tick_interval_ms, 50);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().to_path_buf());

        fs::write(dir.path().join("settings.json"), "not json {").unwrap();
        let loaded = manager.load();
        assert_eq!(loaded.pad_x, Settings::default().pad_x);
    }

    #[test]
    fn test_validate_rejects_negative_tolerance() {
        let settings = Settings {
            pad_x: -5,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::NegativeTolerance { pad_x: -5, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_missing_waveform() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            alarm_file: dir.path().join("absent.wav"),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::MissingWaveform(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let dir = tempdir().unwrap();
        let wav = dir.path().join("tone.wav");
        File::create(&wav).unwrap();

        let settings = Settings {
            alarm_file: wav,
            tick_interval_ms: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::ZeroTickInterval)));
    }

    #[test]
    fn test_validate_accepts_good_settings() {
        let dir = tempdir().unwrap();
        let wav = dir.path().join("tone.wav");
        File::create(&wav).unwrap();

        let settings = Settings {
            alarm_file: wav,
            ..Settings::default()
        };
        settings.validate().unwrap();
        assert_eq!(settings.tolerance(), Tolerance::new(30, 30));
    }
}
