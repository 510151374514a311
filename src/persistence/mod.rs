//! Save data: high scores, settings and progress
//!
//! One JSON document behind a `StorageBackend`. Failures never reach the
//! game: they are logged and the store carries on with defaults.

mod backend;
mod error;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use error::PersistenceError;

use serde::{Deserialize, Serialize};

use crate::highscores::{HighScoreEntry, HighScores};
use crate::platform;
use crate::settings::{Settings, SettingsPatch};

/// Furthest the player has got
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub max_level: u32,
    pub max_weapon: u8,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            max_level: 1,
            max_weapon: 1,
        }
    }
}

/// Everything that survives a restart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveData {
    pub high_scores: HighScores,
    pub settings: Settings,
    pub progress: Progress,
}

impl SaveData {
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Save store used by the game host
pub struct Storage {
    backend: Box<dyn StorageBackend>,
    data: SaveData,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").field("data", &self.data).finish()
    }
}

impl Storage {
    /// Load from `backend`, falling back to defaults on any failure
    pub fn open(backend: Box<dyn StorageBackend>) -> Self {
        let loaded = backend
            .load()
            .and_then(|raw| raw.map(|json| SaveData::from_json(&json)).transpose());
        let data = match loaded {
            Ok(Some(data)) => {
                log::info!("Loaded {} high scores", data.high_scores.len());
                data
            }
            Ok(None) => {
                log::info!("No save data found, starting fresh");
                SaveData::default()
            }
            Err(err) => {
                log::warn!("Failed to load save data, using defaults: {err}");
                SaveData::default()
            }
        };
        Self { backend, data }
    }

    /// Store that never touches disk
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryBackend::default()))
    }

    pub fn data(&self) -> &SaveData {
        &self.data
    }

    fn persist(&mut self) {
        let result = self
            .data
            .to_json()
            .and_then(|json| self.backend.save(&json));
        match result {
            Ok(()) => log::debug!("Save data written"),
            Err(err) => log::warn!("Failed to save data: {err}"),
        }
    }

    /// Record a finished run; returns whether it is the new top score
    pub fn add_high_score(&mut self, score: u64, level: u32) -> bool {
        let is_top = self
            .data
            .high_scores
            .add_score(score, level, platform::now_ms());
        log::info!("Recorded score {score} (level {level}), new top: {is_top}");
        self.persist();
        is_top
    }

    /// Best first, at most ten
    pub fn high_scores(&self) -> &[HighScoreEntry] {
        &self.data.high_scores.entries
    }

    pub fn top_score(&self) -> u64 {
        self.data.high_scores.top_score().unwrap_or(0)
    }

    /// Raise the stored maxima; never lowers them
    pub fn update_progress(&mut self, level: u32, weapon_tier: u8) {
        let progress = &mut self.data.progress;
        progress.max_level = progress.max_level.max(level);
        progress.max_weapon = progress.max_weapon.max(weapon_tier);
        self.persist();
    }

    pub fn progress(&self) -> Progress {
        self.data.progress
    }

    pub fn settings(&self) -> &Settings {
        &self.data.settings
    }

    /// Merge and persist a settings change
    pub fn save_settings(&mut self, patch: &SettingsPatch) -> &Settings {
        self.data.settings.apply(patch);
        self.persist();
        &self.data.settings
    }

    /// Forget everything
    pub fn clear_data(&mut self) {
        log::info!("Clearing save data");
        self.data = SaveData::default();
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let storage = Storage::in_memory();
        assert!(storage.high_scores().is_empty());
        assert_eq!(storage.top_score(), 0);
        assert_eq!(storage.progress(), Progress::default());
        assert_eq!(storage.settings().master_volume, 0.3);
    }

    #[test]
    fn test_corrupt_data_falls_back_to_defaults() {
        let storage = Storage::open(Box::new(MemoryBackend::with_contents("{not json")));
        assert_eq!(*storage.data(), SaveData::default());
    }

    #[test]
    fn test_failing_backend_degrades_quietly() {
        let mut storage = Storage::open(Box::new(MemoryBackend::failing()));
        assert!(storage.add_high_score(100, 1));
        assert_eq!(storage.top_score(), 100);
        storage.update_progress(3, 2);
        assert_eq!(storage.progress().max_level, 3);
    }

    #[test]
    fn test_progress_only_rises() {
        let mut storage = Storage::in_memory();
        storage.update_progress(4, 3);
        storage.update_progress(2, 1);
        assert_eq!(
            storage.progress(),
            Progress {
                max_level: 4,
                max_weapon: 3
            }
        );
    }

    #[test]
    fn test_settings_patch_persisted() {
        let mut storage = Storage::in_memory();
        let settings = storage.save_settings(&SettingsPatch {
            muted: Some(true),
            ..Default::default()
        });
        assert!(settings.muted);
        assert_eq!(settings.master_volume, 0.3);
    }

    #[test]
    fn test_clear_data() {
        let mut storage = Storage::in_memory();
        storage.add_high_score(500, 2);
        storage.update_progress(2, 2);
        storage.clear_data();
        assert!(storage.high_scores().is_empty());
        assert_eq!(storage.progress(), Progress::default());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("space-impact.json");

        let mut storage = Storage::open(Box::new(FileBackend::new(&path)));
        assert!(storage.add_high_score(700, 3));
        assert!(!storage.add_high_score(300, 1));
        storage.update_progress(3, 4);

        let reopened = Storage::open(Box::new(FileBackend::new(&path)));
        let scores: Vec<u64> = reopened.high_scores().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![700, 300]);
        assert_eq!(reopened.progress().max_weapon, 4);
    }

    #[test]
    fn test_partial_save_fills_defaults() {
        let json = r#"{"highScores":{"entries":[{"score":10,"level":1,"timestamp":0.0}]}}"#;
        let storage = Storage::open(Box::new(MemoryBackend::with_contents(json)));
        assert_eq!(storage.top_score(), 10);
        assert_eq!(storage.progress(), Progress::default());
    }
}
