//! Game settings and preferences
//!
//! Persisted inside the save file; partial updates arrive as a `SettingsPatch`.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (explosions, sparks, etc.)
    pub particles: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    #[serde(alias = "volume")]
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (fewer particles)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            show_fps: false,

            master_volume: 0.3,
            sfx_volume: 1.0,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else if self.reduced_motion {
            self.quality.max_particles() / 4
        } else {
            self.quality.max_particles()
        }
    }

    /// Merge a partial update; unset fields keep their value
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(quality) = patch.quality {
            self.quality = quality;
        }
        if let Some(particles) = patch.particles {
            self.particles = particles;
        }
        if let Some(show_fps) = patch.show_fps {
            self.show_fps = show_fps;
        }
        if let Some(volume) = patch.master_volume {
            self.master_volume = volume.clamp(0.0, 1.0);
        }
        if let Some(volume) = patch.sfx_volume {
            self.sfx_volume = volume.clamp(0.0, 1.0);
        }
        if let Some(muted) = patch.muted {
            self.muted = muted;
        }
        if let Some(reduced_motion) = patch.reduced_motion {
            self.reduced_motion = reduced_motion;
        }
    }
}

/// Partial settings update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub quality: Option<QualityPreset>,
    pub particles: Option<bool>,
    pub show_fps: Option<bool>,
    #[serde(alias = "volume")]
    pub master_volume: Option<f32>,
    pub sfx_volume: Option<f32>,
    pub muted: Option<bool>,
    pub reduced_motion: Option<bool>,
}
